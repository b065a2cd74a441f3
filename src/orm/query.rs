//! Immutable query value
//!
//! `Query` models the ORM's in-progress retrieval request: what is
//! selected, what is joined, the ordering clauses and loader options
//! attached so far. Every mutator consumes the query and hands back a
//! new one, so a query threaded through several helpers never aliases.

use std::fmt;
use std::sync::Arc;

use super::schema::{Attribute, EntitySchema, Table};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// What an ordering clause sorts by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderTarget {
    /// A result label assigned in the selection
    Label(String),
    /// A column reached through an entity attribute
    Column(Attribute),
}

impl fmt::Display for OrderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderTarget::Label(label) => write!(f, "{}", label),
            OrderTarget::Column(attr) => write!(f, "{}", attr),
        }
    }
}

/// Ordering clause: target wrapped in a direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderClause {
    pub target: OrderTarget,
    pub direction: SortDirection,
}

impl OrderClause {
    pub fn new(target: OrderTarget, direction: SortDirection) -> Self {
        Self { target, direction }
    }

    pub fn asc(target: OrderTarget) -> Self {
        Self::new(target, SortDirection::Asc)
    }

    pub fn desc(target: OrderTarget) -> Self {
        Self::new(target, SortDirection::Desc)
    }
}

impl fmt::Display for OrderClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.target,
            self.direction.as_str().to_ascii_uppercase()
        )
    }
}

/// Column-loading directive attached through `Query::options`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOption {
    /// Load the property lazily, on first access
    Defer(String),
}

impl LoadOption {
    pub fn defer(key: impl Into<String>) -> Self {
        LoadOption::Defer(key.into())
    }

    /// Property key the option applies to
    pub fn key(&self) -> &str {
        match self {
            LoadOption::Defer(key) => key,
        }
    }
}

/// An item in the query's selection list
#[derive(Debug, Clone)]
pub enum Selectable {
    /// A whole mapped entity
    Entity(Arc<EntitySchema>),
    /// A single attribute of a mapped entity
    Column {
        entity: Arc<EntitySchema>,
        key: String,
    },
    /// A computed expression with a result label,
    /// e.g. `count(article.id) AS articles`
    Labeled { label: String, expression: String },
}

impl Selectable {
    /// The mapped entity this selection draws from, if any
    pub fn entity(&self) -> Option<&Arc<EntitySchema>> {
        match self {
            Selectable::Entity(entity) | Selectable::Column { entity, .. } => Some(entity),
            Selectable::Labeled { .. } => None,
        }
    }

    /// The result label, if any
    pub fn label(&self) -> Option<&str> {
        match self {
            Selectable::Labeled { label, .. } => Some(label.as_str()),
            _ => None,
        }
    }
}

/// Target of a join
#[derive(Debug, Clone)]
pub enum JoinTarget {
    /// A mapped entity
    Entity(Arc<EntitySchema>),
    /// A raw table or subquery with no mapping
    Table(Table),
}

/// A table-bearing target a sort field may resolve against
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    Mapped(&'a EntitySchema),
    Raw(&'a Table),
}

impl<'a> Candidate<'a> {
    /// Storage table of the candidate
    pub fn table(&self) -> &'a Table {
        match *self {
            Candidate::Mapped(entity) => &entity.table,
            Candidate::Raw(table) => table,
        }
    }

    /// Resolves `name` as an attribute of the candidate
    pub fn attribute(&self, name: &str) -> Option<Attribute> {
        match self {
            Candidate::Mapped(entity) => entity.attribute(name),
            Candidate::Raw(table) => table.column(name),
        }
    }

    /// Display name for diagnostics
    pub fn name(&self) -> &'a str {
        match *self {
            Candidate::Mapped(entity) => &entity.name,
            Candidate::Raw(table) => &table.name,
        }
    }
}

/// In-progress retrieval request
#[derive(Debug, Clone, Default)]
pub struct Query {
    entities: Vec<Selectable>,
    joins: Vec<JoinTarget>,
    order_by: Vec<OrderClause>,
    options: Vec<LoadOption>,
}

impl Query {
    /// Query selecting a single entity
    pub fn new(entity: Arc<EntitySchema>) -> Self {
        Self::default().add_entity(entity)
    }

    /// Query over an arbitrary selection list
    pub fn select(entities: impl IntoIterator<Item = Selectable>) -> Self {
        Self {
            entities: entities.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Adds a whole entity to the selection
    pub fn add_entity(mut self, entity: Arc<EntitySchema>) -> Self {
        self.entities.push(Selectable::Entity(entity));
        self
    }

    /// Adds a single entity attribute to the selection
    pub fn add_column(mut self, entity: Arc<EntitySchema>, key: impl Into<String>) -> Self {
        self.entities.push(Selectable::Column {
            entity,
            key: key.into(),
        });
        self
    }

    /// Adds a labelled expression to the selection
    pub fn add_label(mut self, label: impl Into<String>, expression: impl Into<String>) -> Self {
        self.entities.push(Selectable::Labeled {
            label: label.into(),
            expression: expression.into(),
        });
        self
    }

    /// Joins a mapped entity
    pub fn join(mut self, entity: Arc<EntitySchema>) -> Self {
        self.joins.push(JoinTarget::Entity(entity));
        self
    }

    /// Joins a raw table
    pub fn join_table(mut self, table: Table) -> Self {
        self.joins.push(JoinTarget::Table(table));
        self
    }

    /// Appends an ordering clause
    pub fn order_by(mut self, clause: OrderClause) -> Self {
        self.order_by.push(clause);
        self
    }

    /// Attaches a loader option
    pub fn options(mut self, option: LoadOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn entities(&self) -> &[Selectable] {
        &self.entities
    }

    pub fn joins(&self) -> &[JoinTarget] {
        &self.joins
    }

    pub fn order_clauses(&self) -> &[OrderClause] {
        &self.order_by
    }

    pub fn load_options(&self) -> &[LoadOption] {
        &self.options
    }

    /// Entity behind the first selection item
    pub fn primary_entity(&self) -> Option<&Arc<EntitySchema>> {
        self.entities.first().and_then(Selectable::entity)
    }

    /// Result labels of the selection, in order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().filter_map(Selectable::label)
    }

    /// Selected entities followed by joined targets, in query order
    pub fn candidate_targets(&self) -> Vec<Candidate<'_>> {
        let selected = self
            .entities
            .iter()
            .filter_map(Selectable::entity)
            .map(|entity| Candidate::Mapped(entity.as_ref()));
        let joined = self.joins.iter().map(|join| match join {
            JoinTarget::Entity(entity) => Candidate::Mapped(entity.as_ref()),
            JoinTarget::Table(table) => Candidate::Raw(table),
        });
        selected.chain(joined).collect()
    }

    /// Keys of all deferred properties
    pub fn deferred_keys(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|option| match option {
            LoadOption::Defer(key) => key.as_str(),
        })
    }

    /// Returns true if the property is deferred
    pub fn is_deferred(&self, key: &str) -> bool {
        self.deferred_keys().any(|k| k == key)
    }
}
