//! Static entity descriptors
//!
//! An entity descriptor stands in for the mapper metadata an ORM keeps
//! per model class:
//! - the storage table (name + column names)
//! - the mapped properties, keyed by attribute name
//!
//! Descriptors are declared up front by the binding layer; nothing here
//! inspects types at runtime.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage table backing an entity (or joined directly as a raw table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name as it appears in SQL
    pub name: String,
    /// Column names in declaration order
    pub columns: Vec<String>,
}

impl Table {
    /// Create a table descriptor
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the table declares the column
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Bindable expression for one of this table's columns.
    ///
    /// Raw tables have no mapped attributes, so the column name doubles
    /// as the attribute key.
    pub fn column(&self, column: &str) -> Option<Attribute> {
        if !self.has_column(column) {
            return None;
        }
        Some(Attribute {
            entity: self.name.clone(),
            key: column.to_string(),
            table: self.name.clone(),
            column: column.to_string(),
        })
    }
}

/// Kind of a mapped property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PropertyKind {
    /// Simple column property
    Column {
        /// Underlying storage columns; the first is the primary one
        columns: Vec<String>,
    },
    /// Relationship to another entity
    Relationship {
        /// Target entity name
        target: String,
    },
    /// Composite value spanning several columns
    Composite {
        /// Columns making up the composite
        columns: Vec<String>,
    },
    /// Alternate name for another property
    Synonym {
        /// Key of the aliased property
        of: String,
    },
}

impl PropertyKind {
    /// Returns the kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyKind::Column { .. } => "column",
            PropertyKind::Relationship { .. } => "relationship",
            PropertyKind::Composite { .. } => "composite",
            PropertyKind::Synonym { .. } => "synonym",
        }
    }

    /// Returns true for simple column properties
    pub fn is_column(&self) -> bool {
        matches!(self, PropertyKind::Column { .. })
    }
}

/// A mapped property: attribute key plus its kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Attribute key on the entity
    pub key: String,
    /// Property kind
    #[serde(flatten)]
    pub kind: PropertyKind,
}

impl PropertyDef {
    /// Column property whose key matches its column name
    pub fn column(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            kind: PropertyKind::Column {
                columns: vec![key.clone()],
            },
            key,
        }
    }

    /// Column property mapped onto a differently named column
    pub fn mapped_column(key: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: PropertyKind::Column {
                columns: vec![column.into()],
            },
        }
    }

    /// Relationship property
    pub fn relationship(key: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: PropertyKind::Relationship {
                target: target.into(),
            },
        }
    }

    /// Composite property
    pub fn composite<I, S>(key: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            kind: PropertyKind::Composite {
                columns: columns.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Synonym property
    pub fn synonym(key: impl Into<String>, of: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: PropertyKind::Synonym { of: of.into() },
        }
    }

    /// First storage column of a column property
    pub fn first_column(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::Column { columns } => columns.first().map(String::as_str),
            _ => None,
        }
    }
}

/// Bindable column expression obtained from an entity attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Owning entity (or raw table) name
    pub entity: String,
    /// Attribute key
    pub key: String,
    /// Storage table name
    pub table: String,
    /// Storage column name
    pub column: String,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Complete entity descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Entity (model) name
    pub name: String,
    /// Backing table
    pub table: Table,
    /// Mapped properties in declaration order
    pub properties: Vec<PropertyDef>,
}

impl EntitySchema {
    /// Create a new entity descriptor
    pub fn new(name: impl Into<String>, table: Table, properties: Vec<PropertyDef>) -> Self {
        Self {
            name: name.into(),
            table,
            properties,
        }
    }

    /// Looks up a mapped property by key
    pub fn property(&self, key: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.key == key)
    }

    /// Simple column properties, in declaration order
    pub fn column_properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties.iter().filter(|p| p.kind.is_column())
    }

    /// Class-level attribute access.
    ///
    /// Column properties resolve to their first column, synonyms follow
    /// their target. Relationships and composites have no single column
    /// and resolve to `None`, as do unknown keys.
    pub fn attribute(&self, name: &str) -> Option<Attribute> {
        let mut key = name;
        // Synonym chains can't be longer than the property list
        for _ in 0..=self.properties.len() {
            let property = self.property(key)?;
            match &property.kind {
                PropertyKind::Column { columns } => {
                    let column = columns.first()?;
                    return Some(Attribute {
                        entity: self.name.clone(),
                        key: name.to_string(),
                        table: self.table.name.clone(),
                        column: column.clone(),
                    });
                }
                PropertyKind::Synonym { of } => key = of.as_str(),
                PropertyKind::Relationship { .. } | PropertyKind::Composite { .. } => {
                    return None
                }
            }
        }
        None
    }

    /// Validates the descriptor itself
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Entity name must not be empty".into());
        }
        if self.table.name.is_empty() {
            return Err(format!("Entity '{}' has an empty table name", self.name));
        }

        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.key.as_str()) {
                return Err(format!("Duplicate property '{}'", property.key));
            }
        }

        for property in &self.properties {
            match &property.kind {
                PropertyKind::Column { columns } | PropertyKind::Composite { columns } => {
                    if columns.is_empty() {
                        return Err(format!(
                            "{} property '{}' maps no columns",
                            property.kind.kind_name(),
                            property.key
                        ));
                    }
                    if let Some(missing) = columns.iter().find(|c| !self.table.has_column(c)) {
                        return Err(format!(
                            "Property '{}' references unknown column '{}.{}'",
                            property.key, self.table.name, missing
                        ));
                    }
                }
                PropertyKind::Synonym { of } => {
                    if !seen.contains(of.as_str()) {
                        return Err(format!(
                            "Synonym '{}' points at unknown property '{}'",
                            property.key, of
                        ));
                    }
                }
                PropertyKind::Relationship { .. } => {}
            }
        }

        Ok(())
    }
}
