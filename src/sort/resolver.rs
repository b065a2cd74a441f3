//! Sort resolution against a query's labels and tables
//!
//! Resolution order:
//! 1. Result labels of the selection (exact match)
//! 2. Candidate tables in query order, filtered by component
//!
//! The first table declaring the column decides. Unknown fields leave
//! the query untouched; nothing here returns an error.

use crate::config::{SortConfig, UnresolvedPolicy};
use crate::observability::{log_event_with_fields, Event};
use crate::orm::{Attribute, OrderClause, OrderTarget, Query};

use super::directive::SortDirective;

/// Outcome of looking a sort field up among the candidate tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Field resolved to a bindable attribute
    Found(Attribute),
    /// No usable attribute; the query stays as it was
    NotFound,
}

/// Applies sort directives to queries
#[derive(Debug, Clone, Default)]
pub struct SortResolver {
    config: SortConfig,
}

impl SortResolver {
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Returns `query` with the ordering described by `raw` appended.
    pub fn apply(&self, query: Query, raw: &str) -> Query {
        if raw.len() > self.config.max_directive_len {
            let len = raw.len().to_string();
            log_event_with_fields(Event::SortDirectiveRejected, &[("length", len.as_str())]);
            return query;
        }

        let Some(directive) = SortDirective::parse(raw) else {
            return query;
        };

        if query.labels().any(|label| label == directive.field()) {
            log_event_with_fields(Event::SortLabelApplied, &[("label", directive.field())]);
            let target = OrderTarget::Label(directive.field().to_string());
            return query.order_by(OrderClause::new(target, directive.direction()));
        }

        match self.resolve(&query, &directive) {
            Resolution::Found(attr) => {
                let shown = attr.to_string();
                log_event_with_fields(
                    Event::SortColumnApplied,
                    &[
                        ("column", shown.as_str()),
                        ("direction", directive.direction().as_str()),
                    ],
                );
                query.order_by(OrderClause::new(OrderTarget::Column(attr), directive.direction()))
            }
            Resolution::NotFound => query,
        }
    }

    /// Looks the directive's field up among the query's candidate tables.
    pub fn resolve(&self, query: &Query, directive: &SortDirective) -> Resolution {
        let field = directive.field();

        for candidate in query.candidate_targets() {
            let table = candidate.table();
            if let Some(component) = directive.component() {
                if table.name != component {
                    continue;
                }
            }
            if !table.has_column(field) {
                continue;
            }

            match candidate.attribute(field) {
                Some(attr) => return Resolution::Found(attr),
                None => {
                    log_event_with_fields(
                        Event::SortAttributeUnresolved,
                        &[("entity", candidate.name()), ("field", field)],
                    );
                    if self.config.unresolved == UnresolvedPolicy::Stop {
                        return Resolution::NotFound;
                    }
                }
            }
        }

        log_event_with_fields(Event::SortFieldUnknown, &[("field", field)]);
        Resolution::NotFound
    }
}

/// Applies a sort directive with the default resolver settings.
///
/// ```ignore
/// let query = apply_sort(Query::new(article), "-category-name");
/// ```
pub fn apply_sort(query: Query, directive: &str) -> Query {
    SortResolver::default().apply(query, directive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orm::{EntitySchema, PropertyDef, SortDirection, Table};
    use std::sync::Arc;

    fn category() -> Arc<EntitySchema> {
        Arc::new(EntitySchema::new(
            "Category",
            Table::new("category", ["id", "name"]),
            vec![PropertyDef::column("id"), PropertyDef::column("name")],
        ))
    }

    fn article() -> Arc<EntitySchema> {
        Arc::new(EntitySchema::new(
            "Article",
            Table::new("article", ["id", "name", "category_id"]),
            vec![
                PropertyDef::column("id"),
                PropertyDef::column("name"),
                PropertyDef::column("category_id"),
            ],
        ))
    }

    /// Table carries `legacy_name` but the entity exposes it as `label`
    fn author() -> Arc<EntitySchema> {
        Arc::new(EntitySchema::new(
            "Author",
            Table::new("author", ["id", "legacy_name"]),
            vec![
                PropertyDef::column("id"),
                PropertyDef::mapped_column("label", "legacy_name"),
            ],
        ))
    }

    fn editor() -> Arc<EntitySchema> {
        Arc::new(EntitySchema::new(
            "Editor",
            Table::new("editor", ["id", "legacy_name"]),
            vec![PropertyDef::column("id"), PropertyDef::column("legacy_name")],
        ))
    }

    fn only_clause(query: &Query) -> &OrderClause {
        assert_eq!(query.order_clauses().len(), 1);
        &query.order_clauses()[0]
    }

    #[test]
    fn test_empty_directive_is_noop() {
        let query = apply_sort(Query::new(article()), "");
        assert!(query.order_clauses().is_empty());
    }

    #[test]
    fn test_ascending_column() {
        let query = apply_sort(Query::new(article()), "name");
        let clause = only_clause(&query);
        assert_eq!(clause.direction, SortDirection::Asc);
        assert_eq!(clause.to_string(), "article.name ASC");
    }

    #[test]
    fn test_descending_column() {
        let query = apply_sort(Query::new(article()), "-name");
        let clause = only_clause(&query);
        assert_eq!(clause.direction, SortDirection::Desc);
        assert_eq!(clause.to_string(), "article.name DESC");
    }

    #[test]
    fn test_first_candidate_wins_without_component() {
        let query = apply_sort(Query::new(article()).join(category()), "name");
        assert_eq!(only_clause(&query).to_string(), "article.name ASC");
    }

    #[test]
    fn test_component_selects_joined_table() {
        let query = apply_sort(Query::new(article()).join(category()), "category-name");
        assert_eq!(only_clause(&query).to_string(), "category.name ASC");
    }

    #[test]
    fn test_unknown_component_is_noop() {
        let query = apply_sort(Query::new(article()).join(category()), "tag-name");
        assert!(query.order_clauses().is_empty());
    }

    #[test]
    fn test_label_takes_precedence() {
        let query = Query::new(category()).add_label("name", "upper(category.name)");
        let query = apply_sort(query, "-name");
        assert_eq!(
            only_clause(&query).target,
            OrderTarget::Label("name".into())
        );
    }

    #[test]
    fn test_label_sort() {
        let query = Query::new(category()).add_label("articles", "count(article.id)");
        let query = apply_sort(query, "articles");
        assert_eq!(only_clause(&query).to_string(), "articles ASC");
    }

    #[test]
    fn test_raw_joined_table() {
        let query = Query::new(article()).join_table(Table::new("tag_counts", ["tag", "total"]));
        let query = apply_sort(query, "-total");
        assert_eq!(only_clause(&query).to_string(), "tag_counts.total DESC");
    }

    #[test]
    fn test_unresolved_attribute_stops_by_default() {
        let query = Query::new(author()).join(editor());
        let query = apply_sort(query, "legacy_name");
        assert!(query.order_clauses().is_empty());
    }

    #[test]
    fn test_unresolved_attribute_continues_when_configured() {
        let resolver = SortResolver::new(SortConfig::continue_on_unresolved());
        let query = resolver.apply(Query::new(author()).join(editor()), "legacy_name");
        assert_eq!(only_clause(&query).to_string(), "editor.legacy_name ASC");
    }

    #[test]
    fn test_resolution_value() {
        let resolver = SortResolver::default();
        let query = Query::new(author());

        let found = resolver.resolve(&query, &SortDirective::parse("id").unwrap());
        assert!(matches!(found, Resolution::Found(ref attr) if attr.column == "id"));

        let missing = resolver.resolve(&query, &SortDirective::parse("legacy_name").unwrap());
        assert_eq!(missing, Resolution::NotFound);
    }

    #[test]
    fn test_overlong_directive_ignored() {
        let resolver = SortResolver::new(SortConfig {
            max_directive_len: 3,
            ..SortConfig::default()
        });
        let query = resolver.apply(Query::new(article()), "name");
        assert!(query.order_clauses().is_empty());
    }

    #[test]
    fn test_clauses_accumulate() {
        let query = apply_sort(Query::new(article()), "name");
        let query = apply_sort(query, "-id");
        let rendered: Vec<_> = query.order_clauses().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["article.name ASC", "article.id DESC"]);
    }
}
