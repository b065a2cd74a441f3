//! Query Helper Tests
//!
//! End-to-end behaviour of the public helpers over a small
//! article/category model:
//! - Sorting by column, label and component-qualified column
//! - Unknown sort fields leave the query untouched
//! - Column deferral keeps exactly the requested columns eager
//! - Helpers compose on the same query value

use std::sync::Arc;

use querykit::orm::{EntitySchema, OrderTarget, PropertyDef, SortDirection, Table};
use querykit::{apply_sort, defer_except, escape_like, sortable, ColumnSet, Query};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

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
            PropertyDef::relationship("category", "Category"),
        ],
    ))
}

fn author() -> Arc<EntitySchema> {
    Arc::new(EntitySchema::new(
        "Author",
        Table::new("author", ["id", "name", "bio"]),
        vec![
            PropertyDef::column("id"),
            PropertyDef::column("name"),
            PropertyDef::column("bio"),
        ],
    ))
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_sort_direction_follows_marker() {
    let asc = apply_sort(Query::new(article()), "name");
    let desc = apply_sort(Query::new(article()), "-name");

    assert_eq!(asc.order_clauses()[0].direction, SortDirection::Asc);
    assert_eq!(desc.order_clauses()[0].direction, SortDirection::Desc);

    for query in [&asc, &desc] {
        match &query.order_clauses()[0].target {
            OrderTarget::Column(attr) => {
                assert_eq!(attr.entity, "Article");
                assert_eq!(attr.key, "name");
            }
            other => panic!("expected column target, got {:?}", other),
        }
    }
}

#[test]
fn test_sort_unknown_field_leaves_ordering_unchanged() {
    let base = apply_sort(Query::new(article()), "id");
    let after = apply_sort(base.clone(), "popularity");

    assert_eq!(base.order_clauses(), after.order_clauses());
}

#[test]
fn test_sort_malformed_directive_is_noop() {
    let query = apply_sort(Query::new(article()).join(category()), "category-name-extra");
    assert!(query.order_clauses().is_empty());
}

#[test]
fn test_sort_component_resolves_against_named_table() {
    let query = Query::new(article()).join(category());

    let query = apply_sort(query, "category-name");
    match &query.order_clauses()[0].target {
        OrderTarget::Column(attr) => assert_eq!(attr.table, "category"),
        other => panic!("expected column target, got {:?}", other),
    }
}

#[test]
fn test_sort_by_aggregate_label() {
    let query = Query::new(category()).add_label("articles", "count(article.id)");
    let query = apply_sort(query, "-articles");

    assert_eq!(query.order_clauses()[0].to_string(), "articles DESC");
}

// =============================================================================
// Deferral
// =============================================================================

#[test]
fn test_defer_except_keeps_requested_columns() {
    let keep: ColumnSet = ["id", "name"].into_iter().collect();
    let query = defer_except(Query::new(author()), &keep).unwrap();

    assert!(query.is_deferred("bio"));
    assert!(!query.is_deferred("id"));
    assert!(!query.is_deferred("name"));
}

#[test]
fn test_defer_except_ignores_relationships() {
    let keep: ColumnSet = ["id"].into_iter().collect();
    let query = defer_except(Query::new(article()), &keep).unwrap();

    let deferred: Vec<_> = query.deferred_keys().collect();
    assert_eq!(deferred, vec!["name", "category_id"]);
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn test_helpers_compose() {
    let keep: ColumnSet = ["id", "name"].into_iter().collect();
    let query = Query::new(author());

    let query = apply_sort(query, "-name");
    let query = defer_except(query, &keep).unwrap();

    assert_eq!(query.order_clauses()[0].to_string(), "author.name DESC");
    assert!(query.is_deferred("bio"));
}

#[test]
fn test_collection_and_like_stand_alone() {
    let rows = sortable(vec![json!({"active": true}), json!({"active": false})]);
    assert!(rows.any("active").unwrap());
    assert!(!rows.all("active").unwrap());

    assert_eq!(escape_like("50%_off", '*'), "50*%*_off");
}
