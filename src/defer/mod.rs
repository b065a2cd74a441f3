//! Selective column deferral
//!
//! Defers every simple column of a query's primary entity except the
//! ones named, so wide rows load only what the caller reads up front.
//! Relationships, composites and synonyms are never touched.

use std::collections::BTreeSet;

use crate::observability::{log_event_with_fields, Event};
use crate::orm::{LoadOption, OrmError, OrmResult, Query};

/// Column names to keep eagerly loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet(BTreeSet<String>);

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Attaches a deferred-load option for every simple column property of
/// the primary entity whose first storage column is not in `keep`.
///
/// Keys that are already deferred are not added twice. Fails only when
/// the query's first selection item is not backed by a mapped entity.
pub fn defer_except(query: Query, keep: &ColumnSet) -> OrmResult<Query> {
    let entity = query
        .primary_entity()
        .cloned()
        .ok_or_else(OrmError::no_primary_entity)?;

    let mut query = query;
    let mut deferred = 0usize;

    for property in entity.column_properties() {
        let Some(column) = property.first_column() else {
            continue;
        };
        if keep.contains(column) || query.is_deferred(&property.key) {
            continue;
        }
        query = query.options(LoadOption::defer(property.key.clone()));
        deferred += 1;
    }

    let count = deferred.to_string();
    log_event_with_fields(
        Event::ColumnsDeferred,
        &[("count", count.as_str()), ("entity", entity.name.as_str())],
    );

    Ok(query)
}
