//! Sort directive grammar
//!
//! ```text
//! directive := ["-"] [component "-"] field
//! ```
//!
//! A leading `-` selects descending order. What remains is split on `-`:
//! exactly two parts read as `component-field`, anything else is taken
//! whole as the field. Field and component names must not contain `-`;
//! a directive with more hyphens yields a field no column can match.
//! An empty component (`--name`) places no restriction.

use crate::orm::SortDirection;

/// Parsed sort directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    direction: SortDirection,
    component: Option<String>,
    field: String,
}

impl SortDirective {
    /// Parses a raw directive. Empty input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        let (direction, rest) = match raw.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, raw),
        };

        let parts: Vec<&str> = rest.split('-').collect();
        let (component, field) = match parts.as_slice() {
            [component, field] => {
                let component = Some(*component).filter(|c| !c.is_empty());
                (component.map(str::to_string), (*field).to_string())
            }
            _ => (None, rest.to_string()),
        };

        Some(Self {
            direction,
            component,
            field,
        })
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Table name restricting where the field is looked up
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}
