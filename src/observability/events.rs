//! Observable events emitted by the query helpers
//!
//! Events are explicit and typed; each maps to a stable upper-snake name.

use std::fmt;

use super::logger::Severity;

/// Events emitted while rewriting queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Sorting
    /// Ordering applied on a result label
    SortLabelApplied,
    /// Ordering applied on an entity column
    SortColumnApplied,
    /// Column matched but no attribute carries its name
    SortAttributeUnresolved,
    /// Sort field matched nothing; query left untouched
    SortFieldUnknown,
    /// Directive exceeded the configured length
    SortDirectiveRejected,

    // Deferral
    /// Deferred-load options attached
    ColumnsDeferred,

    // Configuration
    /// Configuration loaded from disk
    ConfigLoaded,
    /// Entity descriptors loaded from disk
    EntitiesLoaded,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SortLabelApplied => "SORT_LABEL_APPLIED",
            Event::SortColumnApplied => "SORT_COLUMN_APPLIED",
            Event::SortAttributeUnresolved => "SORT_ATTRIBUTE_UNRESOLVED",
            Event::SortFieldUnknown => "SORT_FIELD_UNKNOWN",
            Event::SortDirectiveRejected => "SORT_DIRECTIVE_REJECTED",
            Event::ColumnsDeferred => "COLUMNS_DEFERRED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::EntitiesLoaded => "ENTITIES_LOADED",
        }
    }

    /// Default severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ConfigLoaded | Event::EntitiesLoaded => Severity::Info,
            Event::SortDirectiveRejected => Severity::Warn,
            _ => Severity::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
