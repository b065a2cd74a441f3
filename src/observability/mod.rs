//! Observability for the query helpers
//!
//! Structured JSON log lines, one per event, written synchronously.
//! Logging is read-only: it never changes what a helper returns.
//!
//! ```ignore
//! use querykit::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! log_event_with_fields(Event::SortFieldUnknown, &[("field", "age")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
