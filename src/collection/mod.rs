//! Sequence wrapper with attribute predicates
//!
//! `SortableCollection` wraps a loaded result list and answers "does any
//! / every item have attribute X set?" without the caller writing the
//! loop. Items expose attributes through `HasAttributes`.

mod errors;
mod sortable;

pub use errors::{CollectionError, CollectionResult};
pub use sortable::{is_truthy, sortable, HasAttributes, SortableCollection};
