//! Dynamic query sorting from user-supplied strings
//!
//! ```text
//! "name"            ascending on the first table with a `name` column
//! "-name"           descending
//! "category-name"   ascending on the table named `category`
//! "articles"        ascending on the result label `articles`
//! ```
//!
//! Unknown fields are ignored so untrusted sort strings can be passed
//! straight through.

mod directive;
mod resolver;

pub use directive::SortDirective;
pub use resolver::{apply_sort, Resolution, SortResolver};
