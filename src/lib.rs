//! querykit - ergonomic helpers for ORM query objects
//!
//! - `sort`: order a query by a user-supplied string such as `-category-name`
//! - `defer`: lazy-load every column except a chosen few
//! - `collection`: `any` / `all` attribute predicates over result lists
//! - `like`: escape literals for `LIKE` patterns
//!
//! The ORM itself is represented by the `orm` binding layer: static
//! entity descriptors and an immutable `Query` value.

pub mod collection;
pub mod config;
pub mod defer;
pub mod like;
pub mod observability;
pub mod orm;
pub mod sort;

pub use collection::{sortable, SortableCollection};
pub use config::QueryKitConfig;
pub use defer::{defer_except, ColumnSet};
pub use like::{escape_like, escape_like_default, LikePattern};
pub use orm::Query;
pub use sort::{apply_sort, SortResolver};
