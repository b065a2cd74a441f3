//! ORM binding layer
//!
//! The helpers in this crate never reflect over model types. Instead the
//! binding layer declares each entity up front:
//!
//! - `EntitySchema`: entity name, storage table, mapped properties
//! - `Query`: immutable selection/join/ordering/options value
//! - `EntityRegistry`: descriptors loaded from JSON files

mod errors;
mod query;
mod registry;
mod schema;

pub use errors::{OrmError, OrmErrorCode, OrmResult};
pub use query::{
    Candidate, JoinTarget, LoadOption, OrderClause, OrderTarget, Query, Selectable, SortDirection,
};
pub use registry::EntityRegistry;
pub use schema::{Attribute, EntitySchema, PropertyDef, PropertyKind, Table};
