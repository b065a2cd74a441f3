//! ORM binding error types
//!
//! Error codes:
//! - QK_ENTITY_MALFORMED
//! - QK_ENTITY_IMMUTABLE
//! - QK_NO_PRIMARY_ENTITY

use std::fmt;

use thiserror::Error;

/// Binding-layer error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrmErrorCode {
    /// Entity descriptor is unreadable or structurally invalid
    QkEntityMalformed,
    /// Attempt to register an entity name twice
    QkEntityImmutable,
    /// Query selection does not start with a mapped entity
    QkNoPrimaryEntity,
}

impl OrmErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            OrmErrorCode::QkEntityMalformed => "QK_ENTITY_MALFORMED",
            OrmErrorCode::QkEntityImmutable => "QK_ENTITY_IMMUTABLE",
            OrmErrorCode::QkNoPrimaryEntity => "QK_NO_PRIMARY_ENTITY",
        }
    }
}

impl fmt::Display for OrmErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Binding-layer error with context
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct OrmError {
    code: OrmErrorCode,
    message: String,
    entity: Option<String>,
}

impl OrmError {
    /// Create a malformed entity error
    pub fn entity_malformed(source: impl Into<String>, reason: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            code: OrmErrorCode::QkEntityMalformed,
            message: format!("{}: {}", source, reason.into()),
            entity: None,
        }
    }

    /// Create an entity immutability error
    pub fn entity_immutable(entity: impl Into<String>) -> Self {
        let name = entity.into();
        Self {
            code: OrmErrorCode::QkEntityImmutable,
            message: format!("Entity '{}' is already registered", name),
            entity: Some(name),
        }
    }

    /// Create a missing primary entity error
    pub fn no_primary_entity() -> Self {
        Self {
            code: OrmErrorCode::QkNoPrimaryEntity,
            message: "First selected item is not a mapped entity".into(),
            entity: None,
        }
    }

    pub fn code(&self) -> OrmErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Entity name if applicable
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }
}

/// Result type for binding-layer operations
pub type OrmResult<T> = Result<T, OrmError>;
