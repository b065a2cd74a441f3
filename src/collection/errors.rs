//! Collection errors

use thiserror::Error;

/// Result type for collection predicates
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Collection predicate errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// An item does not expose the requested attribute
    #[error("Item {index} has no attribute '{attribute}'")]
    MissingAttribute { attribute: String, index: usize },
}

impl CollectionError {
    pub fn code(&self) -> &'static str {
        match self {
            CollectionError::MissingAttribute { .. } => "QK_MISSING_ATTRIBUTE",
        }
    }
}
