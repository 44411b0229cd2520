//! Catalog-specific error types.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by snapshot validation and catalog lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Lookup referenced a model id the active snapshot does not contain.
    #[error("model not found: {0}")]
    ModelNotFound(u64),

    /// A snapshot failed structural validation and was not activated.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    /// A snapshot document could not be deserialized.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedSnapshot(err.to_string())
    }
}
