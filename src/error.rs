//! Unified error taxonomy for the resolution pipeline.
//!
//! Validation errors (`InvalidRequest`, catalog lookups, binder and compiler
//! rejections) surface immediately; they indicate a malformed request, not
//! a transient condition. Retrying happens only inside the executor, for
//! transient connector failures. An empty search result is not an error.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::executor::ExecuteError;
use crate::model::SensitivityLevel;
use crate::sql::{BindError, CompileError};

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, QueryError>;

/// Top-level error for the resolve → bind → compile → execute pipeline.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    /// The request names an entity above the caller's clearance. Surfaced as
    /// a rejection, never downgraded to an empty result.
    #[error("permission denied: '{entity}' requires {required:?} clearance")]
    PermissionDenied {
        entity: String,
        required: SensitivityLevel,
    },

    /// The request failed field-level constraint checks.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
