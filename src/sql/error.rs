//! Binder and compiler error types.

use thiserror::Error;

/// Errors from resolving `${name}` placeholders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    /// A placeholder has neither a supplied value nor a declared default.
    #[error("unbound variable: ${{{0}}} has no value and no default")]
    UnboundVariable(String),

    /// A supplied value cannot be coerced to the declared type.
    #[error("type mismatch for ${{{name}}}: expected {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: String,
    },
}

/// Errors from statement-shape validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Input was empty or whitespace-only.
    #[error("sql statement is blank")]
    BlankStatement,

    /// Input contained a second top-level statement.
    #[error("multi-statement sql rejected")]
    MultiStatementRejected,
}
