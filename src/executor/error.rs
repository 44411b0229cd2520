//! Executor-specific error types.

use thiserror::Error;

/// Errors surfaced by [`crate::executor::QueryExecutor`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecuteError {
    /// The datasource rejected the compiled statement. Not retried.
    #[error("datasource rejected statement: {0}")]
    ExecutionError(String),

    /// Transient connectivity failures persisted past the retry budget.
    #[error("datasource unreachable after retries: {0}")]
    ConnectionFailed(String),

    /// The in-flight call exceeded the caller's deadline and was cancelled.
    #[error("execution timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Errors a [`crate::executor::DatasourceConnector`] may return.
///
/// The split decides retry behavior: `Transient` is retried with backoff,
/// `Rejected` fails immediately.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectorError {
    /// Connectivity-level failure; the same statement may succeed shortly.
    #[error("transient connector failure: {0}")]
    Transient(String),

    /// The datasource parsed the statement and said no.
    #[error("statement rejected: {0}")]
    Rejected(String),
}
