//! Guarded dispatch of compiled SQL to the datasource.
//!
//! The executor is the only part of the pipeline that blocks on external
//! I/O. It enforces the caller's deadline via drop-cancellation, retries
//! transient connector failures with doubling backoff, and applies the
//! sensitivity post-filter to every successful result.

mod connector;
mod error;
mod mock;
pub mod redact;
mod result;

pub use connector::DatasourceConnector;
pub use error::{ConnectorError, ExecuteError};
pub use mock::MockConnector;
pub use result::{ColumnInfo, RowSet, Value};

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::SemanticCatalog;
use crate::config::ExecuteSettings;
use crate::model::UserContext;

/// Bounded retry with doubling backoff for transient connector failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_settings(settings: &ExecuteSettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            initial_backoff: Duration::from_millis(settings.backoff_ms),
        }
    }
}

/// Dispatches compiled SQL and post-filters the result.
pub struct QueryExecutor {
    connector: Arc<dyn DatasourceConnector>,
    catalog: Arc<SemanticCatalog>,
    retry: RetryPolicy,
}

impl QueryExecutor {
    pub fn new(
        connector: Arc<dyn DatasourceConnector>,
        catalog: Arc<SemanticCatalog>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            connector,
            catalog,
            retry,
        }
    }

    /// Execute one compiled statement under the caller's deadline.
    ///
    /// Timeouts and rejections fail immediately; only transient connectivity
    /// failures are retried, up to the policy's budget. On success the
    /// result passes through the sensitivity post-filter for `model_id`.
    pub async fn execute(
        &self,
        compiled_sql: &str,
        model_id: u64,
        user: &UserContext,
        timeout: Duration,
    ) -> Result<RowSet, ExecuteError> {
        let mut attempt: u32 = 0;
        let mut backoff = self.retry.initial_backoff;

        loop {
            match tokio::time::timeout(timeout, self.connector.execute(compiled_sql)).await {
                Err(_) => {
                    // The connector future is dropped here, cancelling the
                    // in-flight call.
                    return Err(ExecuteError::Timeout(timeout));
                }
                Ok(Ok(mut rows)) => {
                    let snapshot = self.catalog.snapshot();
                    redact::redact(&snapshot, model_id, user, &mut rows);
                    return Ok(rows);
                }
                Ok(Err(ConnectorError::Rejected(message))) => {
                    return Err(ExecuteError::ExecutionError(message));
                }
                Ok(Err(ConnectorError::Transient(message))) => {
                    if attempt >= self.retry.max_retries {
                        return Err(ExecuteError::ConnectionFailed(message));
                    }
                    attempt += 1;
                    tracing::warn!(attempt, error = %message, "transient datasource failure, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }
    }
}
