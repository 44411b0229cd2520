//! The seam between the pipeline and the physical datasource driver.

use async_trait::async_trait;

use super::error::ConnectorError;
use super::result::RowSet;

/// Abstracts the external datasource driver: run one statement, get rows.
///
/// Implementations must be cancellation-safe: the executor drops the
/// in-flight future when the caller's deadline expires.
#[async_trait]
pub trait DatasourceConnector: Send + Sync {
    /// Execute one compiled statement and return its rows.
    async fn execute(&self, sql: &str) -> Result<RowSet, ConnectorError>;
}
