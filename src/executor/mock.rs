//! Scriptable connector for tests and headless runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::connector::DatasourceConnector;
use super::error::ConnectorError;
use super::result::{ColumnInfo, RowSet, Value};

/// A connector that returns a canned result, optionally after a number of
/// scripted transient failures or an artificial delay.
#[derive(Debug, Default)]
pub struct MockConnector {
    result: RowSet,
    transient_failures: AtomicUsize,
    reject_with: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_sql: Mutex<Option<String>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned result returned on success.
    pub fn with_result(mut self, result: RowSet) -> Self {
        self.result = result;
        self
    }

    /// One column of text values, for quick test setup.
    pub fn with_text_column(self, name: &str, values: &[&str]) -> Self {
        let columns = vec![ColumnInfo::new(name, "text")];
        let rows = values.iter().map(|v| vec![Value::text(*v)]).collect();
        self.with_result(RowSet::new(columns, rows))
    }

    /// Fail the first `n` calls with a transient error.
    pub fn failing_transiently(self, n: usize) -> Self {
        self.transient_failures.store(n, Ordering::SeqCst);
        self
    }

    /// Reject every call, as a datasource syntax/semantic error would.
    pub fn rejecting(mut self, message: &str) -> Self {
        self.reject_with = Some(message.to_string());
        self
    }

    /// Sleep before answering, to exercise timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of execute calls observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The statement text from the most recent call.
    pub fn last_sql(&self) -> Option<String> {
        self.last_sql
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl DatasourceConnector for MockConnector {
    async fn execute(&self, sql: &str) -> Result<RowSet, ConnectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_sql.lock().unwrap_or_else(|e| e.into_inner()) = Some(sql.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.reject_with {
            return Err(ConnectorError::Rejected(message.clone()));
        }

        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(ConnectorError::Transient("connection reset".to_string()));
        }

        Ok(self.result.clone())
    }
}
