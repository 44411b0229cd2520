//! # semql
//!
//! A semantic-layer query engine that resolves structured chat intents
//! against versioned business metadata and executes bounded, injection-safe
//! SQL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │           Query intent (from the external NLU)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [search]
//! ┌─────────────────────────────────────────────────────────┐
//! │      Ranked candidates (over the catalog snapshot)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql: bind + compile]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Compiled SQL (single statement, 1000-row cap)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [executor]
//! ┌─────────────────────────────────────────────────────────┐
//! │      Redacted rows (sensitivity post-filter applied)     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`catalog::SemanticCatalog`] is the only shared state: a read-mostly,
//! copy-on-write index over metadata snapshots supplied by the external
//! administrative collaborator. Everything else is request-scoped.

pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod model;
pub mod search;
pub mod service;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::catalog::{CatalogError, MetadataSnapshot, SemanticCatalog};
    pub use crate::config::Settings;
    pub use crate::error::{PipelineResult, QueryError};
    pub use crate::executor::{
        ConnectorError, DatasourceConnector, ExecuteError, MockConnector, QueryExecutor, RowSet,
        Value,
    };
    pub use crate::model::{
        Datasource, DimValueMap, Dimension, Metric, Model, SensitivityLevel, UserContext,
    };
    pub use crate::search::{MatchKind, QueryRequest, SearchResolver, SearchResult};
    pub use crate::service::{QueryService, SqlExecuteReq};
    pub use crate::sql::{bind, compile, SqlVariable, VariableType, MAX_RESULT_ROWS};
}

pub use catalog::SemanticCatalog;
pub use error::QueryError;
pub use service::{QueryService, SqlExecuteReq};
