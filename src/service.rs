//! Request-scoped pipeline facade: resolve → bind → compile → execute.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::catalog::SemanticCatalog;
use crate::config::Settings;
use crate::error::{PipelineResult, QueryError};
use crate::executor::{DatasourceConnector, QueryExecutor, RetryPolicy, RowSet};
use crate::model::{EntityRef, UserContext};
use crate::search::{QueryRequest, SearchResolver, SearchResult};
use crate::sql::{bind, compile, render_resolved, ResolvedQuery, SqlVariable};

/// Pre-authored SQL execution request (the non-NL path).
#[derive(Debug, Clone, Deserialize)]
pub struct SqlExecuteReq {
    pub model_id: u64,
    pub sql: String,
    #[serde(default)]
    pub variables: Vec<SqlVariable>,
}

/// Ties the catalog, resolver, compiler, and executor together.
///
/// Each call is an isolated, request-scoped computation over one catalog
/// snapshot; the catalog is the only shared state, and it is read-only here.
pub struct QueryService {
    catalog: Arc<SemanticCatalog>,
    resolver: SearchResolver,
    executor: QueryExecutor,
    timeout: Duration,
}

impl QueryService {
    pub fn new(
        catalog: Arc<SemanticCatalog>,
        connector: Arc<dyn DatasourceConnector>,
        settings: Settings,
    ) -> Self {
        let resolver = SearchResolver::new(&settings.search);
        let executor = QueryExecutor::new(
            connector,
            Arc::clone(&catalog),
            RetryPolicy::from_settings(&settings.execute),
        );
        Self {
            catalog,
            resolver,
            executor,
            timeout: settings.execute.timeout(),
        }
    }

    /// Rank candidate entities for a query intent.
    pub fn search(&self, req: &QueryRequest) -> PipelineResult<Vec<SearchResult>> {
        let snapshot = self.catalog.snapshot();
        self.resolver.search(&snapshot, req)
    }

    /// Execute pre-authored SQL against a known model: bind variables,
    /// compile with the row bound, dispatch, and post-filter.
    pub async fn execute_sql(
        &self,
        req: &SqlExecuteReq,
        user: &UserContext,
    ) -> PipelineResult<RowSet> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("execute_sql", %request_id, model_id = req.model_id);

        async {
            let snapshot = self.catalog.snapshot();
            snapshot.get_model(req.model_id)?;

            let bound = bind(&req.sql, &req.variables)?;
            let compiled = compile(&bound)?;
            tracing::debug!(sql = %compiled, "compiled statement");

            let rows = self
                .executor
                .execute(&compiled, req.model_id, user, self.timeout)
                .await?;
            Ok(rows)
        }
        .instrument(span)
        .await
    }

    /// Full NL-derived path: resolve the intent, take the best candidate,
    /// compile a semantic query for it, and execute.
    ///
    /// Returns `Ok(None)` when nothing matched above the confidence floor,
    /// unless the request named an entity the caller is not cleared for, in
    /// which case it rejects with `PermissionDenied`.
    pub async fn query(&self, req: &QueryRequest) -> PipelineResult<Option<RowSet>> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("query", %request_id, user = %req.user.name);

        async {
            let snapshot = self.catalog.snapshot();
            let results = self.resolver.search(&snapshot, req)?;

            let Some(top) = results.first() else {
                if let Some((entity, required)) = self.resolver.restricted_match(&snapshot, req) {
                    return Err(QueryError::PermissionDenied { entity, required });
                }
                return Ok(None);
            };
            tracing::debug!(entity = %top.name, score = top.score, "resolved top candidate");

            let resolved = self.resolve_query(&snapshot, top)?;
            let sql = render_resolved(&snapshot, &resolved)?;
            let compiled = compile(&sql)?;

            let rows = self
                .executor
                .execute(&compiled, resolved.model_id, &req.user, self.timeout)
                .await?;
            Ok(Some(rows))
        }
        .instrument(span)
        .await
    }

    /// Turn the winning candidate into a projectable semantic query.
    fn resolve_query(
        &self,
        snapshot: &crate::catalog::CatalogIndex,
        top: &SearchResult,
    ) -> PipelineResult<ResolvedQuery> {
        match top.entity {
            EntityRef::Model(id) => Ok(ResolvedQuery {
                model_id: id,
                ..Default::default()
            }),
            EntityRef::Dimension(id) => {
                let dim = snapshot.get_dimension(id).ok_or_else(|| {
                    QueryError::InvalidRequest(format!("stale dimension reference {id}"))
                })?;
                Ok(ResolvedQuery {
                    model_id: dim.model_id,
                    dimensions: vec![dim.biz_name.clone()],
                    metrics: vec![("cnt".to_string(), "COUNT(1)".to_string())],
                })
            }
            EntityRef::Metric(id) => {
                let metric = snapshot.get_metric(id).ok_or_else(|| {
                    QueryError::InvalidRequest(format!("stale metric reference {id}"))
                })?;
                // The NL path supplies no variables, so a metric expression
                // with placeholders surfaces as UnboundVariable here.
                let expr = bind(&metric.expr, &[])?;
                Ok(ResolvedQuery {
                    model_id: metric.model_id,
                    dimensions: vec![],
                    metrics: vec![(metric.biz_name.clone(), expr)],
                })
            }
        }
    }
}
