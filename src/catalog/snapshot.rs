//! Metadata snapshot ingestion and structural validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::{CatalogError, CatalogResult};
use crate::model::{Dimension, Metric, Model};

/// A full description of the semantic metadata, as produced by the external
/// administrative collaborator.
///
/// A snapshot is inert data until it passes [`MetadataSnapshot::validate`];
/// only validated snapshots are swapped into the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    #[serde(default)]
    pub models: Vec<Model>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl MetadataSnapshot {
    /// Parse a snapshot from its JSON wire form.
    pub fn from_json(raw: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Check structural integrity: unique ids, no dangling model references,
    /// non-blank names.
    ///
    /// Returns `InvalidMetadata` naming the first violation found. The caller
    /// must not activate a snapshot that fails this check.
    pub fn validate(&self) -> CatalogResult<()> {
        let mut model_ids = HashSet::new();
        for model in &self.models {
            if !model_ids.insert(model.id) {
                return Err(CatalogError::InvalidMetadata(format!(
                    "duplicate model id {}",
                    model.id
                )));
            }
            if model.name.trim().is_empty() {
                return Err(CatalogError::InvalidMetadata(format!(
                    "model {} has a blank name",
                    model.id
                )));
            }
            if model.primary_datasource.table_ref.trim().is_empty() {
                return Err(CatalogError::InvalidMetadata(format!(
                    "model '{}' has no primary datasource table",
                    model.name
                )));
            }
        }

        let mut dimension_ids = HashSet::new();
        for dim in &self.dimensions {
            if !dimension_ids.insert(dim.id) {
                return Err(CatalogError::InvalidMetadata(format!(
                    "duplicate dimension id {}",
                    dim.id
                )));
            }
            if !model_ids.contains(&dim.model_id) {
                return Err(CatalogError::InvalidMetadata(format!(
                    "dimension '{}' references missing model {}",
                    dim.name, dim.model_id
                )));
            }
        }

        let mut metric_ids = HashSet::new();
        for metric in &self.metrics {
            if !metric_ids.insert(metric.id) {
                return Err(CatalogError::InvalidMetadata(format!(
                    "duplicate metric id {}",
                    metric.id
                )));
            }
            if !model_ids.contains(&metric.model_id) {
                return Err(CatalogError::InvalidMetadata(format!(
                    "metric '{}' references missing model {}",
                    metric.name, metric.model_id
                )));
            }
            if metric.expr.trim().is_empty() {
                return Err(CatalogError::InvalidMetadata(format!(
                    "metric '{}' has an empty expression",
                    metric.name
                )));
            }
        }

        Ok(())
    }
}
