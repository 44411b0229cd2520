//! Immutable search index built from a validated snapshot.
//!
//! The index is built once per refresh and never mutated afterwards; the
//! catalog shares it with readers behind an `Arc`. Entities keep their
//! snapshot insertion order (models, then dimensions, then metrics) so that
//! ranking tie-breaks are deterministic across identical snapshots.

use std::collections::HashMap;

use super::error::{CatalogError, CatalogResult};
use super::snapshot::MetadataSnapshot;
use crate::model::{Dimension, EntityRef, Metric, Model, SensitivityLevel};

/// Case-fold and trim a name or alias for index lookup.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// A single searchable entity, flattened for matching.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEntity {
    pub entity: EntityRef,
    /// Owning model id; for models this is the model's own id.
    pub model_id: u64,
    /// Normalized primary name.
    pub name: String,
    /// Display name as declared in the snapshot.
    pub display_name: String,
    /// Normalized aliases, including dimension value aliases.
    pub aliases: Vec<String>,
    pub sensitivity: SensitivityLevel,
    pub use_count: u64,
}

/// Read-only index over one metadata snapshot.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    models: HashMap<u64, Model>,
    dimensions: HashMap<u64, Dimension>,
    metrics: HashMap<u64, Metric>,
    entities: Vec<IndexedEntity>,
    by_name: HashMap<String, Vec<usize>>,
    by_alias: HashMap<String, Vec<usize>>,
    by_model: HashMap<u64, Vec<usize>>,
}

impl CatalogIndex {
    /// Validate a snapshot and build the index from it.
    pub fn build(snapshot: MetadataSnapshot) -> CatalogResult<Self> {
        snapshot.validate()?;

        let mut index = CatalogIndex::default();

        for model in &snapshot.models {
            let entry = IndexedEntity {
                entity: EntityRef::Model(model.id),
                model_id: model.id,
                name: normalize(&model.name),
                display_name: model.name.clone(),
                aliases: model.aliases.iter().map(|a| normalize(a)).collect(),
                sensitivity: SensitivityLevel::Low,
                use_count: 0,
            };
            index.push_entity(entry);
        }
        for dim in &snapshot.dimensions {
            let mut aliases: Vec<String> = dim.aliases.iter().map(|a| normalize(a)).collect();
            for value_map in &dim.value_aliases {
                aliases.extend(value_map.aliases.iter().map(|a| normalize(a)));
            }
            let entry = IndexedEntity {
                entity: EntityRef::Dimension(dim.id),
                model_id: dim.model_id,
                name: normalize(&dim.name),
                display_name: dim.name.clone(),
                aliases,
                sensitivity: dim.sensitivity,
                use_count: dim.use_count,
            };
            index.push_entity(entry);
        }
        for metric in &snapshot.metrics {
            let entry = IndexedEntity {
                entity: EntityRef::Metric(metric.id),
                model_id: metric.model_id,
                name: normalize(&metric.name),
                display_name: metric.name.clone(),
                aliases: metric.aliases.iter().map(|a| normalize(a)).collect(),
                sensitivity: metric.sensitivity,
                use_count: metric.use_count,
            };
            index.push_entity(entry);
        }

        index.models = snapshot.models.into_iter().map(|m| (m.id, m)).collect();
        index.dimensions = snapshot.dimensions.into_iter().map(|d| (d.id, d)).collect();
        index.metrics = snapshot.metrics.into_iter().map(|m| (m.id, m)).collect();

        Ok(index)
    }

    fn push_entity(&mut self, entity: IndexedEntity) {
        let idx = self.entities.len();
        self.by_name.entry(entity.name.clone()).or_default().push(idx);
        for alias in &entity.aliases {
            self.by_alias.entry(alias.clone()).or_default().push(idx);
        }
        self.by_model.entry(entity.model_id).or_default().push(idx);
        self.entities.push(entity);
    }

    /// All entities in snapshot insertion order.
    pub fn entities(&self) -> &[IndexedEntity] {
        &self.entities
    }

    /// Entity indexes whose normalized name equals `name`.
    pub fn indexes_by_name(&self, name: &str) -> &[usize] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entity indexes carrying `alias` as a normalized alias.
    pub fn indexes_by_alias(&self, alias: &str) -> &[usize] {
        self.by_alias.get(alias).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_model(&self, id: u64) -> CatalogResult<&Model> {
        self.models.get(&id).ok_or(CatalogError::ModelNotFound(id))
    }

    pub fn get_dimension(&self, id: u64) -> Option<&Dimension> {
        self.dimensions.get(&id)
    }

    pub fn get_metric(&self, id: u64) -> Option<&Metric> {
        self.metrics.get(&id)
    }

    /// Sensitivity of the dimension or metric backing a result column, if the
    /// column name matches one by name or biz_name within the model.
    ///
    /// Used by the executor's post-filter; raw SQL can reference columns the
    /// search path never saw. Several declarations may share a normalized
    /// name; the strictest one wins, so an ambiguous column name can never
    /// loosen redaction.
    pub fn column_sensitivity(&self, model_id: u64, column: &str) -> Option<SensitivityLevel> {
        let column = normalize(column);
        let dims = self
            .dimensions
            .values()
            .filter(|d| d.model_id == model_id)
            .filter(|d| normalize(&d.biz_name) == column || normalize(&d.name) == column)
            .map(|d| d.sensitivity);
        let metrics = self
            .metrics
            .values()
            .filter(|m| m.model_id == model_id)
            .filter(|m| normalize(&m.biz_name) == column || normalize(&m.name) == column)
            .map(|m| m.sensitivity);
        dims.chain(metrics).max()
    }

    /// For a dimension hit on a value alias, resolve which alias matched.
    pub fn matching_value_alias(&self, dim_id: u64, alias: &str) -> Option<String> {
        let dim = self.dimensions.get(&dim_id)?;
        dim.value_aliases
            .iter()
            .flat_map(|vm| vm.aliases.iter())
            .find(|a| normalize(a) == alias)
            .cloned()
    }
}
