// src/model/metric.rs
use serde::{Deserialize, Serialize};

use crate::model::types::SensitivityLevel;

/// A numeric, aggregatable attribute of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: u64,
    /// Owning model. Validated against the snapshot's model list.
    pub model_id: u64,
    pub name: String,
    pub biz_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Aggregation expression over the model's datasources. May contain
    /// `${name}` placeholders resolved by the variable binder.
    pub expr: String,
    #[serde(default)]
    pub sensitivity: SensitivityLevel,
    #[serde(default)]
    pub use_count: u64,
}
