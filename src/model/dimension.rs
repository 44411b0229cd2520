// src/model/dimension.rs
use serde::{Deserialize, Serialize};

use crate::model::types::SensitivityLevel;

/// A categorical attribute of a model, usable for grouping and filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub id: u64,
    /// Owning model. Validated against the snapshot's model list.
    pub model_id: u64,
    pub name: String,
    /// Column name in the owning model's datasource.
    pub biz_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Value-to-alias mappings (e.g. country code to display name), used for
    /// both search matching and rendering.
    #[serde(default)]
    pub value_aliases: Vec<DimValueMap>,
    #[serde(default)]
    pub sensitivity: SensitivityLevel,
    /// Usage hint for ranking; higher means queried more often.
    #[serde(default)]
    pub use_count: u64,
}

/// Maps a stored dimension value to the aliases users know it by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimValueMap {
    pub value: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}
