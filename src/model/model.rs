// src/model/model.rs
use serde::{Deserialize, Serialize};

/// A business domain grouping datasources, dimensions, and metrics.
///
/// Every model owns exactly one primary datasource; additional datasources
/// may be joined to it via [`JoinedDatasource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: u64,
    pub name: String,
    /// Technical name used in generated SQL.
    pub biz_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub primary_datasource: Datasource,
    #[serde(default)]
    pub joined_datasources: Vec<JoinedDatasource>,
}

/// A queryable physical table or view reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datasource {
    pub name: String,
    /// Fully qualified table/view reference (e.g. `dw.fact_orders`).
    pub table_ref: String,
}

/// A secondary datasource joined to the model's primary datasource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedDatasource {
    pub datasource: Datasource,
    #[serde(default)]
    pub join_type: JoinType,
    /// Join key column on the primary datasource.
    pub left_key: String,
    /// Join key column on this datasource.
    pub right_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    #[default]
    Inner,
    Left,
}
