// src/model/types.rs
use serde::{Deserialize, Serialize};

/// Access-control tier attached to every dimension and metric.
///
/// Levels are ordered: a user context with `Medium` clearance can see `Low`
/// and `Medium` entities but never `High` ones. `High` entities are dropped
/// from search results and masked in execution output unless the requesting
/// context carries `High` clearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityLevel {
    #[default]
    Low,
    Medium,
    High,
}

/// Reference to a catalog entity by kind and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityRef {
    Model(u64),
    Dimension(u64),
    Metric(u64),
}

impl EntityRef {
    pub fn id(&self) -> u64 {
        match *self {
            EntityRef::Model(id) | EntityRef::Dimension(id) | EntityRef::Metric(id) => id,
        }
    }
}
