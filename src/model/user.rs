// src/model/user.rs
use serde::{Deserialize, Serialize};

use crate::model::types::SensitivityLevel;

/// Opaque user identity plus the sensitivity clearance it carries.
///
/// Supplied per request by the external identity collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub name: String,
    #[serde(default)]
    pub clearance: SensitivityLevel,
}

impl UserContext {
    pub fn new(name: impl Into<String>, clearance: SensitivityLevel) -> Self {
        Self {
            name: name.into(),
            clearance,
        }
    }

    /// Whether this context may see entities at the given sensitivity level.
    pub fn can_view(&self, level: SensitivityLevel) -> bool {
        level <= self.clearance
    }
}
