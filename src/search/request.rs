// src/search/request.rs
use serde::{Deserialize, Serialize};

use super::scoring::MatchKind;
use crate::error::QueryError;
use crate::model::{EntityRef, SensitivityLevel, UserContext};

/// Structured query intent, as extracted from a chat turn by the external
/// NLU collaborator.
///
/// Field constraints are checked explicitly before any resolution runs;
/// there is no annotation-driven binding magic here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Free-text keywords describing the information need.
    pub keywords: String,
    /// Optional explicit model scope. Must reference an existing model.
    #[serde(default)]
    pub model_id: Option<u64>,
    /// Optional hint naming a specific entity the user mentioned.
    #[serde(default)]
    pub entity_hint: Option<String>,
    pub user: UserContext,
}

impl QueryRequest {
    pub fn new(keywords: impl Into<String>, user: UserContext) -> Self {
        Self {
            keywords: keywords.into(),
            model_id: None,
            entity_hint: None,
            user,
        }
    }

    pub fn with_model_scope(mut self, model_id: u64) -> Self {
        self.model_id = Some(model_id);
        self
    }

    pub fn with_entity_hint(mut self, hint: impl Into<String>) -> Self {
        self.entity_hint = Some(hint.into());
        self
    }

    /// A request must carry non-empty keywords or an explicit entity hint.
    pub fn validate(&self) -> Result<(), QueryError> {
        let has_keywords = !self.keywords.trim().is_empty();
        let has_hint = self
            .entity_hint
            .as_deref()
            .is_some_and(|h| !h.trim().is_empty());
        if !has_keywords && !has_hint {
            return Err(QueryError::InvalidRequest(
                "request must carry keywords or an entity hint".to_string(),
            ));
        }
        Ok(())
    }
}

/// One ranked candidate from the resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub entity: EntityRef,
    /// Owning model id, for scoping the downstream query.
    pub model_id: u64,
    /// Display name of the matched entity.
    pub name: String,
    /// Confidence score in `[0, 1]`.
    pub score: f64,
    pub kind: MatchKind,
    /// The alias that matched, when the hit came through an alias or a
    /// dimension value alias.
    pub matched_alias: Option<String>,
    /// Carried through so downstream filtering need not re-resolve it.
    pub sensitivity: SensitivityLevel,
}
