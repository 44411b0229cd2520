//! Eager, deterministic candidate resolution.

use std::collections::BTreeMap;

use super::request::{QueryRequest, SearchResult};
use super::scoring::{similarity, thresholds, MatchKind};
use crate::catalog::{normalize, CatalogIndex, IndexedEntity};
use crate::config::SearchSettings;
use crate::error::QueryError;
use crate::model::{EntityRef, SensitivityLevel};

/// Resolves a query intent into a ranked candidate list.
///
/// The whole result is computed eagerly per call against one catalog
/// snapshot; identical (keywords, scope, snapshot) inputs always produce the
/// same ordered output.
#[derive(Debug, Clone)]
pub struct SearchResolver {
    max_candidates: usize,
    min_confidence: f64,
}

/// Candidate under construction, keyed by entity index so ties keep
/// snapshot insertion order.
#[derive(Debug)]
struct Candidate {
    kind: MatchKind,
    sim: f64,
    matched_alias: Option<String>,
}

impl SearchResolver {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            max_candidates: settings.max_candidates,
            min_confidence: settings.min_confidence,
        }
    }

    /// Rank catalog entities against the request.
    ///
    /// An empty result means nothing matched above the confidence floor; it
    /// is a normal outcome, not an error. An unknown model scope fails with
    /// `ModelNotFound`.
    pub fn search(
        &self,
        index: &CatalogIndex,
        req: &QueryRequest,
    ) -> Result<Vec<SearchResult>, QueryError> {
        req.validate()?;
        if let Some(model_id) = req.model_id {
            index.get_model(model_id)?;
        }

        let terms = query_terms(req);
        let mut candidates: BTreeMap<usize, Candidate> = BTreeMap::new();

        // Exact and alias hits come from the hash indexes.
        for term in &terms {
            for &idx in index.indexes_by_name(term) {
                offer(&mut candidates, idx, MatchKind::Exact, 1.0, None);
            }
            for &idx in index.indexes_by_alias(term) {
                let alias = resolve_alias_display(index, &index.entities()[idx], term);
                offer(&mut candidates, idx, MatchKind::Alias, 1.0, Some(alias));
            }
        }

        // Fuzzy pass over the remaining entities.
        for (idx, entity) in index.entities().iter().enumerate() {
            if candidates.contains_key(&idx) {
                continue;
            }
            let sim = best_similarity(entity, &terms);
            if sim >= thresholds::FUZZY_FLOOR {
                offer(&mut candidates, idx, MatchKind::Fuzzy, sim, None);
            }
        }

        let mut results: Vec<(SearchResult, u64)> = candidates
            .into_iter()
            .filter_map(|(idx, cand)| {
                let entity = &index.entities()[idx];
                if let Some(scope) = req.model_id {
                    if entity.model_id != scope {
                        return None;
                    }
                }
                if !req.user.can_view(entity.sensitivity) {
                    return None;
                }
                let score = cand.kind.weight() * cand.sim;
                if score < self.min_confidence {
                    return None;
                }
                let result = SearchResult {
                    entity: entity.entity,
                    model_id: entity.model_id,
                    name: entity.display_name.clone(),
                    score,
                    kind: cand.kind,
                    matched_alias: cand.matched_alias,
                    sensitivity: entity.sensitivity,
                };
                Some((result, entity.use_count))
            })
            .collect();

        // Stable sort keeps insertion order for full ties.
        results.sort_by(|(a, a_use), (b, b_use)| {
            b.kind
                .weight()
                .partial_cmp(&a.kind.weight())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal))
                .then(b_use.cmp(a_use))
        });
        results.truncate(self.max_candidates);

        Ok(results.into_iter().map(|(r, _)| r).collect())
    }

    /// If the request names an entity the caller is not cleared for, return
    /// its display name and required level so the caller can reject instead
    /// of reporting an ambiguous empty result.
    pub fn restricted_match(
        &self,
        index: &CatalogIndex,
        req: &QueryRequest,
    ) -> Option<(String, SensitivityLevel)> {
        let terms = query_terms(req);
        for term in &terms {
            let hits = index
                .indexes_by_name(term)
                .iter()
                .chain(index.indexes_by_alias(term));
            for &idx in hits {
                let entity = &index.entities()[idx];
                if !req.user.can_view(entity.sensitivity) {
                    return Some((entity.display_name.clone(), entity.sensitivity));
                }
            }
        }
        None
    }
}

/// Normalized match terms: the full keyword phrase, each keyword, and the
/// entity hint when present.
fn query_terms(req: &QueryRequest) -> Vec<String> {
    let mut terms = Vec::new();
    let full = normalize(&req.keywords);
    if !full.is_empty() {
        terms.push(full.clone());
        for word in full.split_whitespace() {
            if word != full {
                terms.push(word.to_string());
            }
        }
    }
    if let Some(hint) = &req.entity_hint {
        let hint = normalize(hint);
        if !hint.is_empty() && !terms.contains(&hint) {
            terms.push(hint);
        }
    }
    terms
}

/// Keep the strongest (kind weight, similarity) offer per entity.
fn offer(
    candidates: &mut BTreeMap<usize, Candidate>,
    idx: usize,
    kind: MatchKind,
    sim: f64,
    matched_alias: Option<String>,
) {
    let incoming = (kind.weight(), sim);
    match candidates.get(&idx) {
        Some(existing) if (existing.kind.weight(), existing.sim) >= incoming => {}
        _ => {
            candidates.insert(
                idx,
                Candidate {
                    kind,
                    sim,
                    matched_alias,
                },
            );
        }
    }
}

fn best_similarity(entity: &IndexedEntity, terms: &[String]) -> f64 {
    let mut best: f64 = 0.0;
    for term in terms {
        best = best.max(similarity(term, &entity.name));
        for alias in &entity.aliases {
            best = best.max(similarity(term, alias));
        }
    }
    best
}

/// Recover the original casing of a matched dimension value alias, falling
/// back to the normalized term.
fn resolve_alias_display(index: &CatalogIndex, entity: &IndexedEntity, term: &str) -> String {
    if let EntityRef::Dimension(id) = entity.entity {
        if let Some(alias) = index.matching_value_alias(id, term) {
            return alias;
        }
    }
    term.to_string()
}
