//! Match-kind weights and lexical similarity for candidate ranking.
//!
//! Exact name hits outrank alias hits, which outrank fuzzy hits; within a
//! kind, lexical similarity decides, then the entity's usage hint.

use serde::Serialize;

/// How a candidate matched the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Alias,
    Fuzzy,
}

impl MatchKind {
    /// Base weight applied to the lexical similarity score.
    pub fn weight(&self) -> f64 {
        match self {
            MatchKind::Exact => weights::EXACT,
            MatchKind::Alias => weights::ALIAS,
            MatchKind::Fuzzy => weights::FUZZY,
        }
    }
}

pub mod weights {
    pub const EXACT: f64 = 1.0;
    pub const ALIAS: f64 = 0.85;
    pub const FUZZY: f64 = 0.6;
}

pub mod thresholds {
    /// Fuzzy candidates below this similarity are not generated at all.
    pub const FUZZY_FLOOR: f64 = 0.5;
}

/// Normalized lexical similarity in `[0, 1]`.
///
/// Edit-distance based, with a floor for substring containment so that
/// "order" still matches "order amount" reasonably well. Inputs are assumed
/// already normalized (trimmed, case-folded).
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let edit = 1.0 - levenshtein(a, b) as f64 / max_len as f64;

    if a.contains(b) || b.contains(a) {
        let min_len = a.chars().count().min(b.chars().count());
        let containment = 0.5 + 0.5 * min_len as f64 / max_len as f64;
        edit.max(containment)
    } else {
        edit
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
