// crates/branchfinder-core/src/matcher.rs

//! # Query Matcher
//!
//! Ranks dataset rows against a free-text query. Every row is scored twice:
//! against its whole normalized text and against each of its cell values.
//! The better of the two wins, so `"lagos main"` scores 100 against a row
//! whose branch name is `Lagos Main` even though the full row text is longer.

use crate::model::{BranchRecord, BranchTable};
use crate::text::normalize_query;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

pub const DEFAULT_THRESHOLD: f64 = 60.0;
pub const DEFAULT_LIMIT: usize = 5;

/// One scored row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Normalized text of the matched row.
    pub text: String,
    /// Similarity in `0.0..=100.0`.
    pub score: f64,
    /// Index of the row in the [`BranchTable`].
    pub index: usize,
}

/// Candidates plus the rows they point at, in the same order.
#[derive(Clone, Debug, Default)]
pub struct MatchResult<'a> {
    pub candidates: Vec<MatchCandidate>,
    pub rows: Vec<&'a BranchRecord>,
}

impl MatchResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn top(&self) -> Option<&MatchCandidate> {
        self.candidates.first()
    }

    pub fn top_score(&self) -> Option<f64> {
        self.top().map(|c| c.score)
    }
}

/// Similarity of two already-normalized strings, scaled to `0..=100`.
pub fn similarity(a: &str, b: &str) -> f64 {
    (strsim::normalized_levenshtein(a, b) * 100.0).clamp(0.0, 100.0)
}

/// Scores a normalized query against one row, given the row's precomputed
/// text key and cell keys.
pub fn score_row(query: &str, key: &str, cells: &[String]) -> f64 {
    cells
        .iter()
        .map(|cell| similarity(query, cell))
        .fold(similarity(query, key), f64::max)
}

/// Returns up to `limit` rows scoring at least `threshold`, best first.
///
/// Ties keep the original row order. An absent table, a blank query or a
/// table with nothing above the threshold all give an empty result.
pub fn search<'a>(
    table: Option<&'a BranchTable>,
    query: &str,
    threshold: f64,
    limit: usize,
) -> MatchResult<'a> {
    let Some(table) = table else {
        return MatchResult::default();
    };
    let q = normalize_query(query);
    if q.is_empty() || limit == 0 {
        return MatchResult::default();
    }

    let mut candidates: Vec<MatchCandidate> = table
        .keys
        .iter()
        .zip(table.field_keys.iter())
        .enumerate()
        .filter_map(|(index, (key, cells))| {
            let score = score_row(&q, key, cells);
            (score >= threshold).then(|| MatchCandidate {
                text: key.clone(),
                score,
                index,
            })
        })
        .collect();

    // Stable sort keeps row order among equal scores.
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates.truncate(limit);

    debug!(
        query = %q,
        hits = candidates.len(),
        top = ?candidates.first().map(|c| c.score),
        "dataset match"
    );

    let rows = candidates
        .iter()
        .filter_map(|c| table.row(c.index))
        .collect();

    MatchResult { candidates, rows }
}
