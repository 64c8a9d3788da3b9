// crates/branchfinder-core/src/history.rs
use crate::model::{BranchRecord, MapPoint, Place};
use serde::{Deserialize, Serialize};

/// How a query was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// The top dataset match was accepted in place of the query.
    AutoCorrected,
    /// Several dataset rows came close; the user has to pick one.
    Suggestions,
    /// No dataset match, the remote service had results.
    Remote,
    /// Neither the dataset nor the remote service found anything.
    NoResults,
}

/// A ranked "did you mean" entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub score: f64,
}

/// Rows attached to an outcome. Dataset rows and remote places never mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutcomePayload {
    /// Dataset rows plus whatever points their addresses geocoded to.
    Branches {
        rows: Vec<BranchRecord>,
        points: Vec<MapPoint>,
    },
    /// Remote hits; each one already carries its coordinates.
    Places(Vec<Place>),
}

/// The recorded result of one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The effective query (the corrected text after an auto-correct).
    pub query: String,
    pub kind: OutcomeKind,
    pub status: String,
    /// Set for auto-corrections, e.g. `Auto-corrected to: ... (confidence: 100%)`.
    pub note: Option<String>,
    pub suggestions: Vec<Suggestion>,
    pub payload: Option<OutcomePayload>,
}

impl SearchOutcome {
    pub fn rows(&self) -> &[BranchRecord] {
        match &self.payload {
            Some(OutcomePayload::Branches { rows, .. }) => rows,
            _ => &[],
        }
    }

    pub fn places(&self) -> &[Place] {
        match &self.payload {
            Some(OutcomePayload::Places(p)) => p,
            _ => &[],
        }
    }

    /// Points to put on a map: geocoded branches or the remote places.
    pub fn map_points(&self) -> Vec<MapPoint> {
        match &self.payload {
            Some(OutcomePayload::Branches { points, .. }) => points.clone(),
            Some(OutcomePayload::Places(p)) => p.iter().map(MapPoint::from).collect(),
            None => Vec::new(),
        }
    }
}

/// Append-only log of outcomes for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: Vec<SearchOutcome>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: SearchOutcome) -> &SearchOutcome {
        self.entries.push(outcome);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[SearchOutcome] {
        &self.entries
    }

    pub fn last(&self) -> Option<&SearchOutcome> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchOutcome> {
        self.entries.iter()
    }

    /// Entries newest first, paired with their 1-based position in entry order.
    pub fn iter_recent_first(&self) -> impl Iterator<Item = (usize, &SearchOutcome)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .map(|(i, o)| (i + 1, o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(q: &str) -> SearchOutcome {
        SearchOutcome {
            query: q.into(),
            kind: OutcomeKind::NoResults,
            status: format!("No results found for: {q}"),
            note: None,
            suggestions: Vec::new(),
            payload: None,
        }
    }

    #[test]
    fn append_then_clear() {
        let mut h = History::new();
        for q in ["a", "b", "c"] {
            h.push(outcome(q));
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.entries()[0].query, "a");
        assert_eq!(h.last().unwrap().query, "c");
        h.clear();
        assert!(h.is_empty());
    }

    #[test]
    fn recent_first_keeps_positions() {
        let mut h = History::new();
        h.push(outcome("first"));
        h.push(outcome("second"));
        let order: Vec<_> = h.iter_recent_first().map(|(i, o)| (i, o.query.as_str())).collect();
        assert_eq!(order, vec![(2, "second"), (1, "first")]);
    }

    #[test]
    fn places_double_as_map_points() {
        let mut o = outcome("ikeja");
        o.payload = Some(OutcomePayload::Places(vec![Place {
            label: "Ikeja, Lagos".into(),
            latitude: 6.6,
            longitude: 3.35,
        }]));
        assert!(o.rows().is_empty());
        assert_eq!(o.map_points()[0].label, "Ikeja, Lagos");
    }
}
