// crates/branchfinder-core/src/finder.rs

//! # Finder
//!
//! Ties the pieces together for one query:
//!
//! 1. [`matcher::search`] ranks the dataset rows,
//! 2. [`Decision::decide`] looks at the best score,
//! 3. a confident match is accepted (and its branches geocoded for the map),
//!    an ambiguous one becomes a list of suggestions, and a miss goes to the
//!    remote service,
//! 4. the result is returned as a [`SearchOutcome`], ready for a [`History`].

use crate::config::FinderConfig;
use crate::history::{History, OutcomeKind, OutcomePayload, SearchOutcome, Suggestion};
use crate::matcher::{self, MatchResult};
use crate::model::{BranchRecord, BranchTable, MapPoint};
use crate::policy::Decision;
use crate::remote::{remote_search, Geocoder};
use tracing::{debug, info};

/// Shared, read-only search context. One per process.
pub struct Finder<G> {
    table: Option<BranchTable>,
    geocoder: G,
    config: FinderConfig,
}

impl<G: Geocoder> Finder<G> {
    pub fn new(table: Option<BranchTable>, geocoder: G, config: FinderConfig) -> Self {
        Self {
            table,
            geocoder,
            config,
        }
    }

    pub fn table(&self) -> Option<&BranchTable> {
        self.table.as_ref()
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Country name for messages, e.g. `nigeria` -> `Nigeria`.
    pub fn country_label(&self) -> String {
        let mut chars = self.config.country.trim().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Ranks the dataset against `query` with the configured threshold and limit.
    pub fn match_query(&self, query: &str) -> MatchResult<'_> {
        matcher::search(
            self.table.as_ref(),
            query,
            self.config.threshold,
            self.config.limit,
        )
    }

    /// Runs the whole flow for one query. Never fails: every path ends in an outcome.
    pub fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        let matches = self.match_query(query);
        let decision = Decision::decide(matches.top_score(), &self.config.policy());
        debug!(query, ?decision, "decision");

        match (decision, matches.top()) {
            (Decision::Confident, Some(top)) => {
                let corrected = top.text.clone();
                let rows: Vec<BranchRecord> = matches.rows.iter().map(|r| (*r).clone()).collect();
                let points = if self.config.geocode_branches {
                    self.geocode_rows(&rows)
                } else {
                    Vec::new()
                };
                info!(query, corrected = %corrected, rows = rows.len(), "auto-corrected");
                SearchOutcome {
                    note: Some(format!(
                        "Auto-corrected to: {} (confidence: {:.0}%)",
                        corrected, top.score
                    )),
                    status: format!("Branches found in dataset for: {corrected}"),
                    query: corrected,
                    kind: OutcomeKind::AutoCorrected,
                    suggestions: Vec::new(),
                    payload: Some(OutcomePayload::Branches { rows, points }),
                }
            }
            (Decision::Ambiguous, _) => SearchOutcome {
                query: query.to_string(),
                kind: OutcomeKind::Suggestions,
                status: "Did you mean one of these?".into(),
                note: None,
                suggestions: matches
                    .candidates
                    .iter()
                    .map(|c| Suggestion {
                        text: c.text.clone(),
                        score: c.score,
                    })
                    .collect(),
                payload: None,
            },
            _ => self.search_remote(query),
        }
    }

    fn search_remote(&self, query: &str) -> SearchOutcome {
        let places = remote_search(&self.geocoder, query, self.config.remote_limit);
        let country = self.country_label();
        if places.is_empty() {
            SearchOutcome {
                query: query.to_string(),
                kind: OutcomeKind::NoResults,
                status: format!("No results found in {country} for: {query}"),
                note: None,
                suggestions: Vec::new(),
                payload: None,
            }
        } else {
            SearchOutcome {
                query: query.to_string(),
                kind: OutcomeKind::Remote,
                status: format!("No dataset match. Results from OSM {country} for: {query}"),
                note: None,
                suggestions: Vec::new(),
                payload: Some(OutcomePayload::Places(places)),
            }
        }
    }

    /// One geocoder call per row; rows that fail to resolve are left off the map.
    fn geocode_rows(&self, rows: &[BranchRecord]) -> Vec<MapPoint> {
        rows.iter()
            .filter_map(|row| {
                self.geocoder
                    .geocode(&row.geocode_query())
                    .map(|p| MapPoint {
                        label: row.name().to_string(),
                        ..p
                    })
            })
            .collect()
    }
}

/// Per-user state: the history of one console run or one browser session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub history: History,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches and records exactly one outcome.
    pub fn run_query<G: Geocoder>(&mut self, finder: &Finder<G>, query: &str) -> &SearchOutcome {
        let outcome = finder.search(query);
        self.history.push(outcome)
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}
