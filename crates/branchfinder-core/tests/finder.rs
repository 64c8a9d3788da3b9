use branchfinder_core::prelude::*;
use branchfinder_core::Suggestion;
use std::cell::RefCell;
use std::io::Write;

/// In-memory geocoder: answers from a fixed list and records every call.
#[derive(Default)]
struct FakeGeocoder {
    places: Vec<Place>,
    fail: bool,
    calls: RefCell<Vec<(String, usize)>>,
}

impl FakeGeocoder {
    fn with(places: Vec<Place>) -> Self {
        Self {
            places,
            ..Self::default()
        }
    }

    fn down() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Geocoder for FakeGeocoder {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>> {
        self.calls.borrow_mut().push((query.to_string(), limit));
        if self.fail {
            return Err(FinderError::InvalidData("network unreachable".into()));
        }
        Ok(self.places.iter().take(limit).cloned().collect())
    }
}

const CSV: &str = "\
BRANCH NAME,BRANCH ADDRESS,STATE,COUNTRY
Lagos Main,57 Marina,Lagos,Nigeria
Ikeja,Obafemi Awolowo Way,Lagos,Nigeria
Kano Road,Bello Road,Kano,Nigeria
Accra Central,Independence Ave,Greater Accra,Ghana
";

fn table() -> BranchTable {
    BranchTable::from_reader(CSV.as_bytes(), "nigeria").unwrap()
}

fn place(label: &str) -> Place {
    Place {
        label: label.into(),
        latitude: 6.45,
        longitude: 3.39,
    }
}

#[test]
fn exact_branch_name_is_auto_corrected_with_full_confidence() {
    let finder = Finder::new(Some(table()), FakeGeocoder::with(vec![place("Marina")]), FinderConfig::default());
    let mut session = Session::new();

    let outcome = session.run_query(&finder, "lagos main").clone();

    assert_eq!(outcome.kind, OutcomeKind::AutoCorrected);
    assert_eq!(outcome.query, "lagos main 57 marina lagos nigeria");
    assert_eq!(
        outcome.note.as_deref(),
        Some("Auto-corrected to: lagos main 57 marina lagos nigeria (confidence: 100%)")
    );
    assert_eq!(outcome.rows()[0].name(), "Lagos Main");
    assert!(outcome.places().is_empty());
    assert_eq!(session.history.len(), 1);
}

#[test]
fn auto_corrected_rows_are_geocoded_one_call_each() {
    let geocoder = FakeGeocoder::with(vec![place("somewhere")]);
    let finder = Finder::new(Some(table()), &geocoder, FinderConfig::default());

    let outcome = finder.search("lagos main");

    let calls = geocoder.calls.borrow();
    assert_eq!(calls.len(), outcome.rows().len());
    assert_eq!(calls[0], ("57 Marina, Lagos, Nigeria".to_string(), 1));
    let points = outcome.map_points();
    assert_eq!(points[0].label, "Lagos Main");
}

#[test]
fn failed_row_geocoding_only_drops_points() {
    let geocoder = FakeGeocoder::down();
    let finder = Finder::new(Some(table()), &geocoder, FinderConfig::default());

    let outcome = finder.search("lagos main");

    assert_eq!(outcome.kind, OutcomeKind::AutoCorrected);
    assert!(!outcome.rows().is_empty());
    assert!(outcome.map_points().is_empty());
}

#[test]
fn geocoding_can_be_switched_off() {
    let geocoder = FakeGeocoder::with(vec![place("x")]);
    let config = FinderConfig {
        geocode_branches: false,
        ..FinderConfig::default()
    };
    let finder = Finder::new(Some(table()), &geocoder, config);

    let outcome = finder.search("ikeja");

    assert_eq!(outcome.kind, OutcomeKind::AutoCorrected);
    assert!(geocoder.calls.borrow().is_empty());
}

#[test]
fn near_miss_offers_ranked_suggestions() {
    let geocoder = FakeGeocoder::default();
    let finder = Finder::new(Some(table()), &geocoder, FinderConfig::default());

    // One transposition away from "ikeja": similarity 60.
    let outcome = finder.search("ikjea");

    assert_eq!(outcome.kind, OutcomeKind::Suggestions);
    assert_eq!(outcome.status, "Did you mean one of these?");
    assert!(outcome.payload.is_none());
    assert!(!outcome.suggestions.is_empty());
    let scores: Vec<f64> = outcome.suggestions.iter().map(|s: &Suggestion| s.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|s| (60.0..=85.0).contains(s)));
    assert!(geocoder.calls.borrow().is_empty());
}

#[test]
fn picking_a_suggestion_is_confident() {
    let finder = Finder::new(Some(table()), FakeGeocoder::default(), FinderConfig::default());
    let suggestion = finder.search("ikjea").suggestions[0].text.clone();

    let outcome = finder.search(&suggestion);

    assert_eq!(outcome.kind, OutcomeKind::AutoCorrected);
    assert_eq!(outcome.query, suggestion);
}

#[test]
fn miss_falls_back_to_remote_places() {
    let geocoder = FakeGeocoder::with(vec![place("Wuse II, Abuja"), place("Wuse Market")]);
    let finder = Finder::new(Some(table()), &geocoder, FinderConfig::default());

    let outcome = finder.search("wuse abuja fct");

    assert_eq!(outcome.kind, OutcomeKind::Remote);
    assert_eq!(outcome.places().len(), 2);
    assert!(outcome.rows().is_empty());
    assert_eq!(geocoder.calls.borrow()[0], ("wuse abuja fct".to_string(), 5));
}

#[test]
fn miss_with_empty_remote_is_one_no_results_entry() {
    let finder = Finder::new(Some(table()), FakeGeocoder::default(), FinderConfig::default());
    let mut session = Session::new();

    session.run_query(&finder, "zzzz qqqq xxxx");

    assert_eq!(session.history.len(), 1);
    let entry = &session.history.entries()[0];
    assert_eq!(entry.kind, OutcomeKind::NoResults);
    assert_eq!(entry.status, "No results found in Nigeria for: zzzz qqqq xxxx");
    assert!(entry.payload.is_none());
}

#[test]
fn network_failure_looks_like_no_results() {
    let finder = Finder::new(Some(table()), FakeGeocoder::down(), FinderConfig::default());
    let outcome = finder.search("zzzz qqqq xxxx");
    assert_eq!(outcome.kind, OutcomeKind::NoResults);
}

#[test]
fn missing_table_goes_straight_to_remote() {
    let finder = Finder::new(None, FakeGeocoder::with(vec![place("Lagos")]), FinderConfig::default());
    let outcome = finder.search("lagos main");
    assert_eq!(outcome.kind, OutcomeKind::Remote);
}

#[test]
fn history_grows_by_one_per_query_until_cleared() {
    let finder = Finder::new(Some(table()), FakeGeocoder::default(), FinderConfig::default());
    let mut session = Session::new();

    let queries = ["lagos main", "ikjea", "nowhere at all really", "kano road"];
    for q in queries {
        session.run_query(&finder, q);
    }
    assert_eq!(session.history.len(), queries.len());

    session.clear();
    assert_eq!(session.history.len(), 0);
}

#[test]
fn loads_plain_and_gzipped_files() {
    let dir = tempfile::tempdir().unwrap();

    let plain = dir.path().join("branches.csv");
    std::fs::write(&plain, CSV).unwrap();
    assert_eq!(BranchTable::load_from_path(&plain, "Nigeria").unwrap().len(), 3);

    let gz = dir.path().join("branches.csv.gz");
    let file = std::fs::File::create(&gz).unwrap();
    let mut enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    enc.write_all(CSV.as_bytes()).unwrap();
    enc.finish().unwrap();
    assert_eq!(BranchTable::load_from_path(&gz, "nigeria").unwrap().len(), 3);
}

#[test]
fn missing_dataset_is_reported_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = BranchTable::load_from_path(dir.path().join("nope.csv"), "nigeria").unwrap_err();
    assert!(matches!(err, FinderError::DatasetNotFound(_)));
    assert!(err.to_string().contains("nope.csv"));
}
