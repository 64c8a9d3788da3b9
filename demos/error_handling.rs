//! Error handling example for branchfinder-rs
//!
//! This example demonstrates which failures stop a session and which ones
//! quietly become "no results" outcomes.

use branchfinder_rs::prelude::*;

struct Unreachable;

impl Geocoder for Unreachable {
    fn search(&self, _query: &str, _limit: usize) -> Result<Vec<Place>> {
        Err(FinderError::InvalidData("connection refused".into()))
    }
}

fn main() -> Result<()> {
    println!("=== Branch Finder Error Handling Example ===\n");

    // Example 1: A missing dataset is fatal to the session
    println!("--- Example 1: Loading a dataset that does not exist ---");
    match BranchTable::load_from_path("does/not/exist.csv", "nigeria") {
        Ok(t) => println!("✓ Unexpectedly loaded {} rows", t.len()),
        Err(e @ FinderError::DatasetNotFound(_)) => println!("✗ {e} (session would end here)"),
        Err(e) => return Err(e),
    }
    println!();

    // Example 2: Bad configuration is rejected before anything runs
    println!("--- Example 2: Invalid configuration ---");
    for toml in ["threshold = 140.0", "limit = 0", "limit = \"five\""] {
        match FinderConfig::from_toml_str(toml) {
            Ok(_) => println!("  accepted: {toml}"),
            Err(e) => println!("  rejected: {toml} -> {e}"),
        }
    }
    println!();

    // Example 3: Network failures look exactly like an empty answer
    println!("--- Example 3: Remote service unreachable ---");
    let csv = "BRANCH NAME,STATE,COUNTRY\nLagos Main,Lagos,Nigeria\n";
    let table = BranchTable::from_reader(csv.as_bytes(), "nigeria")?;
    let finder = Finder::new(Some(table), Unreachable, FinderConfig::default());
    let mut session = Session::new();

    let outcome = session.run_query(&finder, "maitama district abuja");
    println!("  {:?}: {}", outcome.kind, outcome.status);

    // Example 4: The dataset still answers while the network is down
    let outcome = session.run_query(&finder, "lagos main");
    println!("  {:?}: {}", outcome.kind, outcome.status);
    println!("  map points: {} (geocoding failed, rows kept)", outcome.map_points().len());

    println!("\nHistory entries: {}", session.history.len());
    Ok(())
}
