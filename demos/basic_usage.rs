//! Basic usage example for branchfinder-rs
//!
//! Runs entirely offline: the dataset is inline CSV and the places service is
//! a canned geocoder, so every branch of the decision policy can be seen.

use branchfinder_rs::prelude::*;

/// Answers every lookup with the same point near Lagos Island.
struct CannedGeocoder;

impl Geocoder for CannedGeocoder {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>> {
        if query.contains("nowhere") {
            return Ok(Vec::new());
        }
        Ok(vec![
            Place {
                label: format!("{query} (Lagos Island, Lagos, Nigeria)"),
                latitude: 6.4541,
                longitude: 3.3947,
            };
            limit.min(2)
        ])
    }
}

const CSV: &str = "\
BRANCH NAME,BRANCH ADDRESS,STATE,COUNTRY
Lagos Main,57 Marina,Lagos,Nigeria
Ikeja,Obafemi Awolowo Way,Lagos,Nigeria
Kano Road,Bello Road,Kano,Nigeria
Accra Central,Independence Ave,Greater Accra,Ghana
";

fn main() -> Result<()> {
    println!("=== Branch Finder Basic Usage ===\n");

    let config = FinderConfig::default();
    let table = BranchTable::from_reader(CSV.as_bytes(), &config.country)?;
    println!("✓ Loaded {} branches (Ghana row filtered out)\n", table.len());

    let finder = Finder::new(Some(table), CannedGeocoder, config);
    let mut session = Session::new();

    for query in ["lagos main", "ikjea", "wuse market abuja", "nowhere in particular"] {
        println!("--- Query: {query:?} ---");
        let outcome = session.run_query(&finder, query);
        if let Some(note) = &outcome.note {
            println!("  {note}");
        }
        println!("  {:?}: {}", outcome.kind, outcome.status);
        for s in &outcome.suggestions {
            println!("    - {} ({:.0}%)", s.text, s.score);
        }
        for row in outcome.rows() {
            println!("    * {} ({})", row.name(), row.state.as_deref().unwrap_or(""));
        }
        for p in outcome.map_points() {
            println!("    @ {} ({:.4}, {:.4})", p.label, p.latitude, p.longitude);
        }
        println!();
    }

    println!("Search history:");
    for (i, o) in session.history.iter().enumerate() {
        println!("{}. {}", i + 1, o.status);
    }

    Ok(())
}
