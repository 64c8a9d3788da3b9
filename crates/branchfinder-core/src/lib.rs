// crates/branchfinder-core/src/lib.rs

//! branchfinder-core
//! =================
//!
//! Presentation-agnostic core of the branch finder: load a branch dataset,
//! fuzzy-match free text against it, decide what to do with the best score
//! and fall back to a remote places service when the dataset has nothing.
//!
//! ```no_run
//! use branchfinder_core::prelude::*;
//!
//! let config = FinderConfig::default();
//! let table = BranchTable::load_from_path("uba_branches.csv", &config.country)?;
//! let geocoder = NominatimClient::from_config(&config)?;
//! let finder = Finder::new(Some(table), geocoder, config);
//!
//! let mut session = Session::default();
//! let outcome = session.run_query(&finder, "lagos main");
//! println!("{}", outcome.status);
//! # Ok::<(), branchfinder_core::FinderError>(())
//! ```

pub mod config;
pub mod error;
pub mod finder;
pub mod history;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod policy;
pub mod prelude;
pub mod remote;
pub mod text;

// Re-exports
pub use crate::config::FinderConfig;
#[cfg(feature = "cli")]
pub use crate::config::ConfigArgs;
pub use crate::error::{FinderError, Result};
pub use crate::finder::{Finder, Session};
pub use crate::history::{History, OutcomeKind, OutcomePayload, SearchOutcome, Suggestion};
pub use crate::matcher::{MatchCandidate, MatchResult};
pub use crate::model::{BranchRecord, BranchTable, MapPoint, Place};
pub use crate::policy::{Decision, PolicyConfig};
pub use crate::remote::Geocoder;
#[cfg(feature = "remote")]
pub use crate::remote::NominatimClient;
