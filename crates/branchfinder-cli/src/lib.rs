//! branchfinder-cli
//! ================
//!
//! Interactive console for the `branchfinder-core` branch finder.
//!
//! The binary (`branchfinder`) loads the dataset once, then prompts for
//! queries until `exit`. Each query is matched against the dataset, and
//! either auto-corrected, answered with suggestions, or sent to the
//! OpenStreetMap fallback. On exit the session history is printed.
//!
//! Quick start
//! -----------
//!
//! ```text
//! branchfinder --input uba_branches.csv
//! branchfinder --input uba_branches.csv.gz --threshold 70 --no-map
//! branchfinder --config finder.toml --query "ikeja"
//! ```
//!
//! This library target holds the text rendering so it can be tested apart
//! from the prompt loop.

pub mod render;
