//! branchfinder-rs
//!
//! Workspace umbrella crate. It re-exports [`branchfinder_core`] so the demos
//! under `demos/` can be run from the repository root:
//!
//! ```text
//! cargo run --example basic_usage
//! cargo run --example error_handling
//! ```
pub use branchfinder_core::*;
