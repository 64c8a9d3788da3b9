// crates/branchfinder-core/src/prelude.rs
pub use crate::config::FinderConfig;
pub use crate::error::{FinderError, Result};
pub use crate::finder::{Finder, Session};
pub use crate::history::{History, OutcomeKind, OutcomePayload, SearchOutcome};
pub use crate::model::{BranchRecord, BranchTable, MapPoint, Place};
pub use crate::policy::Decision;
pub use crate::remote::Geocoder;
#[cfg(feature = "remote")]
pub use crate::remote::NominatimClient;
