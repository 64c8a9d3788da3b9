// crates/branchfinder-core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the branch finder.
///
/// Only [`FinderError::DatasetNotFound`] is fatal to a session. Everything
/// raised while talking to the remote service is absorbed by
/// [`crate::remote::remote_search`] and surfaces as a "no results" outcome.
#[derive(Debug, Error)]
pub enum FinderError {
    #[error("Dataset not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "remote")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, FinderError>;

impl From<toml::de::Error> for FinderError {
    fn from(e: toml::de::Error) -> Self {
        FinderError::Config(e.to_string())
    }
}
