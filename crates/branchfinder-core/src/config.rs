// crates/branchfinder-core/src/config.rs
use crate::error::{FinderError, Result};
use crate::matcher::{DEFAULT_LIMIT, DEFAULT_THRESHOLD};
use crate::policy::{PolicyConfig, DEFAULT_CONFIDENT_ABOVE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "UBABranchFinder";

/// Settings shared by both front ends.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// dataset = "data/uba_branches.csv"
/// threshold = 65
/// geocode_branches = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub dataset: PathBuf,
    /// Rows whose `COUNTRY` differs from this (case-insensitive) are dropped.
    pub country: String,
    /// ISO2 code passed to the remote service as `countrycodes`.
    pub country_code: String,
    pub threshold: f64,
    pub limit: usize,
    pub confident_above: f64,
    pub remote_limit: usize,
    /// Geocode each accepted branch address to get map points.
    pub geocode_branches: bool,
    pub endpoint: String,
    pub user_agent: String,
    /// `0` leaves the HTTP client's default in place.
    pub timeout_secs: u64,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("uba_branches.csv"),
            country: "nigeria".into(),
            country_code: "ng".into(),
            threshold: DEFAULT_THRESHOLD,
            limit: DEFAULT_LIMIT,
            confident_above: DEFAULT_CONFIDENT_ABOVE,
            remote_limit: 5,
            geocode_branches: true,
            endpoint: NOMINATIM_SEARCH_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            timeout_secs: 10,
        }
    }
}

impl FinderConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: FinderConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FinderError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn policy(&self) -> PolicyConfig {
        PolicyConfig {
            threshold: self.threshold,
            confident_above: self.confident_above,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.threshold) {
            return Err(FinderError::Config(format!(
                "threshold must be within 0..=100, got {}",
                self.threshold
            )));
        }
        if !in_range(self.confident_above) {
            return Err(FinderError::Config(format!(
                "confident_above must be within 0..=100, got {}",
                self.confident_above
            )));
        }
        if self.limit == 0 || self.remote_limit == 0 {
            return Err(FinderError::Config("limits must be at least 1".into()));
        }
        if self.country_code.trim().is_empty() {
            return Err(FinderError::Config("country_code is empty".into()));
        }
        Ok(())
    }
}

/// Command-line flags shared by the front ends; each one overrides the
/// matching [`FinderConfig`] key.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Path to the branch dataset (.csv or .csv.gz)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// TOML file with defaults for every other flag
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Country the dataset rows are filtered to (e.g. nigeria)
    #[arg(long)]
    pub country: Option<String>,

    /// ISO2 code the remote search is restricted to (e.g. ng)
    #[arg(long = "country-code")]
    pub country_code: Option<String>,

    /// Minimum similarity (0-100) for a dataset row to count as a match
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Maximum number of dataset matches to keep
    #[arg(long)]
    pub limit: Option<usize>,

    /// Top scores above this (0-100) are auto-corrected
    #[arg(long = "confident-above")]
    pub confident_above: Option<f64>,

    /// Do not geocode accepted branches for the map
    #[arg(long = "no-map")]
    pub no_map: bool,

    /// Places search endpoint (Nominatim compatible)
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[cfg(feature = "cli")]
impl ConfigArgs {
    /// Loads the TOML file (if any), applies the flags on top and validates.
    pub fn resolve(&self) -> Result<FinderConfig> {
        let mut cfg = match &self.config {
            Some(path) => FinderConfig::load_from_path(path)?,
            None => FinderConfig::default(),
        };
        if let Some(v) = &self.input {
            cfg.dataset = v.clone();
        }
        if let Some(v) = &self.country {
            cfg.country = v.clone();
        }
        if let Some(v) = &self.country_code {
            cfg.country_code = v.clone();
        }
        if let Some(v) = self.threshold {
            cfg.threshold = v;
        }
        if let Some(v) = self.limit {
            cfg.limit = v;
        }
        if let Some(v) = self.confident_above {
            cfg.confident_above = v;
        }
        if self.no_map {
            cfg.geocode_branches = false;
        }
        if let Some(v) = &self.endpoint {
            cfg.endpoint = v.clone();
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
