// crates/branchfinder-core/src/loader/mod.rs

//! # Dataset Loader
//!
//! Handles the physical layer (I/O, decompression) and turns CSV rows into
//! [`BranchRecord`]s, keeping only the rows of one country.

use crate::error::Result;
use crate::model::{columns, BranchRecord, BranchTable};
use crate::text::equals_folded;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

mod common_io;

pub use common_io::open_stream;

impl BranchTable {
    /// Loads a CSV (or `.csv.gz`) dataset and filters it to `country`.
    ///
    /// Fails with [`crate::FinderError::DatasetNotFound`] when the path does
    /// not resolve.
    pub fn load_from_path(path: impl AsRef<Path>, country: &str) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_stream(path)?;
        let table = Self::from_reader(reader, country)?;
        info!(
            path = %path.display(),
            rows = table.len(),
            country,
            "dataset loaded"
        );
        Ok(table)
    }

    /// Reads CSV with a header row from any reader.
    ///
    /// When the file has a `COUNTRY` column, rows whose country does not
    /// equal `country` (case-insensitive) are dropped. Without such a column
    /// every row is kept. Row indices are assigned after filtering.
    pub fn from_reader<R: Read>(reader: R, country: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let has_country = headers
            .iter()
            .any(|h| h.eq_ignore_ascii_case(columns::COUNTRY));

        let mut rows = Vec::new();
        let mut read = 0usize;
        for result in rdr.records() {
            let record = result?;
            read += 1;

            let fields: Vec<(String, String)> = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect();

            let row = BranchRecord::from_fields(rows.len(), fields);
            if has_country {
                let keep = row
                    .country
                    .as_deref()
                    .is_some_and(|c| equals_folded(c, country));
                if !keep {
                    continue;
                }
            }
            rows.push(row);
        }

        debug!(read, kept = rows.len(), has_country, "rows filtered");
        Ok(BranchTable::new(headers, rows))
    }
}
