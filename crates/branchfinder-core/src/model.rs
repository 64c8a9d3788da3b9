// crates/branchfinder-core/src/model.rs
use crate::text::{normalize_query, row_key};
use serde::{Deserialize, Serialize};

/// Column headers the dataset is known to carry.
pub mod columns {
    pub const BRANCH_NAME: &str = "BRANCH NAME";
    pub const BRANCH_ADDRESS: &str = "BRANCH ADDRESS";
    pub const STATE: &str = "STATE";
    pub const COUNTRY: &str = "COUNTRY";
}

/// A single row of the branch dataset.
///
/// The well-known columns are lifted into typed fields at load time; every
/// column (known or not) is also kept in `fields`, in file order, so that
/// callers can render the row as it was read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchRecord {
    /// Position of the row within the loaded (filtered) table.
    pub index: usize,
    pub branch_name: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    /// All `(column, value)` pairs in column order.
    pub fields: Vec<(String, String)>,
}

impl BranchRecord {
    /// Builds a record from `(column, value)` pairs.
    pub fn from_fields(index: usize, fields: Vec<(String, String)>) -> Self {
        let lookup = |name: &str| {
            fields
                .iter()
                .find(|(k, _)| k.trim().eq_ignore_ascii_case(name))
                .map(|(_, v)| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            index,
            branch_name: lookup(columns::BRANCH_NAME),
            address: lookup(columns::BRANCH_ADDRESS),
            state: lookup(columns::STATE),
            country: lookup(columns::COUNTRY),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        self.branch_name.as_deref().unwrap_or("N/A")
    }

    /// Value of an arbitrary column, case-insensitive on the header.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(column))
            .map(|(_, v)| v.as_str())
    }

    /// `"<address>, <state>, <country>"`, the string sent to the geocoder.
    pub fn geocode_query(&self) -> String {
        format!(
            "{}, {}, {}",
            self.address.as_deref().unwrap_or(""),
            self.state.as_deref().unwrap_or(""),
            self.country.as_deref().unwrap_or("")
        )
    }

    /// Normalized text of the row used by the matcher.
    pub fn text_key(&self) -> String {
        row_key(self.fields.iter().map(|(_, v)| v.as_str()))
    }

    /// Normalized value of each non-blank cell, in column order.
    pub fn field_keys(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|(_, v)| normalize_query(v))
            .filter(|v| !v.is_empty())
            .collect()
    }
}

/// The loaded dataset: rows already filtered to one country.
#[derive(Clone, Debug, Default)]
pub struct BranchTable {
    pub headers: Vec<String>,
    pub rows: Vec<BranchRecord>,
    /// `keys[i]` is the normalized text of `rows[i]`.
    pub(crate) keys: Vec<String>,
    /// `field_keys[i]` holds the normalized cells of `rows[i]`.
    pub(crate) field_keys: Vec<Vec<String>>,
}

impl BranchTable {
    pub fn new(headers: Vec<String>, rows: Vec<BranchRecord>) -> Self {
        let keys = rows.iter().map(BranchRecord::text_key).collect();
        let field_keys = rows.iter().map(BranchRecord::field_keys).collect();
        Self {
            headers,
            rows,
            keys,
            field_keys,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[BranchRecord] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&BranchRecord> {
        self.rows.get(index)
    }

    /// Normalized text of the row at `index`.
    pub fn key(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    /// Normalized cells of the row at `index`.
    pub fn field_keys(&self, index: usize) -> Option<&[String]> {
        self.field_keys.get(index).map(Vec::as_slice)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers
            .iter()
            .any(|h| h.trim().eq_ignore_ascii_case(column))
    }
}

/// A hit returned by the remote places service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A labelled coordinate for map display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl From<&Place> for MapPoint {
    fn from(p: &Place) -> Self {
        MapPoint {
            latitude: p.latitude,
            longitude: p.longitude,
            label: p.label.clone(),
        }
    }
}
