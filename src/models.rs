use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One country-year CO2 measurement (megatonnes).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmissionRecord {
    /// Kept as the label found in the file; not converted to an integer.
    pub year: String,
    pub emissions: f64,
}

impl EmissionRecord {
    pub fn new(year: impl Into<String>, emissions: f64) -> Self {
        Self {
            year: year.into(),
            emissions,
        }
    }
}

/// Parsed dataset: country name → records in file-row order.
///
/// Keys are stored exactly as they appear in the source. Iteration is
/// sorted by key, so the country listing is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryTable {
    rows: BTreeMap<String, Vec<EmissionRecord>>,
}

impl CountryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the end of `country`'s series.
    pub fn push(&mut self, country: impl Into<String>, record: EmissionRecord) {
        self.rows.entry(country.into()).or_default().push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct countries.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Total number of records across all countries.
    pub fn record_count(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    /// Country keys in sorted order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, country: &str) -> Option<&[EmissionRecord]> {
        self.rows.get(country).map(Vec::as_slice)
    }

    /// Like [`get`](Self::get) but a missing key is an [`Error::CountryNotFound`].
    pub fn require(&self, country: &str) -> Result<&[EmissionRecord]> {
        self.get(country).ok_or_else(|| Error::CountryNotFound {
            country: country.to_string(),
        })
    }
}
