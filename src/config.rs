//! Run configuration.
//!
//! A [`Config`] is built once at startup (the CLI builds it from flags) and
//! passed by reference to every stage. Nothing here is process-global.

use std::path::PathBuf;
use std::time::Duration;

/// Our World in Data CO2 dataset (comma-delimited, one header row).
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/owid/co2-data/refs/heads/master/owid-co2-data.csv";
/// Where the downloaded dataset lands (overwritten each run).
pub const DEFAULT_DATASET_FILE: &str = "owid-co2-data.csv";
/// Where the text report lands (overwritten each run).
pub const DEFAULT_REPORT_FILE: &str = "report.txt";

/// Zero-based column positions of the fields we read from each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub country: usize,
    pub year: usize,
    pub emissions: usize,
}

impl ColumnLayout {
    /// Positional fallback: first field, third field, seventh field.
    pub const FIXED: ColumnLayout = ColumnLayout {
        country: 0,
        year: 2,
        emissions: 6,
    };

    /// Smallest row width that contains every selected column.
    pub fn min_width(&self) -> usize {
        self.country.max(self.year).max(self.emissions) + 1
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Header names looked up when resolving a [`ColumnLayout`] by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNames {
    pub country: String,
    pub year: String,
    pub emissions: String,
}

impl Default for HeaderNames {
    fn default() -> Self {
        Self {
            country: "country".into(),
            year: "year".into(),
            emissions: "co2".into(),
        }
    }
}

/// How the parser picks its columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Used as-is when `names` is `None`, or when any name is missing from the header.
    pub fixed: ColumnLayout,
    /// Resolve positions against the header row first.
    pub names: Option<HeaderNames>,
}

impl ColumnSpec {
    /// Positional offsets only, header row ignored.
    pub fn fixed(layout: ColumnLayout) -> Self {
        Self {
            fixed: layout,
            names: None,
        }
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            fixed: ColumnLayout::FIXED,
            names: Some(HeaderNames::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_url: String,
    pub dataset_path: PathBuf,
    pub report_path: PathBuf,
    /// Optional pretty-JSON export of the computed statistics.
    pub json_path: Option<PathBuf>,
    /// `None` leaves the request unbounded.
    pub timeout: Option<Duration>,
    pub columns: ColumnSpec,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.into(),
            dataset_path: PathBuf::from(DEFAULT_DATASET_FILE),
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
            json_path: None,
            timeout: None,
            columns: ColumnSpec::default(),
        }
    }
}
