//! Error types for the fetch → parse → aggregate → report pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot write dataset to {path}: {source}")]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("request to {url} failed with HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("cannot read dataset {path}: {source}")]
    DatasetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no data available after parsing {path}")]
    EmptyDataset { path: PathBuf },

    #[error("country not found in dataset: {country}")]
    CountryNotFound { country: String },

    #[error("cannot compute statistics over an empty series")]
    EmptySeries,

    #[error("cannot write report to {path}: {source}")]
    ReportDestinationUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
