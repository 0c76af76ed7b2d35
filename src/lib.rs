//! co2_rs
//!
//! A small Rust library for downloading the Our World in Data CO2 dataset,
//! indexing it by country, and summarizing one country's yearly emissions.
//! Pairs with the `co2` CLI.
//!
//! ### Features
//! - Fetch the dataset over HTTP(S) into a local file
//! - Lenient CSV parsing: malformed rows are dropped and counted, never fatal
//! - Per-country statistics (mean, population standard deviation, min/max with year)
//! - Fixed-layout text report, plus optional JSON export of the statistics
//!
//! ### Example
//! ```no_run
//! use co2_rs::{Config, Fetcher};
//!
//! let config = Config::default();
//! let fetcher = Fetcher::new(config.timeout)?;
//! let (table, _summary) = co2_rs::pipeline::load_table(&config, &fetcher)?;
//! let records = table.require("Germany")?;
//! let stats = co2_rs::stats::aggregate(records)?;
//! print!("{}", co2_rs::report::render("Germany", records, &stats));
//! # Ok::<(), co2_rs::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod parse;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::Config;
pub use error::{Error, Result};
pub use fetch::Fetcher;
pub use models::{CountryTable, EmissionRecord};
pub use stats::Statistics;
