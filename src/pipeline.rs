//! Orchestration: fetch → parse → select → aggregate → report.
//!
//! Console I/O goes through caller-supplied reader/writer handles so the whole
//! run can be driven from tests. Exactly one country is analyzed per run.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::models::CountryTable;
use crate::parse::{ParseSummary, parse_file};
use crate::report;
use crate::stats::{Statistics, aggregate};
use log::info;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const BANNER: &str = "Welcome to the Carbon Footprint Monitoring Tool!";
pub const FAREWELL: &str = "Thank you for using the Carbon Footprint Monitoring Tool!";
pub const PROMPT: &str = "Enter the name of the country you want to analyze: ";

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Reported {
        country: String,
        stats: Statistics,
        report_path: PathBuf,
    },
    /// Selection is not a key of the table; nothing was computed or written.
    CountryNotFound { country: String },
}

/// Download the dataset and parse it. An empty table is an error.
pub fn load_table(config: &Config, fetcher: &Fetcher) -> Result<(CountryTable, ParseSummary)> {
    fetcher.fetch(&config.dataset_url, &config.dataset_path)?;
    let (table, summary) = parse_file(&config.dataset_path, &config.columns)?;
    if table.is_empty() {
        return Err(Error::EmptyDataset {
            path: config.dataset_path.clone(),
        });
    }
    Ok((table, summary))
}

/// Read one line and strip surrounding whitespace, including the line terminator.
pub fn read_selection<R: BufRead>(mut input: R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Aggregate and report one country, or report that it is unknown.
///
/// The selection is trimmed, then matched exactly (case-sensitive). On a
/// match the rendered text goes to `out` and overwrites the report file.
pub fn analyze<W: Write>(
    config: &Config,
    table: &CountryTable,
    selection: &str,
    mut out: W,
) -> Result<Outcome> {
    let country = selection.trim();
    let records = match table.require(country) {
        Ok(records) => records,
        Err(Error::CountryNotFound { country }) => {
            info!("no records for {:?}", country);
            return Ok(Outcome::CountryNotFound { country });
        }
        Err(e) => return Err(e),
    };

    let stats = aggregate(records)?;
    let text = report::render(country, records, &stats);
    writeln!(out)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;

    report::save_report(&text, &config.report_path)?;
    info!("report written to {}", config.report_path.display());
    if let Some(json) = config.json_path.as_ref() {
        report::save_json(country, &stats, json)?;
        info!("statistics exported to {}", json.display());
    }

    Ok(Outcome::Reported {
        country: country.to_string(),
        stats,
        report_path: config.report_path.clone(),
    })
}

/// Options for the interactive part of [`run`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Skip the prompt and analyze this country.
    pub country: Option<String>,
    /// Do not print the list of available countries.
    pub quiet_list: bool,
}

/// Full interactive run. Fetch and parse failures are returned as errors;
/// an unknown country is a normal [`Outcome`].
pub fn run<R: BufRead, W: Write>(
    config: &Config,
    fetcher: &Fetcher,
    opts: &RunOptions,
    input: R,
    mut out: W,
) -> Result<Outcome> {
    writeln!(out, "{BANNER}\n")?;

    let (table, summary) = load_table(config, fetcher)?;
    writeln!(
        out,
        "Loaded {} countries ({} rows accepted, {} dropped).",
        table.len(),
        summary.accepted,
        summary.dropped
    )?;

    if !opts.quiet_list {
        writeln!(out)?;
        out.write_all(report::render_country_list(table.countries()).as_bytes())?;
        writeln!(out)?;
    }

    let selection = match opts.country.as_ref() {
        Some(c) => c.clone(),
        None => {
            write!(out, "{PROMPT}")?;
            out.flush()?;
            read_selection(input)?
        }
    };

    analyze(config, &table, &selection, &mut out)
}
