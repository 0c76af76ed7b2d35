//! Dataset parser.
//!
//! Reads comma-delimited text with one header row into a [`CountryTable`].
//! Splitting is naive: quoting is disabled, so a quote is an ordinary byte
//! and a value containing a comma shifts every later column of that row.
//! Rows that miss a field or whose emissions value does not parse as `f64`
//! are dropped and only counted in the [`ParseSummary`].

use crate::config::{ColumnLayout, ColumnSpec};
use crate::error::{Error, Result};
use crate::models::{CountryTable, EmissionRecord};
use csv::{ByteRecord, ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Why a data row was left out of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DropReason {
    MissingCountry,
    MissingYear,
    MissingValue,
    InvalidNumber,
}

/// Classification of a single data row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted {
        country: String,
        record: EmissionRecord,
    },
    Dropped(DropReason),
}

/// Counts gathered while parsing; only `accepted` rows reach the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseSummary {
    pub layout: ColumnLayout,
    pub accepted: usize,
    pub dropped: usize,
    pub by_reason: BTreeMap<DropReason, usize>,
}

impl ParseSummary {
    fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Accepted { .. } => self.accepted += 1,
            RowOutcome::Dropped(reason) => {
                self.dropped += 1;
                *self.by_reason.entry(*reason).or_default() += 1;
            }
        }
    }
}

/// Pick the column positions for this file.
///
/// With header names configured, all three must be present in `header`
/// for the named positions to be used; otherwise the fixed offsets apply
/// and a warning is logged.
pub fn resolve_layout(spec: &ColumnSpec, header: &StringRecord) -> ColumnLayout {
    let Some(names) = spec.names.as_ref() else {
        return spec.fixed;
    };
    let position = |name: &str| header.iter().position(|h| h.trim() == name);
    match (
        position(names.country.as_str()),
        position(names.year.as_str()),
        position(names.emissions.as_str()),
    ) {
        (Some(country), Some(year), Some(emissions)) => ColumnLayout {
            country,
            year,
            emissions,
        },
        _ => {
            warn!(
                "header lacks one of {:?}/{:?}/{:?}; falling back to fixed columns {:?}",
                names.country, names.year, names.emissions, spec.fixed
            );
            spec.fixed
        }
    }
}

/// Classify one data row against `layout`.
///
/// A row too short to hold a column reports that column as missing.
pub fn classify_record(record: &StringRecord, layout: &ColumnLayout) -> RowOutcome {
    let field = |i: usize| record.get(i).unwrap_or("");

    let country = field(layout.country);
    if country.is_empty() {
        return RowOutcome::Dropped(DropReason::MissingCountry);
    }
    let year = field(layout.year);
    if year.is_empty() {
        return RowOutcome::Dropped(DropReason::MissingYear);
    }
    let raw = field(layout.emissions);
    if raw.is_empty() {
        return RowOutcome::Dropped(DropReason::MissingValue);
    }
    match raw.parse::<f64>() {
        Ok(emissions) => RowOutcome::Accepted {
            country: country.to_string(),
            record: EmissionRecord::new(year, emissions),
        },
        Err(_) => RowOutcome::Dropped(DropReason::InvalidNumber),
    }
}

/// Parse from any reader. The first row is the header and is never a data row.
pub fn parse_reader<R: Read>(rdr: R, spec: &ColumnSpec) -> Result<(CountryTable, ParseSummary)> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(rdr);

    let header = StringRecord::from_byte_record_lossy(csv.byte_headers()?.clone());
    let layout = resolve_layout(spec, &header);
    if header.len() < layout.min_width() {
        warn!(
            "header has {} columns but layout {:?} needs {}",
            header.len(),
            layout,
            layout.min_width()
        );
    }

    let mut table = CountryTable::new();
    let mut summary = ParseSummary {
        layout,
        ..ParseSummary::default()
    };

    let mut raw = ByteRecord::new();
    while csv.read_byte_record(&mut raw)? {
        let row = StringRecord::from_byte_record_lossy(raw.clone());
        let outcome = classify_record(&row, &layout);
        summary.record(&outcome);
        match outcome {
            RowOutcome::Accepted { country, record } => table.push(country, record),
            RowOutcome::Dropped(reason) => {
                debug!("dropped row {:?}: {:?}", raw.position().map(|p| p.line()), reason);
            }
        }
    }

    info!(
        "parsed {} countries ({} rows accepted, {} dropped)",
        table.len(),
        summary.accepted,
        summary.dropped
    );
    Ok((table, summary))
}

/// Parse the dataset stored at `path`.
pub fn parse_file<P: AsRef<Path>>(path: P, spec: &ColumnSpec) -> Result<(CountryTable, ParseSummary)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::DatasetUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader(BufReader::new(file), spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn short_row_reports_first_missing_column() {
        let layout = ColumnLayout::FIXED;
        assert_eq!(
            classify_record(&rec(&["Chad", "TCD", "2001"]), &layout),
            RowOutcome::Dropped(DropReason::MissingValue)
        );
        assert_eq!(
            classify_record(&rec(&["Chad"]), &layout),
            RowOutcome::Dropped(DropReason::MissingYear)
        );
    }

    #[test]
    fn trailing_garbage_is_not_a_number() {
        let row = rec(&["Chad", "TCD", "2001", "", "", "", "12abc"]);
        assert_eq!(
            classify_record(&row, &ColumnLayout::FIXED),
            RowOutcome::Dropped(DropReason::InvalidNumber)
        );
    }

    #[test]
    fn resolve_by_name_uses_header_positions() {
        let header = rec(&["country", "year", "iso_code", "population", "co2"]);
        let layout = resolve_layout(&ColumnSpec::default(), &header);
        assert_eq!(
            layout,
            ColumnLayout {
                country: 0,
                year: 1,
                emissions: 4
            }
        );
    }

    #[test]
    fn resolve_falls_back_when_a_name_is_missing() {
        let header = rec(&["country", "year", "iso_code"]);
        assert_eq!(
            resolve_layout(&ColumnSpec::default(), &header),
            ColumnLayout::FIXED
        );
    }
}
