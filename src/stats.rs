use crate::error::{Error, Result};
use crate::models::EmissionRecord;
use serde::{Deserialize, Serialize};

/// Descriptive statistics over one country's series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub total: f64,
    pub average: f64,
    /// Population standard deviation (divisor = `count`).
    pub stddev: f64,
    pub max_value: f64,
    pub max_year: String,
    pub min_value: f64,
    pub min_year: String,
}

/// Compute [`Statistics`] for a non-empty series.
///
/// Extremes are found with a strict comparison in sequence order, so on ties
/// the earliest record wins. Non-finite values are not filtered and
/// propagate through the average and stddev. The extremes scan starts at the
/// first non-NaN record, so NaN only wins when every value is NaN.
pub fn aggregate(records: &[EmissionRecord]) -> Result<Statistics> {
    let first = records.first().ok_or(Error::EmptySeries)?;
    let seed = records
        .iter()
        .position(|r| !r.emissions.is_nan())
        .unwrap_or(0);

    let total = records.iter().map(|r| r.emissions).sum::<f64>();
    let mut max = records.get(seed).unwrap_or(first);
    let mut min = max;
    for r in &records[seed..] {
        if r.emissions > max.emissions {
            max = r;
        }
        if r.emissions < min.emissions {
            min = r;
        }
    }

    let count = records.len();
    let average = total / count as f64;
    let variance = records
        .iter()
        .map(|r| (r.emissions - average).powi(2))
        .sum::<f64>()
        / count as f64;

    Ok(Statistics {
        count,
        total,
        average,
        stddev: variance.sqrt(),
        max_value: max.emissions,
        max_year: max.year.clone(),
        min_value: min.emissions,
        min_year: min.year.clone(),
    })
}
