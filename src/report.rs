use crate::error::{Error, Result};
use crate::models::EmissionRecord;
use crate::stats::Statistics;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const YEAR_WIDTH: usize = 10;
const EMISSIONS_WIDTH: usize = 15;
const DIVIDER_WIDTH: usize = 40;

/// Render the year/emissions table and the statistics block.
///
/// The console and the report file both receive exactly this text.
pub fn render(country: &str, records: &[EmissionRecord], stats: &Statistics) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "CO2 Emissions Report for {country}");
    let _ = writeln!(out, "{}", "-".repeat(DIVIDER_WIDTH));
    let _ = writeln!(
        out,
        "{:>yw$}{:>ew$}",
        "Year",
        "Emissions (Mt)",
        yw = YEAR_WIDTH,
        ew = EMISSIONS_WIDTH
    );
    for r in records {
        let _ = writeln!(
            out,
            "{:>yw$}{:>ew$.2}",
            r.year,
            r.emissions,
            yw = YEAR_WIDTH,
            ew = EMISSIONS_WIDTH
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Statistics for {country}:");
    let _ = writeln!(out, "- Average Emissions: {:.2} Mt", stats.average);
    let _ = writeln!(out, "- Standard Deviation: {:.2} Mt", stats.stddev);
    let _ = writeln!(
        out,
        "- Highest Emissions: {:.2} Mt in {}",
        stats.max_value, stats.max_year
    );
    let _ = writeln!(
        out,
        "- Lowest Emissions: {:.2} Mt in {}",
        stats.min_value, stats.min_year
    );
    out
}

/// "Available Countries:" followed by one `- name` line per country.
pub fn render_country_list<'a>(countries: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from("Available Countries:\n");
    for c in countries {
        out.push_str("- ");
        out.push_str(c);
        out.push('\n');
    }
    out
}

/// Write `text` to `path`, replacing any previous report.
pub fn save_report<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    let unwritable = |source: std::io::Error| Error::ReportDestinationUnwritable {
        path: path.to_path_buf(),
        source,
    };
    let mut f = BufWriter::new(File::create(path).map_err(unwritable)?);
    f.write_all(text.as_bytes()).map_err(unwritable)?;
    f.flush().map_err(unwritable)?;
    Ok(())
}

#[derive(Serialize)]
struct StatisticsExport<'a> {
    country: &'a str,
    #[serde(flatten)]
    stats: &'a Statistics,
}

/// Save the statistics as a pretty JSON object, tagged with the country.
pub fn save_json<P: AsRef<Path>>(country: &str, stats: &Statistics, path: P) -> Result<()> {
    let s = serde_json::to_string_pretty(&StatisticsExport { country, stats })?;
    save_report(&s, path)
}
