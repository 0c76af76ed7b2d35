use anyhow::{Context, Result};
use clap::Parser;
use co2_rs::config::{self, ColumnSpec, Config};
use co2_rs::pipeline::{self, FAREWELL, Outcome, RunOptions};
use co2_rs::Fetcher;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "co2",
    version,
    about = "Download the OWID CO2 dataset and summarize one country's emissions"
)]
struct Cli {
    /// Dataset URL (comma-delimited text with a header row).
    #[arg(long, default_value = config::DEFAULT_DATASET_URL)]
    url: String,
    /// Where to store the downloaded dataset (overwritten).
    #[arg(long, default_value = config::DEFAULT_DATASET_FILE)]
    dataset: PathBuf,
    /// Where to write the text report (overwritten).
    #[arg(long, default_value = config::DEFAULT_REPORT_FILE)]
    report: PathBuf,
    /// Analyze this country instead of prompting for one.
    #[arg(short, long)]
    country: Option<String>,
    /// Also export the statistics as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,
    /// Request timeout in seconds (default: none).
    #[arg(long)]
    timeout: Option<u64>,
    /// Use positional columns only; do not resolve them from the header row.
    #[arg(long, default_value_t = false)]
    fixed_columns: bool,
    /// Do not print the list of available countries.
    #[arg(long, default_value_t = false)]
    quiet_list: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let defaults = ColumnSpec::default();
        Config {
            dataset_url: self.url.clone(),
            dataset_path: self.dataset.clone(),
            report_path: self.report.clone(),
            json_path: self.json.clone(),
            timeout: self.timeout.map(Duration::from_secs),
            columns: if self.fixed_columns {
                ColumnSpec::fixed(defaults.fixed)
            } else {
                defaults
            },
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cmd_run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn cmd_run(cli: &Cli) -> Result<()> {
    let config = cli.config();
    let fetcher = Fetcher::new(config.timeout)?;
    let opts = RunOptions {
        country: cli.country.clone(),
        quiet_list: cli.quiet_list,
    };

    let stdin = io::stdin();
    let outcome = pipeline::run(&config, &fetcher, &opts, stdin.lock(), io::stdout().lock())
        .with_context(|| format!("analysis of {} failed", config.dataset_url))?;

    match outcome {
        Outcome::Reported { report_path, .. } => {
            println!("Report saved to {}", report_path.display());
        }
        Outcome::CountryNotFound { country } => {
            eprintln!("Error: Country not found in dataset: {country}");
        }
    }
    println!("\n{FAREWELL}");
    Ok(())
}
