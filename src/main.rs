//! Account Reports CLI
//!
//! Classifies three monthly account exports and prints the KPI comparison
//! table for the two month-over-month pairs they form.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts-20140201.csv accounts-20140301.csv accounts-20140401.csv
//! ```
//!
//! Each snapshot's observation period is derived from its filename
//! (`accounts-YYYYMMDD.csv`, the export's naming convention).
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use account_reports::{
    plan_breakdown, ComparisonReport, PeriodDelta, ReportError, Result, Snapshot,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

struct Options {
    paths: Vec<String>,
    list_paid: bool,
    plan_breakdown: bool,
    header_format: Option<String>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options> {
    let mut options = Options {
        paths: Vec::new(),
        list_paid: false,
        plan_breakdown: false,
        header_format: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--list-paid" => options.list_paid = true,
            "--plan-breakdown" => options.plan_breakdown = true,
            "--header-format" => {
                options.header_format = Some(args.next().ok_or(ReportError::MissingArgument)?);
            }
            _ => options.paths.push(arg),
        }
    }

    if options.paths.len() != 3 {
        return Err(ReportError::MissingArgument);
    }

    Ok(options)
}

/// Derives a snapshot's observation period from its filename.
///
/// The daily export job names its files `accounts-YYYYMMDD.csv`; the date
/// is taken as the observation instant at midnight.
fn period_from_path(path: &str) -> Result<NaiveDateTime> {
    let stem = Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("");

    let date = stem
        .strip_prefix("accounts-")
        .and_then(|digits| NaiveDate::parse_from_str(digits, "%Y%m%d").ok())
        .ok_or_else(|| ReportError::InvalidReportFilename(path.to_string()))?;

    Ok(date.and_time(NaiveTime::MIN))
}

fn load_snapshot(path: &str) -> Result<Snapshot> {
    let period = period_from_path(path)?;
    let file = File::open(path)?;
    Snapshot::from_csv(period, BufReader::new(file))
}

fn run() -> Result<()> {
    let options = parse_args(env::args().skip(1))?;

    let oldest = load_snapshot(&options.paths[0])?;
    let middle = load_snapshot(&options.paths[1])?;
    let newest = load_snapshot(&options.paths[2])?;

    let previous = PeriodDelta::new(&oldest, &middle)?;
    let latest = PeriodDelta::new(&middle, &newest)?;

    let mut report = ComparisonReport::new(&previous, &latest);
    if let Some(format) = &options.header_format {
        report = report.with_header_format(format);
    }

    let stdout = io::stdout();
    let handle = stdout.lock();
    report.write(handle)?;
    println!("* Need to validate.");

    if options.list_paid {
        let mut ids: Vec<String> = latest.new_paid().into_iter().collect();
        ids.sort_unstable();
        println!("--");
        println!("New, paid account ids: {}", ids.join(", "));
    }

    if options.plan_breakdown {
        println!("--");
        for (plan, count) in plan_breakdown(&newest) {
            println!("{}: {}", plan, count);
        }
    }

    Ok(())
}
