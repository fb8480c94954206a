//! Statistical summary CLI command.
//!
//! Reads a daily indicator series from CSV (`date,value` columns) and scores
//! the latest observation against the preceding rolling window.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::Args;
use market_signal_core::{AppConfig, TimeSeries, TimeSeriesPoint};
use market_signal_engine::{Describe, StatisticalSummary, ZScoreSeverity};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Arguments for the summary command.
#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    /// CSV file with `date,value` columns, oldest first
    #[arg(short, long)]
    pub input: PathBuf,

    /// Rolling window size (defaults to the configured window)
    #[arg(long)]
    pub window: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Deserialize)]
struct SeriesRow {
    date: String,
    value: f64,
}

/// Parses either an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{raw}'"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("invalid date '{raw}'"))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

/// Loads a series from a CSV file.
///
/// # Errors
/// Returns an error if the file cannot be read, a row cannot be parsed, or
/// dates are not strictly increasing.
pub fn load_series(path: &Path) -> Result<TimeSeries> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut points = Vec::new();
    for (line, row) in reader.deserialize::<SeriesRow>().enumerate() {
        let row = row.with_context(|| format!("bad row {} in {}", line + 2, path.display()))?;
        points.push(TimeSeriesPoint::new(parse_date(&row.date)?, row.value));
    }

    let series = TimeSeries::new(points)?;
    tracing::info!(path = %path.display(), points = series.len(), "loaded series");
    Ok(series)
}

/// Runs the summary command.
///
/// # Errors
/// Returns an error if the series cannot be loaded or is empty.
pub fn run_summary(args: SummaryArgs, config: &AppConfig) -> Result<()> {
    let series = load_series(&args.input)?;
    let window = args.window.unwrap_or(config.statistics.window_size);
    let summary = StatisticalSummary::from_series(&series, window)
        .ok_or_else(|| anyhow!("{} contains no observations", args.input.display()))?;

    if summary.is_unusual() {
        tracing::info!(
            z_score = summary.z_score,
            rarity = ?summary.rarity,
            "latest reading is unusual for its window"
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let severity = ZScoreSeverity::from_zscore(summary.z_score);
    println!("{:<20} {:>14.4}", "Current value", summary.current_value);
    println!("{:<20} {:>14.4}", "Mean", summary.mean);
    println!("{:<20} {:>14.4}", "Std deviation", summary.standard_deviation);
    println!("{:<20} {:>14.2}", "Z-score", summary.z_score);
    println!("{:<20} {:>14}", "Severity", severity.label());
    match summary.rarity {
        Some(n) => println!("{:<20} {:>14}", "Rarity", format!("1 in {n}")),
        None => println!("{:<20} {:>14}", "Rarity", "-"),
    }

    Ok(())
}
