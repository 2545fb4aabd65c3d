//! ALD-Lab CLI — run the session-breakout backtest over an OHLCV CSV.
//!
//! Commands:
//! - `run` — load and clean a CSV, run the pipeline, write the trade tape
//!   (and optionally the annotated series / full JSON result)
//!
//! Cleaning mirrors the upstream loader contract: rows with missing or
//! unparseable fields are dropped, duplicate timestamps are aggregated
//! (first open, max high, min low, last close, summed volume), and the
//! result is sorted ascending before the pipeline validates it.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

use aldlab_core::config::BacktestConfig;
use aldlab_core::domain::Bar;
use aldlab_core::{pipeline, report};

#[derive(Parser)]
#[command(
    name = "aldlab",
    about = "ALD-Lab CLI — session-breakout backtesting engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backtest over an OHLCV CSV and export the trade tape.
    Run {
        /// Input CSV with columns Datetime, Open, High, Low, Close, Volume.
        #[arg(long)]
        input: PathBuf,

        /// TOML config file. Defaults apply for any field not set.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output path for the trade-tape CSV.
        #[arg(long, default_value = "trades.csv")]
        output: PathBuf,

        /// Also write the annotated series CSV here.
        #[arg(long)]
        series: Option<PathBuf>,

        /// Also write the full run result as JSON here.
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            input,
            config,
            output,
            series,
            json,
        } => run_command(input, config, output, series, json),
    }
}

fn run_command(
    input: PathBuf,
    config_path: Option<PathBuf>,
    output: PathBuf,
    series_path: Option<PathBuf>,
    json_path: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            BacktestConfig::from_toml(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => BacktestConfig::default(),
    };

    let bars = load_bars(&input)?;
    if bars.is_empty() {
        bail!("{}: no usable rows after cleaning", input.display());
    }
    let bar_count = bars.len();

    let result = pipeline::run(bars, &config)
        .with_context(|| format!("backtest failed for {}", input.display()))?;

    fs::write(&output, report::export_trades_csv(&result.trades)?)
        .with_context(|| format!("failed to write {}", output.display()))?;
    if let Some(path) = series_path {
        fs::write(&path, report::export_series_csv(&result.series)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if let Some(path) = json_path {
        fs::write(&path, report::export_json(&result)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    print_summary(&result, bar_count, &output);
    Ok(())
}

fn print_summary(result: &pipeline::RunResult, input_bars: usize, output: &PathBuf) {
    let (target_hits, stop_hits, unresolved) = result.outcome_counts();
    println!("run {}", &result.fingerprint[..16]);
    println!(
        "  bars: {} in, {} after warm-up",
        input_bars,
        result.series.len()
    );
    println!(
        "  trades: {} ({} TP, {} SL, {} unresolved), {} skipped",
        result.trades.len(),
        target_hits,
        stop_hits,
        unresolved,
        result.skipped.len()
    );
    println!("  final equity: {:.2}", result.final_equity());
    println!("  trade tape written to {}", output.display());
}

/// Datetime formats accepted in the input CSV.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Load and clean an OHLCV CSV.
///
/// Column lookup is by header name (case-insensitive). Rows with missing
/// or unparseable fields are dropped; duplicate timestamps aggregate as
/// first open / max high / min low / last close / summed volume; the
/// output is sorted by timestamp.
fn load_bars(path: &PathBuf) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let col = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .with_context(|| format!("{}: missing required column '{name}'", path.display()))
    };
    let dt_col = col("Datetime")?;
    let open_col = col("Open")?;
    let high_col = col("High")?;
    let low_col = col("Low")?;
    let close_col = col("Close")?;
    let vol_col = col("Volume")?;

    let mut bars: Vec<Bar> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(timestamp) = parse_datetime(record.get(dt_col).unwrap_or("")) else {
            continue;
        };
        let fields = [open_col, high_col, low_col, close_col, vol_col]
            .map(|i| {
                record
                    .get(i)
                    .and_then(|s| s.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite())
            });
        let [Some(open), Some(high), Some(low), Some(close), Some(volume)] = fields else {
            continue;
        };
        bars.push(Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    bars.sort_by_key(|b| b.timestamp);

    // Aggregate duplicate timestamps in place.
    let mut cleaned: Vec<Bar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match cleaned.last_mut() {
            Some(prev) if prev.timestamp == bar.timestamp => {
                prev.high = prev.high.max(bar.high);
                prev.low = prev.low.min(bar.low);
                prev.close = bar.close;
                prev.volume += bar.volume;
            }
            _ => cleaned.push(bar),
        }
    }
    Ok(cleaned)
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}
