//! Result export — trade-tape CSV, annotated-series CSV, and JSON.
//!
//! The trade tape uses the presentation layer's fixed header
//! (`Datetime,Signal,Entry,SL,TP,Size,RR,Outcome,PnL,Equity`) with prices,
//! size, PnL, and equity rounded to two decimals at this boundary only;
//! the in-memory records keep full precision.

use anyhow::{Context, Result};

use crate::domain::TradeRecord;
use crate::pipeline::{BarSeries, RunResult};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serialize the trade tape as CSV with the compatibility header.
pub fn export_trades_csv(trades: &[TradeRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "Datetime", "Signal", "Entry", "SL", "TP", "Size", "RR", "Outcome", "PnL", "Equity",
    ])?;

    for t in trades {
        wtr.write_record([
            &t.timestamp.format(DATETIME_FORMAT).to_string(),
            t.direction.label(),
            &format!("{:.2}", t.entry),
            &format!("{:.2}", t.stop),
            &format!("{:.2}", t.target),
            &format!("{:.2}", t.size),
            &format!("{:.1}", t.risk_reward),
            t.outcome.label(),
            &format!("{:.2}", t.pnl),
            &format!("{:.2}", t.equity),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Serialize the annotated series as CSV for charting overlays.
///
/// NaN columns (e.g. VWAP before any volume) serialize as empty cells.
pub fn export_series_csv(series: &BarSeries) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "Datetime", "Open", "High", "Low", "Close", "Volume", "EMA_Fast", "EMA_Slow", "SMA",
        "ATR", "RSI", "VWAP", "Session", "Ref_High", "Ref_Low", "Breakout_Above",
        "Breakout_Below", "HVN", "LVN", "Signal",
    ])?;

    for i in 0..series.len() {
        let bar = &series.bars[i];
        wtr.write_record([
            &bar.timestamp.format(DATETIME_FORMAT).to_string(),
            &format!("{}", bar.open),
            &format!("{}", bar.high),
            &format!("{}", bar.low),
            &format!("{}", bar.close),
            &format!("{}", bar.volume),
            &fmt_opt(series.ema_fast[i]),
            &fmt_opt(series.ema_slow[i]),
            &fmt_opt(series.sma[i]),
            &fmt_opt(series.atr[i]),
            &fmt_opt(series.rsi[i]),
            &fmt_opt(series.vwap[i]),
            series.session[i].label(),
            &fmt_opt(series.ref_high[i]),
            &fmt_opt(series.ref_low[i]),
            &fmt_bool(series.breakout_above[i]),
            &fmt_bool(series.breakout_below[i]),
            &fmt_bool(series.hvn[i]),
            &fmt_bool(series.lvn[i]),
            series.signal[i].label(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Serialize a full run result to pretty JSON.
pub fn export_json(result: &RunResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize RunResult to JSON")
}

fn fmt_opt(value: f64) -> String {
    if value.is_finite() {
        format!("{value}")
    } else {
        String::new()
    }
}

fn fmt_bool(value: bool) -> String {
    (value as u8).to_string()
}
