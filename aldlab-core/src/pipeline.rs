//! Pipeline orchestration: input validation, indicator computation,
//! warm-up trimming, and the stage sequence through to the trade tape.
//!
//! The stages run strictly left to right, once per run, each reading the
//! columns the previous ones attached. A run owns its series exclusively;
//! the whole computation is synchronous and deterministic, so identical
//! input and config produce bit-identical output.

use serde::{Deserialize, Serialize};

use crate::config::BacktestConfig;
use crate::domain::{Bar, Session, TradeRecord};
use crate::error::{InputError, PipelineError};
use crate::indicators;
use crate::levels::FibLevels;
use crate::profile::VolumeProfile;
use crate::session_range::SessionRange;
use crate::signals::{self, Signal, SignalContext};
use crate::sim::{self, SkippedTrade};

/// The annotated series: warm-trimmed bars plus every per-bar column the
/// stages attach. All columns are the same length as `bars`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarSeries {
    pub bars: Vec<Bar>,
    pub ema_fast: Vec<f64>,
    pub ema_slow: Vec<f64>,
    pub sma: Vec<f64>,
    pub atr: Vec<f64>,
    pub rsi: Vec<f64>,
    pub vwap: Vec<f64>,
    pub session: Vec<Session>,
    pub ref_high: Vec<f64>,
    pub ref_low: Vec<f64>,
    pub breakout_above: Vec<bool>,
    pub breakout_below: Vec<bool>,
    pub hvn: Vec<bool>,
    pub lvn: Vec<bool>,
    pub signal: Vec<Signal>,
}

impl BarSeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub series: BarSeries,
    pub trades: Vec<TradeRecord>,
    pub skipped: Vec<SkippedTrade>,
    /// Whole-series Fibonacci levels for charting; `None` on an empty series.
    pub levels: Option<FibLevels>,
    pub config: BacktestConfig,
    /// blake3 of (config, input bars): identical runs share a fingerprint.
    pub fingerprint: String,
}

impl RunResult {
    pub fn final_equity(&self) -> f64 {
        self.trades
            .last()
            .map(|t| t.equity)
            .unwrap_or(self.config.account_size)
    }

    pub fn outcome_counts(&self) -> (usize, usize, usize) {
        use crate::domain::Outcome;
        let mut counts = (0, 0, 0);
        for t in &self.trades {
            match t.outcome {
                Outcome::TargetHit => counts.0 += 1,
                Outcome::StopHit => counts.1 += 1,
                Outcome::Unresolved => counts.2 += 1,
            }
        }
        counts
    }
}

/// Validate the raw input before any stage runs.
///
/// The caller (loader) is responsible for dedup/aggregation and sorting;
/// this rejects anything that slipped through rather than repairing it.
pub fn validate_input(bars: &[Bar]) -> Result<(), InputError> {
    if bars.is_empty() {
        return Err(InputError::Empty);
    }
    for (i, bar) in bars.iter().enumerate() {
        if !bar.is_sane() {
            return Err(InputError::InsaneBar { index: i });
        }
        if i > 0 {
            if bar.timestamp == bars[i - 1].timestamp {
                return Err(InputError::DuplicateTimestamp { index: i });
            }
            if bar.timestamp < bars[i - 1].timestamp {
                return Err(InputError::OutOfOrder { index: i });
            }
        }
    }
    Ok(())
}

/// Run the full pipeline on a validated, cleaned input series.
pub fn run(bars: Vec<Bar>, config: &BacktestConfig) -> Result<RunResult, PipelineError> {
    config.validate()?;
    validate_input(&bars)?;
    let fingerprint = run_fingerprint(&bars, config);

    // Indicator stage on the full series, then the warm-up trim: every
    // later stage sees only bars on which all windowed indicators exist.
    let ema_fast = indicators::ema(&bars, config.ema_fast_span);
    let ema_slow = indicators::ema(&bars, config.ema_slow_span);
    let sma = indicators::sma(&bars, config.sma_window);
    let atr = indicators::atr_proxy(&bars, config.atr_window);
    let rsi = indicators::rsi(&bars, config.rsi_period);

    let start = (0..bars.len())
        .find(|&i| !sma[i].is_nan() && !atr[i].is_nan() && !rsi[i].is_nan())
        .unwrap_or(bars.len());

    let bars = bars[start..].to_vec();
    let ema_fast = ema_fast[start..].to_vec();
    let ema_slow = ema_slow[start..].to_vec();
    let sma = sma[start..].to_vec();
    let atr = atr[start..].to_vec();
    let rsi = rsi[start..].to_vec();

    // A series trimmed to nothing is valid: zero bars, zero trades.
    let vwap = indicators::vwap(&bars);
    let (_profile, hvn, lvn) = VolumeProfile::build(&bars, config.bucket_count, config.node_count);
    let levels = FibLevels::from_bars(&bars);
    let sr = SessionRange::compute(&bars, &config.sessions);

    let signal = signals::generate_signals(
        &SignalContext {
            bars: &bars,
            vwap: &vwap,
            rsi: &rsi,
            ema_slow: &ema_slow,
            hvn: &hvn,
            lvn: &lvn,
            breakout_above: &sr.breakout_above,
            breakout_below: &sr.breakout_below,
        },
        config.rsi_overbought,
        config.rsi_oversold,
    );

    let (trades, skipped) = sim::simulate(&bars, &signal, &atr, config);

    let series = BarSeries {
        bars,
        ema_fast,
        ema_slow,
        sma,
        atr,
        rsi,
        vwap,
        session: sr.session,
        ref_high: sr.ref_high,
        ref_low: sr.ref_low,
        breakout_above: sr.breakout_above,
        breakout_below: sr.breakout_below,
        hvn,
        lvn,
        signal,
    };

    Ok(RunResult {
        series,
        trades,
        skipped,
        levels,
        config: config.clone(),
        fingerprint,
    })
}

/// Content hash over the config and the input bars.
fn run_fingerprint(bars: &[Bar], config: &BacktestConfig) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(config.fingerprint().as_bytes());
    let input = serde_json::to_vec(bars).expect("Bar serialization cannot fail");
    hasher.update(&input);
    hasher.finalize().to_hex().to_string()
}
