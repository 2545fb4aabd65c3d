//! Error types for the pipeline.
//!
//! Input and configuration problems abort a run before any stage executes.
//! Everything downstream of validation is total: degenerate price ranges
//! collapse to a single profile bucket, RSI's zero-loss case is a defined
//! limit, and unsizeable trades become `SkippedTrade` entries in the run
//! result rather than failures.

use thiserror::Error;

/// Rejection of the input series before any stage runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("input series is empty")]
    Empty,
    #[error("timestamps not strictly ascending at row {index}")]
    OutOfOrder { index: usize },
    #[error("duplicate timestamp at row {index} (upstream dedup expected)")]
    DuplicateTimestamp { index: usize },
    #[error("bar at row {index} fails OHLCV sanity (high/low bounds or NaN)")]
    InsaneBar { index: usize },
}

/// Rejection of a run configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("account_size must be > 0, got {0}")]
    AccountSize(f64),
    #[error("risk_fraction must be in (0, 1], got {0}")]
    RiskFraction(f64),
    #[error("bucket_count must be >= 2, got {0}")]
    BucketCount(usize),
    #[error("indicator window must be >= 1: {name} = {value}")]
    Window { name: &'static str, value: usize },
    #[error("rsi thresholds must satisfy 0 < oversold < overbought < 100")]
    RsiThresholds,
    #[error("session boundaries must satisfy 0 < reference_end < second_end < 24")]
    SessionBounds,
    #[error("{name} must be > 0, got {value}")]
    Multiplier { name: &'static str, value: f64 },
}

/// Why a signal bar produced no trade record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("risk distance is zero (entry equals stop)")]
    ZeroRiskDistance,
    #[error("stop or risk distance is not finite")]
    NonFiniteRisk,
}

/// Errors from a full pipeline run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("input error: {0}")]
    Input(#[from] InputError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
