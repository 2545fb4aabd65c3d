//! Run configuration: risk model, indicator windows, rule thresholds.
//!
//! Configs are plain serde structs, loadable from TOML, validated once
//! before a run. A blake3 fingerprint of the serialized config identifies
//! a run for caching/comparison: two runs with identical configs and input
//! hashes produce bit-identical output.

use serde::{Deserialize, Serialize};

use crate::domain::session::SessionBounds;
use crate::error::ConfigError;

/// How the stop price is derived from the signal bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StopModel {
    /// Stop at `close -/+ multiplier * ATR` (long/short).
    AtrMultiple { multiplier: f64 },
    /// Stop at `low - offset` (long) / `high + offset` (short).
    FixedOffset { offset: f64 },
}

impl Default for StopModel {
    fn default() -> Self {
        StopModel::AtrMultiple { multiplier: 1.5 }
    }
}

/// Full configuration for one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    // ── Risk model ──
    pub account_size: f64,
    /// Fraction of the configured account size risked per trade.
    /// Sizing always uses `account_size`, never running equity.
    pub risk_fraction: f64,
    pub stop_model: StopModel,
    /// Target distance as a multiple of the risk distance.
    pub reward_multiple: f64,

    // ── Volume profile ──
    /// Number of equal-width price-bucket edges over [min low, max high].
    pub bucket_count: usize,
    /// How many top/bottom buckets form the HVN/LVN sets.
    pub node_count: usize,

    // ── Indicators ──
    pub ema_fast_span: usize,
    pub ema_slow_span: usize,
    pub sma_window: usize,
    pub atr_window: usize,
    pub rsi_period: usize,

    // ── Rule thresholds ──
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,

    // ── Sessions ──
    pub sessions: SessionBounds,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            account_size: 10_000.0,
            risk_fraction: 0.01,
            stop_model: StopModel::default(),
            reward_multiple: 2.0,
            bucket_count: 1000,
            node_count: 5,
            ema_fast_span: 20,
            ema_slow_span: 40,
            sma_window: 50,
            atr_window: 14,
            rsi_period: 14,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            sessions: SessionBounds::default(),
        }
    }
}

impl BacktestConfig {
    /// Validate every field. Called once by the pipeline before any stage.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.account_size > 0.0 && self.account_size.is_finite()) {
            return Err(ConfigError::AccountSize(self.account_size));
        }
        if !(self.risk_fraction > 0.0 && self.risk_fraction <= 1.0) {
            return Err(ConfigError::RiskFraction(self.risk_fraction));
        }
        if self.bucket_count < 2 {
            return Err(ConfigError::BucketCount(self.bucket_count));
        }
        for (name, value) in [
            ("ema_fast_span", self.ema_fast_span),
            ("ema_slow_span", self.ema_slow_span),
            ("sma_window", self.sma_window),
            ("atr_window", self.atr_window),
            ("rsi_period", self.rsi_period),
            ("node_count", self.node_count),
        ] {
            if value == 0 {
                return Err(ConfigError::Window { name, value });
            }
        }
        if !(0.0 < self.rsi_oversold
            && self.rsi_oversold < self.rsi_overbought
            && self.rsi_overbought < 100.0)
        {
            return Err(ConfigError::RsiThresholds);
        }
        if !self.sessions.is_valid() {
            return Err(ConfigError::SessionBounds);
        }
        if self.reward_multiple <= 0.0 {
            return Err(ConfigError::Multiplier {
                name: "reward_multiple",
                value: self.reward_multiple,
            });
        }
        match self.stop_model {
            StopModel::AtrMultiple { multiplier } if multiplier <= 0.0 => {
                Err(ConfigError::Multiplier {
                    name: "stop_model.multiplier",
                    value: multiplier,
                })
            }
            StopModel::FixedOffset { offset } if offset <= 0.0 => Err(ConfigError::Multiplier {
                name: "stop_model.offset",
                value: offset,
            }),
            _ => Ok(()),
        }
    }

    /// Parse a config from TOML. Missing fields take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// The longest warm-up any indicator needs: the index of the first bar
    /// on which SMA, ATR, and RSI are all defined.
    ///
    /// EMA is seeded from the first close and never contributes to warm-up.
    /// RSI needs `period` diffs, i.e. `period + 1` bars.
    pub fn warmup_bars(&self) -> usize {
        (self.sma_window - 1)
            .max(self.atr_window - 1)
            .max(self.rsi_period)
    }

    /// Content-addressed fingerprint of this configuration.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_vec(self).expect("BacktestConfig serialization cannot fail");
        blake3::hash(&json).to_hex().to_string()
    }
}
