//! Trade simulator: stop/target placement, fixed-risk sizing, same-bar
//! outcome resolution, and running equity.
//!
//! Resolution examines only the signal bar's own high/low — no forward
//! scan to later bars. When a bar's range touches both thresholds the
//! target wins the tie; that single rule holds for every trade. Position
//! size always comes from the *configured* account size, never from the
//! running equity, which is carried for reporting only.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::{BacktestConfig, StopModel};
use crate::domain::{Bar, Direction, Outcome, TradeRecord};
use crate::error::SkipReason;
use crate::signals::Signal;

/// A signal bar whose trade could not be sized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTrade {
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub direction: Direction,
    #[serde(skip)]
    pub reason: Option<SkipReason>,
}

/// Simulate every Long/Short signal bar in order.
///
/// `atr` is the ATR-proxy column aligned with `bars`; it is only read when
/// the configured stop model is `AtrMultiple`.
pub fn simulate(
    bars: &[Bar],
    signals: &[Signal],
    atr: &[f64],
    config: &BacktestConfig,
) -> (Vec<TradeRecord>, Vec<SkippedTrade>) {
    debug_assert_eq!(bars.len(), signals.len());
    debug_assert_eq!(bars.len(), atr.len());

    let mut trades = Vec::new();
    let mut skipped = Vec::new();
    let mut equity = config.account_size;

    for (i, (bar, signal)) in bars.iter().zip(signals).enumerate() {
        let direction = match signal {
            Signal::Long => Direction::Long,
            Signal::Short => Direction::Short,
            Signal::NoTrade => continue,
        };

        let entry = bar.close;
        let stop = stop_price(bar, direction, atr[i], config.stop_model);
        let risk = (entry - stop).abs();

        if let Some(reason) = sizing_problem(stop, risk) {
            skipped.push(SkippedTrade {
                index: i,
                timestamp: bar.timestamp,
                direction,
                reason: Some(reason),
            });
            continue;
        }

        let target = match direction {
            Direction::Long => entry + risk * config.reward_multiple,
            Direction::Short => entry - risk * config.reward_multiple,
        };
        let size = config.account_size * config.risk_fraction / risk;

        let (outcome, exit) = resolve(bar, direction, stop, target);
        let pnl = match direction {
            Direction::Long => (exit - entry) * size,
            Direction::Short => (entry - exit) * size,
        };
        equity += pnl;

        trades.push(TradeRecord {
            timestamp: bar.timestamp,
            direction,
            entry,
            stop,
            target,
            size,
            risk_reward: config.reward_multiple,
            outcome,
            pnl,
            equity,
        });
    }

    (trades, skipped)
}

fn stop_price(bar: &Bar, direction: Direction, atr: f64, model: StopModel) -> f64 {
    match (model, direction) {
        (StopModel::AtrMultiple { multiplier }, Direction::Long) => bar.close - multiplier * atr,
        (StopModel::AtrMultiple { multiplier }, Direction::Short) => bar.close + multiplier * atr,
        (StopModel::FixedOffset { offset }, Direction::Long) => bar.low - offset,
        (StopModel::FixedOffset { offset }, Direction::Short) => bar.high + offset,
    }
}

fn sizing_problem(stop: f64, risk: f64) -> Option<SkipReason> {
    if !stop.is_finite() || !risk.is_finite() {
        Some(SkipReason::NonFiniteRisk)
    } else if risk == 0.0 {
        Some(SkipReason::ZeroRiskDistance)
    } else {
        None
    }
}

/// Same-bar resolution. Target-hit takes priority when the bar's range
/// touches both thresholds.
fn resolve(bar: &Bar, direction: Direction, stop: f64, target: f64) -> (Outcome, f64) {
    let (hit_target, hit_stop) = match direction {
        Direction::Long => (bar.high >= target, bar.low <= stop),
        Direction::Short => (bar.low <= target, bar.high >= stop),
    };
    if hit_target {
        (Outcome::TargetHit, target)
    } else if hit_stop {
        (Outcome::StopHit, stop)
    } else {
        (Outcome::Unresolved, bar.close)
    }
}
