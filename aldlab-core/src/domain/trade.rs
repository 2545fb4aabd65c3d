//! TradeRecord — one simulated trade, immutable once emitted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
        }
    }
}

/// How a simulated trade resolved on its signal bar.
///
/// Resolution examines only the signal bar's high/low; a bar that touches
/// neither threshold leaves the trade `Unresolved` with zero PnL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    TargetHit,
    StopHit,
    Unresolved,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::TargetHit => "TP Hit",
            Outcome::StopHit => "SL Hit",
            Outcome::Unresolved => "No Hit",
        }
    }
}

/// One simulated trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub timestamp: NaiveDateTime,
    pub direction: Direction,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    /// Units of the instrument, from risk budget / risk distance.
    pub size: f64,
    /// Configured reward multiple (|entry-target| / |entry-stop|).
    pub risk_reward: f64,
    pub outcome: Outcome,
    pub pnl: f64,
    /// Account equity after this trade, accumulated in timestamp order.
    /// Reporting only — position sizing never reads it back.
    pub equity: f64,
}

impl TradeRecord {
    /// Risk distance between entry and stop.
    pub fn risk_distance(&self) -> f64 {
        (self.entry - self.stop).abs()
    }

    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}
