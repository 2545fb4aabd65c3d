//! ALD-Lab Core — session-breakout signal generation and trade simulation.
//!
//! The crate is one deterministic pipeline over a single instrument's
//! intraday OHLCV series:
//! - Indicator stage (EMA, SMA, ATR proxy, RSI, VWAP) with warm-up trimming
//! - Volume profile with HVN/LVN bucket flags
//! - Session tagging, running reference range, lagged breakout detection
//! - Rule-based signal stage (Long / Short / NoTrade)
//! - Same-bar trade simulator with fixed-risk sizing and running equity
//!
//! Entry points: [`pipeline::run`] for one run, [`sweep::run_sweep`] for
//! parallel independent runs, [`report`] for CSV/JSON artifacts.

pub mod config;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod levels;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod session_range;
pub mod signals;
pub mod sim;
pub mod sweep;

pub use config::{BacktestConfig, StopModel};
pub use domain::{Bar, Direction, Outcome, Session, TradeRecord};
pub use error::{ConfigError, InputError, PipelineError, SkipReason};
pub use pipeline::{run, BarSeries, RunResult};
pub use signals::Signal;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types crossing the sweep boundary are
    /// Send + Sync, so independent runs can execute on rayon workers.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Bar>();
        require_sync::<Bar>();
        require_send::<BacktestConfig>();
        require_sync::<BacktestConfig>();
        require_send::<RunResult>();
        require_sync::<RunResult>();
        require_send::<TradeRecord>();
        require_sync::<TradeRecord>();
        require_send::<PipelineError>();
        require_sync::<PipelineError>();
    }
}
