//! Indicator columns.
//!
//! Each indicator is a pure function of the bar slice producing one `f64`
//! column aligned with the input: `NaN` marks the warm-up prefix where the
//! value is undefined. The pipeline trims every bar on which any warm-up
//! indicator is still `NaN` before the later stages run, so downstream code
//! only ever sees fully-warmed bars.
//!
//! EMA is seeded from the first close and is defined on every bar; SMA,
//! the ATR proxy, and RSI have warm-up windows. VWAP is cumulative and is
//! computed on the trimmed series.

pub mod atr;
pub mod ema;
pub mod rsi;
pub mod sma;
pub mod vwap;

pub use atr::atr_proxy;
pub use ema::ema;
pub use rsi::rsi;
pub use sma::sma;
pub use vwap::vwap;

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0, volume 1000,
/// one bar per hour starting at midnight.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + chrono::Duration::hours(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
