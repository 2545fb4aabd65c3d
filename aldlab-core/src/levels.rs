//! Whole-series Fibonacci retracement levels.
//!
//! Computed once over [min low, max high] and attached to the annotated
//! series for the presentation layer; the signal rules do not read them.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// Retracement levels measured down from the series high.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibLevels {
    pub high: f64,
    pub low: f64,
    /// 38.2% retracement.
    pub fib_382: f64,
    /// 61.8% retracement.
    pub fib_618: f64,
    /// 78.6% retracement.
    pub fib_786: f64,
}

impl FibLevels {
    pub fn from_bars(bars: &[Bar]) -> Option<FibLevels> {
        if bars.is_empty() {
            return None;
        }
        let low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let diff = high - low;
        Some(FibLevels {
            high,
            low,
            fib_382: high - 0.382 * diff,
            fib_618: high - 0.618 * diff,
            fib_786: high - 0.786 * diff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn levels_span_the_observed_range() {
        let bars = make_bars(&[100.0, 120.0, 90.0, 110.0]);
        let levels = FibLevels::from_bars(&bars).unwrap();
        assert!(levels.high > levels.fib_382);
        assert!(levels.fib_382 > levels.fib_618);
        assert!(levels.fib_618 > levels.fib_786);
        assert!(levels.fib_786 > levels.low);
    }

    #[test]
    fn known_values() {
        let mut bars = make_bars(&[101.0, 199.0]);
        bars[0].low = 100.0;
        bars[0].high = 102.0;
        bars[1].low = 150.0;
        bars[1].high = 200.0;
        let levels = FibLevels::from_bars(&bars).unwrap();
        assert!((levels.fib_382 - (200.0 - 38.2)).abs() < 1e-9);
        assert!((levels.fib_618 - (200.0 - 61.8)).abs() < 1e-9);
    }

    #[test]
    fn empty_series_has_no_levels() {
        assert!(FibLevels::from_bars(&[]).is_none());
    }
}
