//! Average True Range proxy.
//!
//! Rolling mean of (high - low) over the window. This deliberately ignores
//! gap true range (|high - prev close| / |low - prev close|): the range
//! proxy is the volatility measure the stop model is calibrated against.
//! NaN until the window fills.

use crate::domain::Bar;

pub fn atr_proxy(bars: &[Bar], window: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 || n < window {
        return result;
    }

    let mut sum: f64 = bars.iter().take(window).map(|b| b.high - b.low).sum();
    result[window - 1] = sum / window as f64;
    for i in window..n {
        sum += (bars[i].high - bars[i].low) - (bars[i - window].high - bars[i - window].low);
        result[i] = sum / window as f64;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};
    use crate::domain::Bar;
    use chrono::NaiveDate;

    fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| Bar {
                timestamp: base + chrono::Duration::hours(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn atr_proxy_3_known_values() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),  // range 10
            (102.0, 108.0, 100.0, 106.0), // range 8
            (106.0, 107.0, 98.0, 99.0),   // range 9
            (99.0, 103.0, 97.0, 101.0),   // range 6
        ]);
        let result = atr_proxy(&bars, 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 9.0, DEFAULT_EPSILON);
        assert_approx(result[3], 23.0 / 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_proxy_ignores_gaps() {
        // Gap up between bars; the proxy sees only each bar's own range.
        let bars = make_ohlc_bars(&[
            (98.0, 102.0, 97.0, 100.0),   // range 5
            (110.0, 115.0, 108.0, 112.0), // range 7 (gap ignored)
        ]);
        let result = atr_proxy(&bars, 2);
        assert_approx(result[1], 6.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_proxy_flat_bars_is_zero() {
        let bars = make_ohlc_bars(&[(100.0, 100.0, 100.0, 100.0); 4]);
        let result = atr_proxy(&bars, 2);
        assert_approx(result[3], 0.0, DEFAULT_EPSILON);
    }
}
