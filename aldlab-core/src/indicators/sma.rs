//! Simple Moving Average (SMA) of close.
//!
//! Arithmetic mean of the trailing window; NaN until the window fills.

use crate::domain::Bar;

pub fn sma(bars: &[Bar], window: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 || n < window {
        return result;
    }

    let mut sum: f64 = bars.iter().take(window).map(|b| b.close).sum();
    result[window - 1] = sum / window as f64;
    for i in window..n {
        sum += bars[i].close - bars[i - window].close;
        result[i] = sum / window as f64;
    }
    result
}
