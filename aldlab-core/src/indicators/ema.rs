//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1],
//! alpha = 2 / (span + 1). Seed: EMA[0] = close[0], so the column is
//! defined on every bar and never contributes to warm-up trimming.

use crate::domain::Bar;

pub fn ema(bars: &[Bar], span: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if n == 0 || span == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = bars[0].close;
    result[0] = prev;
    for i in 1..n {
        let value = alpha * bars[i].close + (1.0 - alpha) * prev;
        result[i] = value;
        prev = value;
    }
    result
}
