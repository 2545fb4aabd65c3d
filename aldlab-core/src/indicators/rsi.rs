//! Relative Strength Index (RSI), rolling-mean variant.
//!
//! Price diffs split into gains and losses, each averaged over a plain
//! trailing window (not Wilder smoothing). RSI = 100 - 100/(1 + RS) with
//! RS = avg gain / avg loss. Zero average loss is the defined limit
//! RSI = 100, never a division error. Defined from index `period`
//! (the first `period` diffs need `period + 1` bars).

use crate::domain::Bar;

pub fn rsi(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period + 1 {
        return result;
    }

    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let diff = bars[i].close - bars[i - 1].close;
        if diff > 0.0 {
            gains[i] = diff;
        } else {
            losses[i] = -diff;
        }
    }

    // Trailing sums over the diff columns; diffs start at index 1.
    let mut gain_sum: f64 = gains[1..=period].iter().sum();
    let mut loss_sum: f64 = losses[1..=period].iter().sum();
    result[period] = rsi_value(gain_sum, loss_sum, period);
    for i in (period + 1)..n {
        gain_sum += gains[i] - gains[i - period];
        loss_sum += losses[i] - losses[i - period];
        result[i] = rsi_value(gain_sum, loss_sum, period);
    }
    result
}

fn rsi_value(gain_sum: f64, loss_sum: f64, period: usize) -> f64 {
    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;
    if avg_loss == 0.0 {
        // RS → ∞; the defined limit, including the all-flat case.
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn rsi_all_gains_is_100() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = rsi(&bars, 3);
        assert_approx(result[3], 100.0, 1e-9);
        assert_approx(result[5], 100.0, 1e-9);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let bars = make_bars(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = rsi(&bars, 3);
        assert_approx(result[3], 0.0, 1e-9);
    }

    #[test]
    fn rsi_flat_series_takes_zero_loss_limit() {
        let bars = make_bars(&[100.0; 6]);
        let result = rsi(&bars, 3);
        assert_approx(result[3], 100.0, 1e-9);
        assert_approx(result[5], 100.0, 1e-9);
    }

    #[test]
    fn rsi_mixed_known_value() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Diffs: +0.34, -0.25, -0.48, +0.72
        // period 3 at index 3: gains 0.34, losses 0.73
        // RSI = 100 - 100/(1 + 0.34/0.73) ≈ 31.776
        let bars = make_bars(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        let result = rsi(&bars, 3);
        assert!(result[2].is_nan());
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        for (i, &v) in rsi(&bars, 3).iter().enumerate() {
            if !v.is_nan() {
                assert!(
                    (0.0..=100.0).contains(&v),
                    "RSI out of bounds at bar {i}: {v}"
                );
            }
        }
    }

    #[test]
    fn rsi_warmup_prefix() {
        let bars = make_bars(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = rsi(&bars, 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(!result[3].is_nan());
    }
}
