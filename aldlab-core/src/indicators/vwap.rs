//! Volume-Weighted Average Price.
//!
//! Cumulative over the whole (warm-trimmed) series:
//! VWAP[t] = Σ volume * typical / Σ volume, typical = (H+L+C)/3.
//! NaN while cumulative volume is still zero.

use crate::domain::Bar;

pub fn vwap(bars: &[Bar]) -> Vec<f64> {
    let mut result = vec![f64::NAN; bars.len()];
    let mut pv_sum = 0.0;
    let mut vol_sum = 0.0;
    for (i, bar) in bars.iter().enumerate() {
        pv_sum += bar.volume * bar.typical();
        vol_sum += bar.volume;
        if vol_sum > 0.0 {
            result[i] = pv_sum / vol_sum;
        }
    }
    result
}
