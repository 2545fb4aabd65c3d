//! Session tagging, running reference range, and breakout flags.
//!
//! A single left-to-right scan: bars inside the reference session
//! accumulate a running max-high / min-low; every bar carries the last
//! accumulated pair forward (NaN before the first reference bar). The
//! accumulator resets when a new reference-session run begins, so each
//! day's accumulation window forms a fresh range.
//!
//! Breakouts are lagged one bar: bar `i` breaks out above when its high
//! strictly exceeds the reference high carried on bar `i - 1`. This
//! evaluates against the established range, not the one still forming on
//! the same bar.

use chrono::Timelike;

use crate::domain::session::{Session, SessionBounds};
use crate::domain::Bar;

/// Per-bar session and reference-range columns.
#[derive(Debug, Clone)]
pub struct SessionRange {
    pub session: Vec<Session>,
    /// Forward-filled running reference high; NaN until the first
    /// reference-session bar.
    pub ref_high: Vec<f64>,
    /// Forward-filled running reference low; NaN until the first
    /// reference-session bar.
    pub ref_low: Vec<f64>,
    pub breakout_above: Vec<bool>,
    pub breakout_below: Vec<bool>,
}

impl SessionRange {
    pub fn compute(bars: &[Bar], bounds: &SessionBounds) -> SessionRange {
        let n = bars.len();
        let mut session = Vec::with_capacity(n);
        let mut ref_high = vec![f64::NAN; n];
        let mut ref_low = vec![f64::NAN; n];

        // (running high, running low) of the current/last reference run.
        let mut range: Option<(f64, f64)> = None;
        let mut prev_was_reference = false;

        for (i, bar) in bars.iter().enumerate() {
            let s = bounds.classify(bar.timestamp.hour());
            if s.is_reference() {
                range = match range {
                    Some((h, l)) if prev_was_reference => {
                        Some((h.max(bar.high), l.min(bar.low)))
                    }
                    // A new reference run starts a fresh accumulation.
                    _ => Some((bar.high, bar.low)),
                };
            }
            if let Some((h, l)) = range {
                ref_high[i] = h;
                ref_low[i] = l;
            }
            prev_was_reference = s.is_reference();
            session.push(s);
        }

        let mut breakout_above = vec![false; n];
        let mut breakout_below = vec![false; n];
        for i in 1..n {
            if ref_high[i - 1].is_finite() {
                breakout_above[i] = bars[i].high > ref_high[i - 1];
                breakout_below[i] = bars[i].low < ref_low[i - 1];
            }
        }

        SessionRange {
            session,
            ref_high,
            ref_low,
            breakout_above,
            breakout_below,
        }
    }
}
