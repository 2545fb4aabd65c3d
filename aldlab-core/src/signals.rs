//! Signal rules: per-bar evaluation of the short and long breakout-fade
//! conditions into a three-way categorical signal.
//!
//! Rule priority is fixed: the short rule is checked before the long rule;
//! the first match wins and the default is `NoTrade`. The stage is
//! stateless across bars.
//! Any comparison against a NaN column value is false, so a bar with an
//! undefined VWAP or RSI can never fire.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// The categorical per-bar signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    NoTrade,
    Long,
    Short,
}

impl Signal {
    pub fn label(self) -> &'static str {
        match self {
            Signal::NoTrade => "No Trade",
            Signal::Long => "Long",
            Signal::Short => "Short",
        }
    }

    pub fn is_trade(self) -> bool {
        !matches!(self, Signal::NoTrade)
    }
}

/// Column slices the rules read; all the same length as `bars`.
#[derive(Debug, Clone, Copy)]
pub struct SignalContext<'a> {
    pub bars: &'a [Bar],
    pub vwap: &'a [f64],
    pub rsi: &'a [f64],
    pub ema_slow: &'a [f64],
    pub hvn: &'a [bool],
    pub lvn: &'a [bool],
    pub breakout_above: &'a [bool],
    pub breakout_below: &'a [bool],
}

/// Evaluate both rules on every bar.
///
/// Short: breakout above the reference range, close under VWAP, bar in a
/// low-volume node, RSI overbought, close under the slow EMA — a fade of
/// an extended breakout into thin volume.
/// Long: the mirror image against the reference low, a high-volume node,
/// and an oversold RSI, with close above the slow EMA.
pub fn generate_signals(ctx: &SignalContext, overbought: f64, oversold: f64) -> Vec<Signal> {
    let n = ctx.bars.len();
    debug_assert!(
        [
            ctx.vwap.len(),
            ctx.rsi.len(),
            ctx.ema_slow.len(),
            ctx.hvn.len(),
            ctx.lvn.len(),
            ctx.breakout_above.len(),
            ctx.breakout_below.len(),
        ]
        .iter()
        .all(|&len| len == n)
    );

    (0..n)
        .map(|i| {
            let close = ctx.bars[i].close;
            let short = ctx.breakout_above[i]
                && ctx.vwap[i] > close
                && ctx.lvn[i]
                && ctx.rsi[i] > overbought
                && close < ctx.ema_slow[i];
            let long = ctx.breakout_below[i]
                && ctx.vwap[i] < close
                && ctx.hvn[i]
                && ctx.rsi[i] < oversold
                && close > ctx.ema_slow[i];
            // First matching rule wins; short is checked first.
            if short {
                Signal::Short
            } else if long {
                Signal::Long
            } else {
                Signal::NoTrade
            }
        })
        .collect()
}
