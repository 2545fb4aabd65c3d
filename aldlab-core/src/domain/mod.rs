//! Domain types: bars, sessions, trade records.

pub mod bar;
pub mod session;
pub mod trade;

pub use bar::Bar;
pub use session::Session;
pub use trade::{Direction, Outcome, TradeRecord};
