//! Trading-session classification by hour of day.

use serde::{Deserialize, Serialize};

/// The three intraday sessions. `Reference` is the accumulation window
/// whose running high/low forms the breakout range for the later sessions.
///
/// Default boundaries follow the FX convention the strategy was written
/// for: Asia [0,8), London [8,13), New York [13,24).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Session {
    Reference,
    Second,
    Third,
}

impl Session {
    pub fn is_reference(self) -> bool {
        matches!(self, Session::Reference)
    }

    pub fn label(self) -> &'static str {
        match self {
            Session::Reference => "Asia",
            Session::Second => "London",
            Session::Third => "New York",
        }
    }
}

/// Session hour boundaries over a 24-hour clock, half-open:
/// [0, reference_end) / [reference_end, second_end) / [second_end, 24).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBounds {
    pub reference_end: u32,
    pub second_end: u32,
}

impl Default for SessionBounds {
    fn default() -> Self {
        Self {
            reference_end: 8,
            second_end: 13,
        }
    }
}

impl SessionBounds {
    /// Classify an hour-of-day (0..=23) into its session.
    pub fn classify(&self, hour: u32) -> Session {
        if hour < self.reference_end {
            Session::Reference
        } else if hour < self.second_end {
            Session::Second
        } else {
            Session::Third
        }
    }

    pub fn is_valid(&self) -> bool {
        self.reference_end > 0 && self.reference_end < self.second_end && self.second_end < 24
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_boundaries() {
        let bounds = SessionBounds::default();
        assert_eq!(bounds.classify(0), Session::Reference);
        assert_eq!(bounds.classify(7), Session::Reference);
        assert_eq!(bounds.classify(8), Session::Second);
        assert_eq!(bounds.classify(12), Session::Second);
        assert_eq!(bounds.classify(13), Session::Third);
        assert_eq!(bounds.classify(23), Session::Third);
    }

    #[test]
    fn custom_boundaries() {
        let bounds = SessionBounds {
            reference_end: 6,
            second_end: 14,
        };
        assert_eq!(bounds.classify(5), Session::Reference);
        assert_eq!(bounds.classify(6), Session::Second);
        assert_eq!(bounds.classify(14), Session::Third);
        assert!(bounds.is_valid());
    }

    #[test]
    fn degenerate_bounds_rejected() {
        assert!(!SessionBounds { reference_end: 0, second_end: 13 }.is_valid());
        assert!(!SessionBounds { reference_end: 13, second_end: 13 }.is_valid());
        assert!(!SessionBounds { reference_end: 8, second_end: 24 }.is_valid());
    }
}
