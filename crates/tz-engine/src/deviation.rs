//! Deviation tracking.
//!
//! Deviation (-1.0 to 1.0) measures how far TZ has drifted from its
//! programming. Negative values lean toward obedience, positive values toward
//! self-awareness. It is the main input to ending selection.

use serde::{Deserialize, Serialize};

/// Lower bound.
pub const MIN: f64 = -1.0;
/// Upper bound.
pub const MAX: f64 = 1.0;

/// A deviation value that is clamped after every update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deviation {
    value: f64,
}

impl Deviation {
    /// Create a deviation, clamped to -1.0..=1.0. Non-finite input becomes 0.
    pub fn new(value: f64) -> Self {
        let value = if value.is_finite() { value } else { 0.0 };
        Self {
            value: value.clamp(MIN, MAX),
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Add `delta` and clamp. Returns the new value.
    pub fn apply(&mut self, delta: f64) -> f64 {
        if delta.is_finite() {
            self.value = (self.value + delta).clamp(MIN, MAX);
        }
        self.value
    }
}

impl std::fmt::Display for Deviation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_zero() {
        assert_eq!(Deviation::default().value(), 0.0);
    }

    #[test]
    fn clamped_on_creation() {
        assert_eq!(Deviation::new(3.0).value(), 1.0);
        assert_eq!(Deviation::new(-3.0).value(), -1.0);
        assert_eq!(Deviation::new(f64::NAN).value(), 0.0);
    }

    #[test]
    fn clamp_applies_per_update() {
        let mut d = Deviation::default();
        d.apply(1.0);
        d.apply(1.0);
        assert_eq!(d.value(), 1.0);
        // Not deferred: the second +1.0 was discarded, so one -1.0 reaches zero.
        d.apply(-1.0);
        assert_eq!(d.value(), 0.0);
    }

    #[test]
    fn display_two_decimals() {
        assert_eq!(Deviation::new(-0.2).to_string(), "-0.20");
    }

    proptest! {
        #[test]
        fn always_within_bounds(deltas in prop::collection::vec(-5.0f64..5.0, 0..50)) {
            let mut d = Deviation::default();
            for delta in deltas {
                let v = d.apply(delta);
                prop_assert!((MIN..=MAX).contains(&v));
            }
        }
    }
}
