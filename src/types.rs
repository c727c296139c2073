//! Newtype wrappers for the solver's tuning parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default discount factor, chosen empirically for the dice-game domain the
/// solver was originally tuned on.
pub const DEFAULT_DISCOUNT: f64 = 0.958;

/// Default convergence threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// Default maximum number of sweeps before the solver reports non-convergence.
pub const DEFAULT_SWEEP_CAP: usize = 10_000;

/// Discount factor γ applied to future rewards.
///
/// Must lie strictly inside (0, 1): a discount of exactly 1 would void the
/// contraction guarantee that makes value iteration terminate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Discount(f64);

impl Discount {
    /// Create a new discount factor, validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDiscount`] if the value is not strictly
    /// between 0 and 1.
    pub fn new(value: f64) -> Result<Self, crate::Error> {
        if value > 0.0 && value < 1.0 {
            Ok(Discount(value))
        } else {
            Err(crate::Error::InvalidDiscount { value })
        }
    }

    /// Get the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount(DEFAULT_DISCOUNT)
    }
}

impl From<Discount> for f64 {
    fn from(discount: Discount) -> Self {
        discount.0
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Convergence threshold θ: the per-sweep value change below which the value
/// table is considered converged.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Threshold(f64);

impl Threshold {
    /// Create a new threshold, validating it's positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidThreshold`] if the value is not a
    /// positive finite number.
    pub fn new(value: f64) -> Result<Self, crate::Error> {
        if value > 0.0 && value.is_finite() {
            Ok(Threshold(value))
        } else {
            Err(crate::Error::InvalidThreshold { value })
        }
    }

    /// Get the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold(DEFAULT_THRESHOLD)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
