//! Error types for the solver crate

use thiserror::Error;

/// Main error type for the solver crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("environment enumerated an empty state space")]
    EmptyStateSpace,

    #[error("environment enumerated an empty action collection")]
    EmptyActionSpace,

    #[error("discount factor {value} is outside the open interval (0, 1)")]
    InvalidDiscount { value: f64 },

    #[error("convergence threshold {value} must be positive and finite")]
    InvalidThreshold { value: f64 },

    #[error("sweep cap must be at least 1")]
    InvalidSweepCap,

    #[error("transition lists {states} next states but {probabilities} probabilities")]
    LengthMismatch {
        states: usize,
        probabilities: usize,
    },

    #[error("transition probabilities sum to {sum}, expected 1")]
    UnnormalizedDistribution { sum: f64 },

    #[error("unknown state '{state}' (not part of the enumerated state space)")]
    UnknownState { state: String },

    #[error("unknown action '{action}' (not part of the enumerated action collection)")]
    UnknownAction { action: String },

    #[error(
        "value iteration did not converge: delta {delta} still above threshold {threshold} after {sweeps} sweeps"
    )]
    DidNotConverge {
        sweeps: usize,
        delta: f64,
        threshold: f64,
    },

    #[error("environment error: {message}")]
    Environment { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
