//! Error types for linear-system operations.

use ps_core::CoreError;
use thiserror::Error;

/// Structural errors raised while building or simulating a linear system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LtiError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Denominator of {what} is the zero polynomial")]
    ZeroDenominator { what: &'static str },

    #[error(
        "Improper transfer function: numerator degree {num_degree} exceeds denominator degree {den_degree}"
    )]
    Improper {
        num_degree: usize,
        den_degree: usize,
    },

    #[error("Response length {response} does not match time grid length {grid}")]
    LengthMismatch { response: usize, grid: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type LtiResult<T> = Result<T, LtiError>;
