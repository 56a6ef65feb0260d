//! Error types for controller construction.

use thiserror::Error;

/// Result type for controller operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while building a controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// A gain is NaN or infinite.
    #[error("Non-finite {which} gain: {value}")]
    NonFiniteGain { which: &'static str, value: f64 },

    #[error("Controller transfer function: {0}")]
    TransferFunction(#[from] ps_lti::LtiError),
}
