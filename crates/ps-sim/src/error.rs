//! Error types for the simulation engine.

use thiserror::Error;

/// Structural failures that propagate out of the engine.
///
/// Metric-extraction failures are not listed here: they are absorbed into a
/// degraded [`MetricsRecord`](crate::MetricsRecord) instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid time grid: {0}")]
    TimeGrid(#[from] ps_core::CoreError),

    #[error("Invalid gains: {0}")]
    Gains(#[from] ps_controls::ControlError),

    #[error("Linear system error: {0}")]
    System(#[from] ps_lti::LtiError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Reasons the primary metrics detector could not produce a result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricsError {
    #[error("invalid metrics options: {what}")]
    InvalidOptions { what: &'static str },

    #[error("response is empty")]
    EmptyResponse,

    #[error("response has {response} samples but the time grid has {grid}")]
    LengthMismatch { response: usize, grid: usize },

    #[error("response contains non-finite value {value} at t={time}")]
    NonFiniteResponse { time: f64, value: f64 },

    #[error("system is not asymptotically stable")]
    Unstable,

    #[error("final value is undefined ({value})")]
    UndefinedFinalValue { value: f64 },

    #[error("final value is zero")]
    ZeroFinalValue,

    #[error("response never reaches {percent}% of the final value")]
    ThresholdNotReached { percent: f64 },

    #[error("response does not settle within the {percent}% band before the end of the horizon")]
    NotSettled { percent: f64 },
}
