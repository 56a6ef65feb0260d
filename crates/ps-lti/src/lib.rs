//! Linear time-invariant system backend for pidscope.
//!
//! Provides:
//! - Dense polynomial algebra and a Routh-Hurwitz stability test
//! - SISO transfer functions with series and unity-feedback composition
//! - Controllable canonical state-space realization
//! - Fixed-step RK4 / forward Euler integrators
//! - Unit step response sampled exactly on a caller-supplied time grid

pub mod error;
pub mod integrator;
pub mod model;
pub mod poly;
pub mod state_space;
pub mod step;
pub mod transfer_function;

// Re-exports for public API
pub use error::{LtiError, LtiResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::Dynamics;
pub use state_space::StateSpace;
pub use step::{IntegratorType, SolverOptions, StepResponse, step_response};
pub use transfer_function::TransferFunction;
