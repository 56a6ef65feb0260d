//! Closed-loop step simulation and response metrics.
//!
//! [`simulate`] is the main entry point: it composes the PID controller
//! selected by a gain triple with a plant, closes a unity feedback loop,
//! samples the unit step response on a caller-supplied [`TimeGrid`] and
//! extracts the four headline metrics. [`run_sweep`] repeats that for many
//! gain triples in parallel.
//!
//! [`TimeGrid`]: ps_core::TimeGrid

pub mod config;
pub mod error;
pub mod metrics;
pub mod simulate;
pub mod sweep;

pub use config::SimConfig;
pub use error::{MetricsError, SimError, SimResult};
pub use metrics::{
    MetricKey, MetricsOptions, MetricsRecord, MetricsStatus, StepInfo, extract_metrics,
    steady_state_error, step_info,
};
pub use simulate::{Simulation, closed_loop_system, simulate, simulate_with};
pub use sweep::{GainSweep, SweepPoint, run_sweep};
