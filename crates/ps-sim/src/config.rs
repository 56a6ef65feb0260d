//! Engine configuration.

use ps_lti::SolverOptions;

use crate::metrics::MetricsOptions;

/// Options shared by every simulation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimConfig {
    /// Step-response integrator settings
    pub solver: SolverOptions,
    /// Metrics detector thresholds
    pub metrics: MetricsOptions,
}
