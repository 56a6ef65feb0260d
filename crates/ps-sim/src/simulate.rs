//! Closed-loop composition and step simulation.

use ps_controls::{ControllerKind, PidGains, build_controller};
use ps_core::{Real, TimeGrid};
use ps_lti::{StepResponse, TransferFunction, step_response};

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::metrics::{MetricsRecord, extract_metrics};

/// Outcome of one simulation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    /// Gains that produced this run
    pub gains: PidGains,
    /// Controller structure selected by the gains
    pub kind: ControllerKind,
    /// System actually simulated: the plant, or the closed loop
    pub system: TransferFunction,
    /// Unit step response on the caller's grid
    pub response: StepResponse,
    pub metrics: MetricsRecord,
}

impl Simulation {
    pub fn times(&self) -> &[Real] {
        self.response.times()
    }

    pub fn values(&self) -> &[Real] {
        self.response.values()
    }
}

/// The system to simulate for `gains`.
///
/// All-zero gains return the plant unchanged (open-loop baseline).
/// Otherwise the controller is placed in series with the plant and a unity
/// negative-feedback loop is closed around the product.
pub fn closed_loop_system(
    gains: PidGains,
    plant: &TransferFunction,
) -> SimResult<TransferFunction> {
    match build_controller(gains)? {
        None => Ok(plant.clone()),
        Some(controller) => Ok((&controller * plant)?.unity_feedback()?),
    }
}

/// Simulate with default solver and metrics settings.
pub fn simulate(
    gains: PidGains,
    plant: &TransferFunction,
    grid: &TimeGrid,
) -> SimResult<Simulation> {
    simulate_with(gains, plant, grid, &SimConfig::default())
}

/// Build the system for `gains`, simulate its unit step response on `grid`
/// and extract metrics.
///
/// # Errors
///
/// Only structural problems are returned: non-finite gains, a closed loop
/// with a zero denominator, or a system that cannot be realized. Metric
/// detection failures produce a degraded [`MetricsRecord`] instead.
pub fn simulate_with(
    gains: PidGains,
    plant: &TransferFunction,
    grid: &TimeGrid,
    cfg: &SimConfig,
) -> SimResult<Simulation> {
    let _span =
        tracing::info_span!("simulate", kp = gains.kp, ki = gains.ki, kd = gains.kd).entered();

    let system = closed_loop_system(gains, plant)?;
    let kind = gains.kind();
    tracing::debug!(%kind, %system, "simulating");

    let response = step_response(&system, grid, &cfg.solver)?;
    let metrics = extract_metrics(&system, grid, response.values(), &cfg.metrics);

    Ok(Simulation {
        gains,
        kind,
        system,
        response,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    fn plant() -> TransferFunction {
        TransferFunction::new(vec![5.0], vec![1.0, 11.0, 10.0]).unwrap()
    }

    #[test]
    fn off_gains_simulate_plant_directly() {
        let sys = closed_loop_system(PidGains::off(), &plant()).unwrap();
        assert_eq!(sys, plant());
    }

    #[test]
    fn pi_closed_loop_polynomials() {
        let sys = closed_loop_system(PidGains::pi(10.0, 40.0), &plant()).unwrap();
        assert_eq!(sys.num(), &[50.0, 200.0]);
        assert_eq!(sys.den(), &[1.0, 11.0, 60.0, 200.0]);
    }

    #[test]
    fn pid_closed_loop_polynomials() {
        let sys = closed_loop_system(PidGains::new(10.0, 40.0, 1.5), &plant()).unwrap();
        assert_eq!(sys.num(), &[7.5, 50.0, 200.0]);
        assert_eq!(sys.den(), &[1.0, 18.5, 60.0, 200.0]);
    }

    #[test]
    fn pd_closed_loop_keeps_plant_order() {
        let sys = closed_loop_system(PidGains::pd(10.0, 1.0), &plant()).unwrap();
        assert_eq!(sys.num(), &[5.0, 50.0]);
        assert_eq!(sys.den(), &[1.0, 16.0, 60.0]);
        assert_eq!(sys.order(), 2);
    }

    #[test]
    fn non_finite_gains_are_structural_errors() {
        let grid = TimeGrid::linspace(0.0, 1.0, 10).unwrap();
        let err = simulate(PidGains::new(Real::NAN, 0.0, 0.0), &plant(), &grid).unwrap_err();
        assert!(matches!(err, SimError::Gains(_)));
    }

    #[test]
    fn improper_plant_is_structural_error() {
        let grid = TimeGrid::linspace(0.0, 1.0, 10).unwrap();
        let improper = TransferFunction::new(vec![1.0, 0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let err = simulate(PidGains::off(), &improper, &grid).unwrap_err();
        assert!(matches!(err, SimError::System(ps_lti::LtiError::Improper { .. })));
    }

    #[test]
    fn response_has_grid_length() {
        let grid = TimeGrid::linspace(0.0, 5.0, 500).unwrap();
        let sim = simulate(PidGains::p(10.0), &plant(), &grid).unwrap();
        assert_eq!(sim.values().len(), grid.len());
        assert_eq!(sim.times(), grid.as_slice());
        assert_eq!(sim.kind, ControllerKind::P);
    }
}
