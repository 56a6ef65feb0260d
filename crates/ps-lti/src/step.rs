//! Unit step response on a caller-supplied time grid.

use nalgebra::DVector;
use ps_core::{Real, TimeGrid};

use crate::error::{LtiError, LtiResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::state_space::{ConstantInput, StateSpace};
use crate::transfer_function::TransferFunction;

/// Integrator selection for step simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, 4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, 1 rhs call per step).
    ForwardEuler,
}

/// Options for step-response simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverOptions {
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
    /// Upper bound on `h * ||A||_inf` for each internal sub-step
    pub stability_factor: Real,
    /// Maximum internal sub-steps between two grid samples
    pub max_substeps: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            integrator: IntegratorType::default(),
            stability_factor: 0.5,
            max_substeps: 100_000,
        }
    }
}

impl SolverOptions {
    fn validate(&self) -> LtiResult<()> {
        if !(self.stability_factor > 0.0 && self.stability_factor.is_finite()) {
            return Err(LtiError::InvalidArg {
                what: "stability_factor must be positive and finite",
            });
        }
        if self.max_substeps == 0 {
            return Err(LtiError::InvalidArg {
                what: "max_substeps must be positive",
            });
        }
        Ok(())
    }
}

/// Sampled step response: one value per grid instant.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResponse {
    t: Vec<Real>,
    y: Vec<Real>,
}

impl StepResponse {
    /// Pair sampled values with their instants.
    pub fn new(t: Vec<Real>, y: Vec<Real>) -> LtiResult<Self> {
        if t.len() != y.len() {
            return Err(LtiError::LengthMismatch {
                response: y.len(),
                grid: t.len(),
            });
        }
        if t.is_empty() {
            return Err(LtiError::InvalidArg {
                what: "step response must not be empty",
            });
        }
        Ok(Self { t, y })
    }

    pub fn times(&self) -> &[Real] {
        &self.t
    }

    pub fn values(&self) -> &[Real] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Always false; responses are built from non-empty grids.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Last sampled value.
    pub fn final_value(&self) -> Real {
        self.y[self.y.len() - 1]
    }

    /// `(time, value)` pairs in grid order.
    pub fn points(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.t.iter().copied().zip(self.y.iter().copied())
    }
}

/// Simulate the response of `system` to a unit step applied at `grid.start()`.
///
/// The state starts at zero, so the first sample equals the direct
/// feedthrough. Each grid interval is split into equal sub-steps small
/// enough for the selected integrator to stay stable on the system's
/// fastest mode, and every output lands exactly on a grid instant.
///
/// # Errors
///
/// `Improper` when the system cannot be realized, `InvalidArg` for bad
/// solver options. Divergent (unstable) systems are not errors; their
/// samples may grow without bound or become non-finite.
pub fn step_response(
    system: &TransferFunction,
    grid: &TimeGrid,
    opts: &SolverOptions,
) -> LtiResult<StepResponse> {
    opts.validate()?;
    let ss = StateSpace::from_transfer_function(system)?;

    match opts.integrator {
        IntegratorType::RK4 => integrate_on_grid(&RK4, &ss, grid, opts),
        IntegratorType::ForwardEuler => integrate_on_grid(&ForwardEuler, &ss, grid, opts),
    }
}

fn integrate_on_grid<I: Integrator>(
    integrator: &I,
    ss: &StateSpace,
    grid: &TimeGrid,
    opts: &SolverOptions,
) -> LtiResult<StepResponse> {
    const U: Real = 1.0;

    let samples = grid.as_slice();
    let model = ConstantInput { system: ss, u: U };
    let norm = ss.a_inf_norm();

    tracing::debug!(
        order = ss.order(),
        a_norm = norm,
        points = samples.len(),
        "simulating step response"
    );

    let mut x = DVector::zeros(ss.order());
    let mut y = Vec::with_capacity(samples.len());
    y.push(ss.output(&x, U));

    let mut capped = 0_usize;
    for pair in samples.windows(2) {
        let (t0, t1) = (pair[0], pair[1]);
        let interval = t1 - t0;

        if interval > 0.0 && ss.order() > 0 {
            let wanted = (interval * norm / opts.stability_factor).ceil();
            let substeps = if wanted > opts.max_substeps as Real {
                capped += 1;
                opts.max_substeps
            } else {
                (wanted as usize).max(1)
            };
            let h = interval / substeps as Real;

            for k in 0..substeps {
                x = integrator.step(&model, t0 + k as Real * h, &x, h);
            }
        }

        y.push(ss.output(&x, U));
    }

    if capped > 0 {
        tracing::warn!(
            intervals = capped,
            max_substeps = opts.max_substeps,
            "sub-step limit reached; step response may be inaccurate"
        );
    }

    StepResponse::new(samples.to_vec(), y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_order() -> TransferFunction {
        // 1 / (s + 1)
        TransferFunction::new(vec![1.0], vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn solver_options_defaults() {
        let opts = SolverOptions::default();
        assert_eq!(opts.integrator, IntegratorType::RK4);
        assert_eq!(opts.stability_factor, 0.5);
        assert_eq!(opts.max_substeps, 100_000);
    }

    #[test]
    fn rejects_invalid_options() {
        let grid = TimeGrid::linspace(0.0, 1.0, 11).unwrap();
        let bad = SolverOptions {
            stability_factor: 0.0,
            ..SolverOptions::default()
        };
        assert!(matches!(
            step_response(&first_order(), &grid, &bad),
            Err(LtiError::InvalidArg { .. })
        ));

        let bad = SolverOptions {
            max_substeps: 0,
            ..SolverOptions::default()
        };
        assert!(step_response(&first_order(), &grid, &bad).is_err());
    }

    #[test]
    fn first_order_matches_analytic_solution() {
        let grid = TimeGrid::linspace(0.0, 5.0, 51).unwrap();
        let resp = step_response(&first_order(), &grid, &SolverOptions::default()).unwrap();

        assert_eq!(resp.len(), 51);
        for (t, y) in resp.points() {
            let exact = 1.0 - (-t).exp();
            assert!((y - exact).abs() < 1e-6, "t={t}: {y} vs {exact}");
        }
    }

    #[test]
    fn static_gain_is_flat() {
        let grid = TimeGrid::linspace(0.0, 1.0, 5).unwrap();
        let gain = TransferFunction::gain(2.5).unwrap();
        let resp = step_response(&gain, &grid, &SolverOptions::default()).unwrap();
        assert!(resp.values().iter().all(|&y| y == 2.5));
    }

    #[test]
    fn biproper_system_starts_at_feedthrough() {
        // (2 s + 1) / (s + 3): y(0) = 2, y(inf) = 1/3
        let tf = TransferFunction::new(vec![2.0, 1.0], vec![1.0, 3.0]).unwrap();
        let grid = TimeGrid::linspace(0.0, 10.0, 101).unwrap();
        let resp = step_response(&tf, &grid, &SolverOptions::default()).unwrap();

        assert_eq!(resp.values()[0], 2.0);
        assert!((resp.final_value() - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn repeated_instants_repeat_values() {
        let grid = TimeGrid::new(vec![0.0, 0.5, 0.5, 1.0]).unwrap();
        let resp = step_response(&first_order(), &grid, &SolverOptions::default()).unwrap();
        assert_eq!(resp.values()[1], resp.values()[2]);
    }

    #[test]
    fn improper_system_is_structural_error() {
        let grid = TimeGrid::linspace(0.0, 1.0, 5).unwrap();
        let pd = TransferFunction::new(vec![1.0, 10.0], vec![1.0]).unwrap();
        assert!(matches!(
            step_response(&pd, &grid, &SolverOptions::default()),
            Err(LtiError::Improper { .. })
        ));
    }

    #[test]
    fn substep_cap_still_returns_full_length() {
        let grid = TimeGrid::linspace(0.0, 1.0, 3).unwrap();
        let fast = TransferFunction::new(vec![1000.0], vec![1.0, 1000.0]).unwrap();
        let opts = SolverOptions {
            max_substeps: 2,
            ..SolverOptions::default()
        };
        let resp = step_response(&fast, &grid, &opts).unwrap();
        assert_eq!(resp.len(), 3);
    }

    #[test]
    fn step_response_length_mismatch_is_rejected() {
        assert_eq!(
            StepResponse::new(vec![0.0, 1.0], vec![0.0]),
            Err(LtiError::LengthMismatch {
                response: 1,
                grid: 2
            })
        );
    }
}
