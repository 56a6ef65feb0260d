//! Fixed-step time integrators.

use nalgebra::DVector;
use ps_core::Real;

use crate::model::Dynamics;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step.
    fn step<M: Dynamics>(&self, model: &M, t: Real, x: &DVector<Real>, dt: Real) -> DVector<Real>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: Dynamics>(&self, model: &M, t: Real, x: &DVector<Real>, dt: Real) -> DVector<Real> {
        let k1 = model.rhs(t, x);

        let x2 = x + &k1 * (0.5 * dt);
        let k2 = model.rhs(t + 0.5 * dt, &x2);

        let x3 = x + &k2 * (0.5 * dt);
        let k3 = model.rhs(t + 0.5 * dt, &x3);

        let x4 = x + &k3 * dt;
        let k4 = model.rhs(t + dt, &x4);

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = k1 + k2 * 2.0 + k3 * 2.0 + k4;
        x + k_sum * (dt / 6.0)
    }
}

/// Forward Euler (explicit, 1st order).
/// Calls rhs() once per step instead of 4 times (RK4).
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: Dynamics>(&self, model: &M, t: Real, x: &DVector<Real>, dt: Real) -> DVector<Real> {
        let xdot = model.rhs(t, x);
        x + xdot * dt
    }
}
