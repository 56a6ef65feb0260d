//! Dynamics trait for pluggable continuous-time systems.

use nalgebra::DVector;
use ps_core::Real;

/// Trait for time-invariant or time-varying ODE right-hand sides.
///
/// A `Dynamics` implementation computes `x_dot = f(t, x)` for a state held in
/// a dense vector. Linear systems implement it through
/// [`ConstantInput`](crate::state_space::ConstantInput).
pub trait Dynamics {
    /// Compute state derivative dxdt = f(t, x).
    fn rhs(&self, t: Real, x: &DVector<Real>) -> DVector<Real>;
}
