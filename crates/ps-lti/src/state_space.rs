//! State-space realization of SISO transfer functions.

use nalgebra::{DMatrix, DVector};
use ps_core::Real;

use crate::error::{LtiError, LtiResult};
use crate::model::Dynamics;
use crate::transfer_function::TransferFunction;

/// `x' = A x + B u`, `y = C x + D u`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace {
    pub a: DMatrix<Real>,
    pub b: DVector<Real>,
    pub c: DVector<Real>,
    pub d: Real,
}

impl StateSpace {
    /// Controllable canonical (companion) realization.
    ///
    /// The denominator is made monic; a biproper system contributes its
    /// direct feedthrough to `D` and the remainder to `C`.
    ///
    /// # Errors
    ///
    /// `Improper` when the numerator degree exceeds the denominator degree.
    pub fn from_transfer_function(tf: &TransferFunction) -> LtiResult<Self> {
        if !tf.is_proper() {
            return Err(LtiError::Improper {
                num_degree: tf.num_degree(),
                den_degree: tf.den_degree(),
            });
        }

        let lead = tf.den()[0];
        let den: Vec<Real> = tf.den().iter().map(|c| c / lead).collect();
        let n = den.len() - 1;

        // Pad numerator to n + 1 coefficients so index k pairs with den[k].
        let mut num = vec![0.0; n + 1 - tf.num().len()];
        num.extend(tf.num().iter().map(|c| c / lead));

        let d = num[0];

        let mut a = DMatrix::zeros(n, n);
        for i in 0..n.saturating_sub(1) {
            a[(i, i + 1)] = 1.0;
        }
        for j in 0..n {
            a[(n - 1, j)] = -den[n - j];
        }

        let mut b = DVector::zeros(n);
        if n > 0 {
            b[n - 1] = 1.0;
        }

        // Strictly proper remainder after removing the feedthrough term.
        let c = DVector::from_iterator(n, (0..n).map(|j| num[n - j] - d * den[n - j]));

        Ok(Self { a, b, c, d })
    }

    /// Number of states.
    pub fn order(&self) -> usize {
        self.b.len()
    }

    /// Maximum absolute row sum of `A`, an upper bound on every eigenvalue magnitude.
    pub fn a_inf_norm(&self) -> Real {
        self.a
            .row_iter()
            .map(|row| row.iter().map(|v| v.abs()).sum::<Real>())
            .fold(0.0, Real::max)
    }

    /// Output equation for a given state and input.
    pub fn output(&self, x: &DVector<Real>, u: Real) -> Real {
        self.c.dot(x) + self.d * u
    }
}

/// A state-space system driven by a constant input.
pub struct ConstantInput<'a> {
    pub system: &'a StateSpace,
    pub u: Real,
}

impl Dynamics for ConstantInput<'_> {
    fn rhs(&self, _t: Real, x: &DVector<Real>) -> DVector<Real> {
        &self.system.a * x + &self.system.b * self.u
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn companion_form_of_second_order_plant() {
        let tf = TransferFunction::new(vec![5.0], vec![1.0, 11.0, 10.0]).unwrap();
        let ss = StateSpace::from_transfer_function(&tf).unwrap();

        assert_eq!(ss.order(), 2);
        assert_eq!(ss.a, DMatrix::from_row_slice(2, 2, &[0.0, 1.0, -10.0, -11.0]));
        assert_eq!(ss.b, DVector::from_vec(vec![0.0, 1.0]));
        assert_eq!(ss.c, DVector::from_vec(vec![5.0, 0.0]));
        assert_eq!(ss.d, 0.0);
        assert_eq!(ss.a_inf_norm(), 21.0);
    }

    #[test]
    fn biproper_system_has_feedthrough() {
        // (2 s + 1) / (s + 3) = 2 - 5 / (s + 3)
        let tf = TransferFunction::new(vec![2.0, 1.0], vec![1.0, 3.0]).unwrap();
        let ss = StateSpace::from_transfer_function(&tf).unwrap();

        assert_eq!(ss.d, 2.0);
        assert_eq!(ss.c, DVector::from_vec(vec![-5.0]));
        assert_eq!(ss.a, DMatrix::from_row_slice(1, 1, &[-3.0]));
    }

    #[test]
    fn non_monic_denominator_is_normalized() {
        // 4 / (2 s + 2) = 2 / (s + 1)
        let tf = TransferFunction::new(vec![4.0], vec![2.0, 2.0]).unwrap();
        let ss = StateSpace::from_transfer_function(&tf).unwrap();

        assert_eq!(ss.a, DMatrix::from_row_slice(1, 1, &[-1.0]));
        assert_eq!(ss.c, DVector::from_vec(vec![2.0]));
    }

    #[test]
    fn static_gain_has_no_states() {
        let tf = TransferFunction::gain(3.0).unwrap();
        let ss = StateSpace::from_transfer_function(&tf).unwrap();

        assert_eq!(ss.order(), 0);
        assert_eq!(ss.d, 3.0);
        assert_eq!(ss.output(&DVector::zeros(0), 1.0), 3.0);
        assert_eq!(ss.a_inf_norm(), 0.0);
    }

    #[test]
    fn improper_system_is_rejected() {
        let pd = TransferFunction::new(vec![1.5, 10.0], vec![1.0]).unwrap();
        assert_eq!(
            StateSpace::from_transfer_function(&pd),
            Err(LtiError::Improper {
                num_degree: 1,
                den_degree: 0
            })
        );
    }

    #[test]
    fn constant_input_dynamics() {
        let tf = TransferFunction::new(vec![5.0], vec![1.0, 11.0, 10.0]).unwrap();
        let ss = StateSpace::from_transfer_function(&tf).unwrap();
        let dyn_sys = ConstantInput { system: &ss, u: 1.0 };

        let xdot = dyn_sys.rhs(0.0, &DVector::from_vec(vec![1.0, 2.0]));
        assert_eq!(xdot, DVector::from_vec(vec![2.0, -10.0 - 22.0 + 1.0]));
    }
}
