//! Continuous-time SISO transfer functions.

use std::fmt;
use std::ops::Mul;

use ps_core::{Real, ensure_all_finite};

use crate::error::{LtiError, LtiResult};
use crate::poly;

/// Rational function `num(s) / den(s)`, coefficients highest degree first.
///
/// Immutable once built. Leading zeros are stripped so the stored degree is
/// the true polynomial degree.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    num: Vec<Real>,
    den: Vec<Real>,
}

impl TransferFunction {
    /// Build a transfer function from numerator and denominator coefficients.
    ///
    /// # Errors
    ///
    /// Empty or non-finite coefficient lists, or a denominator equal to the
    /// zero polynomial.
    pub fn new(num: impl Into<Vec<Real>>, den: impl Into<Vec<Real>>) -> LtiResult<Self> {
        let num = num.into();
        let den = den.into();
        if num.is_empty() {
            return Err(LtiError::InvalidArg {
                what: "numerator must have at least one coefficient",
            });
        }
        if den.is_empty() {
            return Err(LtiError::InvalidArg {
                what: "denominator must have at least one coefficient",
            });
        }
        ensure_all_finite(&num, "numerator coefficient")?;
        ensure_all_finite(&den, "denominator coefficient")?;
        if poly::is_zero(&den) {
            return Err(LtiError::ZeroDenominator {
                what: "transfer function",
            });
        }

        Ok(Self {
            num: poly::trim_leading_zeros(&num),
            den: poly::trim_leading_zeros(&den),
        })
    }

    /// Static gain `k / 1`.
    pub fn gain(k: Real) -> LtiResult<Self> {
        Self::new(vec![k], vec![1.0])
    }

    pub fn num(&self) -> &[Real] {
        &self.num
    }

    pub fn den(&self) -> &[Real] {
        &self.den
    }

    pub fn num_degree(&self) -> usize {
        poly::degree(&self.num)
    }

    pub fn den_degree(&self) -> usize {
        poly::degree(&self.den)
    }

    /// Number of states in a minimal companion realization.
    pub fn order(&self) -> usize {
        self.den_degree()
    }

    pub fn is_proper(&self) -> bool {
        self.num_degree() <= self.den_degree()
    }

    pub fn is_strictly_proper(&self) -> bool {
        self.num_degree() < self.den_degree() || poly::is_zero(&self.num)
    }

    /// Value at `s = 0`.
    ///
    /// Infinite (or NaN for `0/0`) when the denominator has a root at the origin.
    pub fn dc_gain(&self) -> Real {
        let num0 = self.num[self.num.len() - 1];
        let den0 = self.den[self.den.len() - 1];
        num0 / den0
    }

    /// Evaluate at a real frequency point.
    pub fn eval(&self, s: Real) -> Real {
        poly::eval(&self.num, s) / poly::eval(&self.den, s)
    }

    /// Asymptotic stability of the poles (Routh-Hurwitz on the denominator).
    pub fn is_stable(&self) -> bool {
        poly::is_hurwitz(&self.den)
    }

    /// Series connection `self * other`.
    pub fn series(&self, other: &TransferFunction) -> LtiResult<TransferFunction> {
        TransferFunction::new(
            poly::multiply(&self.num, &other.num),
            poly::multiply(&self.den, &other.den),
        )
    }

    /// Close a unity negative-feedback loop around `self`.
    ///
    /// For `L = N / D` the result is `N / (D + N)`. No pole/zero cancellation
    /// is attempted.
    ///
    /// # Errors
    ///
    /// `ZeroDenominator` when `D + N` vanishes identically (for example a
    /// loop gain of exactly `-1`).
    pub fn unity_feedback(&self) -> LtiResult<TransferFunction> {
        let den = poly::add(&self.den, &self.num);
        if poly::is_zero(&den) {
            return Err(LtiError::ZeroDenominator {
                what: "closed loop",
            });
        }
        TransferFunction::new(self.num.clone(), den)
    }
}

impl Mul for &TransferFunction {
    type Output = LtiResult<TransferFunction>;

    fn mul(self, rhs: &TransferFunction) -> Self::Output {
        self.series(rhs)
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) / ({})",
            PolyDisplay(&self.num),
            PolyDisplay(&self.den)
        )
    }
}

struct PolyDisplay<'a>(&'a [Real]);

impl fmt::Display for PolyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = poly::degree(self.0);
        let mut wrote_any = false;
        for (i, &c) in self.0.iter().enumerate() {
            let power = n - i;
            if c == 0.0 && (wrote_any || power > 0) {
                continue;
            }
            if wrote_any {
                f.write_str(if c < 0.0 { " - " } else { " + " })?;
            } else if c < 0.0 {
                f.write_str("-")?;
            }
            let mag = c.abs();
            let show_coeff = power == 0 || mag != 1.0;
            if show_coeff {
                write!(f, "{mag}")?;
            }
            match power {
                0 => {}
                1 => f.write_str(if show_coeff { " s" } else { "s" })?,
                p => write!(f, "{}s^{p}", if show_coeff { " " } else { "" })?,
            }
            wrote_any = true;
        }
        if !wrote_any {
            f.write_str("0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant() -> TransferFunction {
        TransferFunction::new(vec![5.0], vec![1.0, 11.0, 10.0]).unwrap()
    }

    #[test]
    fn strips_leading_zeros() {
        let tf = TransferFunction::new(vec![0.0, 0.0, 2.0], vec![0.0, 1.0, 3.0]).unwrap();
        assert_eq!(tf.num(), &[2.0]);
        assert_eq!(tf.den(), &[1.0, 3.0]);
        assert_eq!(tf.order(), 1);
    }

    #[test]
    fn rejects_zero_denominator() {
        assert_eq!(
            TransferFunction::new(vec![1.0], vec![0.0, 0.0]),
            Err(LtiError::ZeroDenominator {
                what: "transfer function"
            })
        );
    }

    #[test]
    fn rejects_empty_and_non_finite_coefficients() {
        assert!(matches!(
            TransferFunction::new(Vec::<Real>::new(), vec![1.0]),
            Err(LtiError::InvalidArg { .. })
        ));
        assert!(matches!(
            TransferFunction::new(vec![1.0], vec![1.0, Real::NAN]),
            Err(LtiError::Core(_))
        ));
    }

    #[test]
    fn series_convolves_polynomials() {
        let pi = TransferFunction::new(vec![10.0, 40.0], vec![1.0, 0.0]).unwrap();
        let loop_tf = (&pi * &plant()).unwrap();
        assert_eq!(loop_tf.num(), &[50.0, 200.0]);
        assert_eq!(loop_tf.den(), &[1.0, 11.0, 10.0, 0.0]);
    }

    #[test]
    fn unity_feedback_adds_numerator_to_denominator() {
        let p = TransferFunction::gain(10.0).unwrap();
        let closed = (&p * &plant()).unwrap().unity_feedback().unwrap();
        assert_eq!(closed.num(), &[50.0]);
        assert_eq!(closed.den(), &[1.0, 11.0, 60.0]);
        assert!((closed.dc_gain() - 50.0 / 60.0).abs() < 1e-15);
    }

    #[test]
    fn unity_feedback_rejects_cancelled_loop() {
        let minus_one = TransferFunction::gain(-1.0).unwrap();
        assert!(matches!(
            minus_one.unity_feedback(),
            Err(LtiError::ZeroDenominator { .. })
        ));
    }

    #[test]
    fn dc_gain_of_integrator_is_infinite() {
        let integrator = TransferFunction::new(vec![1.0], vec![1.0, 0.0]).unwrap();
        assert!(integrator.dc_gain().is_infinite());
        assert!(!integrator.is_stable());
    }

    #[test]
    fn properness() {
        let pd = TransferFunction::new(vec![1.5, 10.0], vec![1.0]).unwrap();
        assert!(!pd.is_proper());
        assert!(plant().is_strictly_proper());
        let biproper = TransferFunction::new(vec![2.0, 1.0], vec![1.0, 3.0]).unwrap();
        assert!(biproper.is_proper());
        assert!(!biproper.is_strictly_proper());
    }

    #[test]
    fn eval_matches_dc_gain_at_origin() {
        let tf = plant();
        assert_eq!(tf.eval(0.0), tf.dc_gain());
        assert!((tf.eval(1.0) - 5.0 / 22.0).abs() < 1e-15);
    }

    #[test]
    fn display_uses_polynomial_notation() {
        assert_eq!(plant().to_string(), "(5) / (s^2 + 11 s + 10)");
        let pid = TransferFunction::new(vec![1.5, 10.0, 40.0], vec![1.0, 0.0]).unwrap();
        assert_eq!(pid.to_string(), "(1.5 s^2 + 10 s + 40) / (s)");
        let neg = TransferFunction::new(vec![-1.0, 2.0], vec![1.0, -3.0]).unwrap();
        assert_eq!(neg.to_string(), "(-s + 2) / (s - 3)");
    }
}
