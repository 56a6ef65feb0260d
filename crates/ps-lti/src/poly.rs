//! Dense real polynomials, highest degree first.
//!
//! `[1.0, 11.0, 10.0]` is `s^2 + 11 s + 10`.

use ps_core::Real;

/// Drop leading zero coefficients, keeping at least one entry.
pub fn trim_leading_zeros(coeffs: &[Real]) -> Vec<Real> {
    let first = coeffs
        .iter()
        .position(|&c| c != 0.0)
        .unwrap_or(coeffs.len().saturating_sub(1));
    if coeffs.is_empty() {
        return vec![0.0];
    }
    coeffs[first..].to_vec()
}

/// True when every coefficient is zero.
pub fn is_zero(coeffs: &[Real]) -> bool {
    coeffs.iter().all(|&c| c == 0.0)
}

/// Degree of an already-trimmed polynomial.
pub fn degree(coeffs: &[Real]) -> usize {
    coeffs.len().saturating_sub(1)
}

/// Polynomial product (discrete convolution of coefficient sequences).
pub fn multiply(a: &[Real], b: &[Real]) -> Vec<Real> {
    if a.is_empty() || b.is_empty() {
        return vec![0.0];
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

/// Polynomial sum, aligning coefficients on the constant term.
pub fn add(a: &[Real], b: &[Real]) -> Vec<Real> {
    let len = a.len().max(b.len());
    let mut out = vec![0.0; len];
    for (i, &c) in a.iter().enumerate() {
        out[len - a.len() + i] += c;
    }
    for (i, &c) in b.iter().enumerate() {
        out[len - b.len() + i] += c;
    }
    out
}

/// Horner evaluation at a real point.
pub fn eval(coeffs: &[Real], x: Real) -> Real {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Routh-Hurwitz test: true when every root lies strictly in the left half-plane.
///
/// Any zero in the first column (marginal stability or a root at the origin)
/// counts as not stable.
pub fn is_hurwitz(coeffs: &[Real]) -> bool {
    let coeffs = trim_leading_zeros(coeffs);
    let lead = coeffs[0];
    if lead == 0.0 {
        return false;
    }
    let normalized: Vec<Real> = coeffs.iter().map(|c| c / lead).collect();
    let n = degree(&normalized);
    if n == 0 {
        return true;
    }
    // Necessary condition: all coefficients share the sign of the leading one.
    if normalized.iter().any(|&c| c <= 0.0) {
        return false;
    }

    let mut upper: Vec<Real> = normalized.iter().step_by(2).copied().collect();
    let mut lower: Vec<Real> = normalized.iter().skip(1).step_by(2).copied().collect();

    for _ in 1..n {
        let pivot = lower.first().copied().unwrap_or(0.0);
        if pivot <= 0.0 {
            return false;
        }
        let next: Vec<Real> = (0..upper.len().saturating_sub(1).max(1))
            .map(|i| {
                let a = upper.get(i + 1).copied().unwrap_or(0.0);
                let b = lower.get(i + 1).copied().unwrap_or(0.0);
                (pivot * a - upper[0] * b) / pivot
            })
            .collect();
        upper = lower;
        lower = next;
    }

    lower.first().copied().unwrap_or(0.0) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_leading_zeros() {
        assert_eq!(trim_leading_zeros(&[0.0, 0.0, 1.0, 2.0]), vec![1.0, 2.0]);
        assert_eq!(trim_leading_zeros(&[0.0, 0.0]), vec![0.0]);
        assert_eq!(trim_leading_zeros(&[]), vec![0.0]);
        assert_eq!(trim_leading_zeros(&[3.0, 0.0]), vec![3.0, 0.0]);
    }

    #[test]
    fn multiply_matches_hand_expansion() {
        // (s + 1)(s + 10) = s^2 + 11 s + 10
        assert_eq!(multiply(&[1.0, 1.0], &[1.0, 10.0]), vec![1.0, 11.0, 10.0]);
        // (1.5 s^2 + 10 s + 40) * 5
        assert_eq!(
            multiply(&[1.5, 10.0, 40.0], &[5.0]),
            vec![7.5, 50.0, 200.0]
        );
    }

    #[test]
    fn add_aligns_constant_terms() {
        assert_eq!(add(&[1.0, 11.0, 10.0], &[50.0]), vec![1.0, 11.0, 60.0]);
        assert_eq!(add(&[5.0], &[1.0, 0.0]), vec![1.0, 5.0]);
    }

    #[test]
    fn eval_uses_horner() {
        assert_eq!(eval(&[1.0, 11.0, 10.0], 0.0), 10.0);
        assert_eq!(eval(&[1.0, 11.0, 10.0], -1.0), 0.0);
        assert_eq!(eval(&[2.0, 0.0, -3.0], 2.0), 5.0);
    }

    #[test]
    fn hurwitz_accepts_stable_polynomials() {
        assert!(is_hurwitz(&[1.0, 11.0, 10.0]));
        assert!(is_hurwitz(&[1.0, 11.0, 60.0, 200.0]));
        assert!(is_hurwitz(&[1.0, 18.5, 60.0, 200.0]));
        assert!(is_hurwitz(&[4.0]));
        assert!(is_hurwitz(&[2.0, 3.0]));
        // Negative leading coefficient is normalized away.
        assert!(is_hurwitz(&[-1.0, -3.0, -2.0]));
    }

    #[test]
    fn hurwitz_rejects_unstable_polynomials() {
        // s^3 + s^2 + s + 10: sign change in the first column
        assert!(!is_hurwitz(&[1.0, 1.0, 1.0, 10.0]));
        // Pole at the origin
        assert!(!is_hurwitz(&[1.0, 0.0]));
        // Right half-plane root
        assert!(!is_hurwitz(&[1.0, -2.0]));
        // Undamped oscillator: s^2 + 1
        assert!(!is_hurwitz(&[1.0, 0.0, 1.0]));
        // s^3 - 4989 s^2 - 4990 s - 5000
        assert!(!is_hurwitz(&[1.0, -4989.0, -4990.0, -5000.0]));
    }

    #[test]
    fn hurwitz_handles_fourth_order() {
        // (s + 1)^4 = s^4 + 4 s^3 + 6 s^2 + 4 s + 1
        assert!(is_hurwitz(&[1.0, 4.0, 6.0, 4.0, 1.0]));
        // s^4 + s^3 + s^2 + s + 1 has roots on the right of the imaginary axis
        assert!(!is_hurwitz(&[1.0, 1.0, 1.0, 1.0, 1.0]));
    }
}
