//! # Polynomial Real Root Finder
//!
//! Coefficients are given highest degree first: `[1, -6, 11, -6]` is
//! `x³ − 6x² + 11x − 6`.
//!
//! ## Method
//!
//! 1. Linear and quadratic factors are solved in closed form.
//! 2. Higher degrees: Newton's method from a fan of starting points inside
//!    the Cauchy bound `1 + max|aᵢ/aₙ|`. Each root found is divided out by
//!    synthetic division (deflation) and the search repeats on the quotient.
//! 3. Every root is polished with a few Newton steps on the original
//!    polynomial to undo error accumulated during deflation.
//!
//! If no start converges, the remaining factor has no real roots (or none
//! Newton can reach) and its degree is reported as `unresolved_degree`.
//!
//! Repeated roots are only resolved to about `ε^(1/m)` for multiplicity `m`,
//! so they come back as a tight cluster. Neighbouring roots are merged when
//! the polynomial is at rounding-noise level between them, and a leftover
//! quadratic whose discriminant is barely negative counts as a double root
//! when its vertex is a root of the original polynomial.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::math::polynomial::find_roots;
//!
//! let result = find_roots(&[1.0, -6.0, 11.0, -6.0]).unwrap();
//! assert_eq!(result.real_roots.len(), 3);
//! assert!((result.real_roots[0] - 1.0).abs() < 1e-9);
//! assert!((result.real_roots[2] - 3.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::lenient_list;
use crate::errors::{CalcError, CalcResult};

const MAX_NEWTON_STEPS: usize = 200;
const POLISH_STEPS: usize = 60;
const STEP_TOLERANCE: f64 = 1e-13;
/// `|p(x)|` below this multiple of `Σ|aᵢ||x|ⁱ` is rounding noise
const NOISE_FLOOR: f64 = 8.0 * f64::EPSILON;
/// Relative residual low enough to accept `x` as a root
const RESIDUAL_TOLERANCE: f64 = 1e-12;
/// Widest cluster (relative to `max(1, |x|)`) merged into one root
const CLUSTER_WIDTH: f64 = 1e-2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolynomialInput {
    /// Coefficients, highest degree first
    #[serde(deserialize_with = "lenient_list")]
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialResult {
    pub degree: usize,
    /// Distinct real roots in ascending order
    pub real_roots: Vec<f64>,
    /// Degree of the leftover factor with no real root found
    pub unresolved_degree: usize,
    /// Derivative coefficients, highest degree first
    pub derivative: Vec<f64>,
}

/// Evaluate a polynomial at `x` by Horner's rule.
///
/// ```rust
/// use calc_core::math::polynomial::evaluate;
///
/// assert_eq!(evaluate(&[2.0, 0.0, -1.0], 3.0), 17.0);
/// ```
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Coefficients of the first derivative.
pub fn derivative(coefficients: &[f64]) -> Vec<f64> {
    let n = coefficients.len();
    if n <= 1 {
        return vec![0.0];
    }
    coefficients[..n - 1]
        .iter()
        .enumerate()
        .map(|(i, &c)| c * (n - 1 - i) as f64)
        .collect()
}

/// Divide by `(x − root)`, dropping the remainder.
pub fn deflate(coefficients: &[f64], root: f64) -> Vec<f64> {
    let mut quotient = Vec::with_capacity(coefficients.len().saturating_sub(1));
    let mut carry = 0.0;
    for &c in &coefficients[..coefficients.len() - 1] {
        carry = carry * root + c;
        quotient.push(carry);
    }
    quotient
}

/// `Σ|aᵢ||x|ⁱ`, the size of the terms summed when evaluating at `x`.
fn residual_scale(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x.abs() + c.abs())
}

/// `|p(x)|` relative to the terms that produced it.
fn relative_residual(coefficients: &[f64], x: f64) -> f64 {
    let scale = residual_scale(coefficients, x);
    if scale == 0.0 {
        return 0.0;
    }
    evaluate(coefficients, x).abs() / scale
}

fn newton(coefficients: &[f64], deriv: &[f64], start: f64, max_steps: usize) -> Option<f64> {
    let mut x = start;
    for _ in 0..max_steps {
        let fx = evaluate(coefficients, x);
        if fx == 0.0 || fx.abs() <= NOISE_FLOOR * residual_scale(coefficients, x) {
            return Some(x);
        }
        let dfx = evaluate(deriv, x);
        if dfx == 0.0 || !dfx.is_finite() {
            return None;
        }
        let step = fx / dfx;
        x -= step;
        if !x.is_finite() {
            return None;
        }
        if step.abs() <= STEP_TOLERANCE * x.abs().max(1.0) {
            return Some(x);
        }
    }
    None
}

/// Newton steps on the original polynomial, kept only if they shrink the residual.
fn polish(coefficients: &[f64], deriv: &[f64], root: f64) -> f64 {
    let mut x = root;
    for _ in 0..POLISH_STEPS {
        let fx = evaluate(coefficients, x);
        let dfx = evaluate(deriv, x);
        if fx == 0.0 || dfx == 0.0 || !dfx.is_finite() {
            break;
        }
        let next = x - fx / dfx;
        if !next.is_finite() || evaluate(coefficients, next).abs() > fx.abs() {
            break;
        }
        let done = (next - x).abs() <= STEP_TOLERANCE * x.abs().max(1.0);
        x = next;
        if done {
            break;
        }
    }
    x
}

/// Merge sorted roots that are one repeated root smeared by rounding.
fn merge_clusters(coefficients: &[f64], sorted: Vec<f64>) -> Vec<f64> {
    let mut merged: Vec<(f64, usize)> = Vec::with_capacity(sorted.len());
    for root in sorted {
        if let Some((mean, count)) = merged.last_mut() {
            let width = (root - *mean).abs();
            let midpoint = (root + *mean) / 2.0;
            if width <= CLUSTER_WIDTH * mean.abs().max(1.0)
                && relative_residual(coefficients, midpoint) <= RESIDUAL_TOLERANCE
            {
                *count += 1;
                *mean += (root - *mean) / *count as f64;
                continue;
            }
        }
        merged.push((root, 1));
    }
    merged.into_iter().map(|(mean, _)| mean).collect()
}

fn cauchy_bound(coefficients: &[f64]) -> f64 {
    let lead = coefficients[0];
    1.0 + coefficients[1..]
        .iter()
        .map(|c| (c / lead).abs())
        .fold(0.0, f64::max)
}

fn solve_low_degree(coefficients: &[f64]) -> Vec<f64> {
    match *coefficients {
        [a, b] => vec![-b / a],
        [a, b, c] => {
            let disc = b * b - 4.0 * a * c;
            if disc < 0.0 {
                Vec::new()
            } else if disc == 0.0 {
                vec![-b / (2.0 * a)]
            } else {
                // Avoids cancellation when b² ≫ 4ac
                let q = -0.5 * (b + b.signum() * disc.sqrt());
                let q = if q == 0.0 { -0.5 * disc.sqrt() } else { q };
                vec![q / a, c / q]
            }
        }
        _ => Vec::new(),
    }
}

/// Find the distinct real roots of a polynomial.
///
/// Leading zero coefficients are ignored. Fails with
/// [`CalcError::InvalidInput`] when every coefficient is zero.
pub fn find_roots(coefficients: &[f64]) -> CalcResult<PolynomialResult> {
    let first_nonzero = coefficients
        .iter()
        .position(|c| *c != 0.0)
        .ok_or_else(|| {
            CalcError::invalid_input(
                "coefficients",
                format!("{:?}", coefficients),
                "At least one non-zero coefficient is required",
            )
        })?;
    let original: Vec<f64> = coefficients[first_nonzero..].to_vec();
    if original.iter().any(|c| !c.is_finite()) {
        return Err(CalcError::invalid_input(
            "coefficients",
            format!("{:?}", coefficients),
            "Coefficients must be finite",
        ));
    }
    let degree = original.len() - 1;
    let original_deriv = derivative(&original);

    let mut roots = Vec::new();
    let mut remaining = original.clone();

    // Roots at zero come off exactly
    while remaining.len() > 1 && remaining[remaining.len() - 1] == 0.0 {
        roots.push(0.0);
        remaining.pop();
    }

    while remaining.len() > 3 {
        let deriv = derivative(&remaining);
        let bound = cauchy_bound(&remaining);
        let starts = [0.0, 0.5, -0.5, 1.0, -1.0, bound / 2.0, -bound / 2.0, bound, -bound];

        let found = starts
            .iter()
            .find_map(|&start| newton(&remaining, &deriv, start, MAX_NEWTON_STEPS));

        match found {
            Some(root) => {
                roots.push(root);
                remaining = deflate(&remaining, root);
            }
            None => break,
        }
    }

    let unresolved_degree = if remaining.len() <= 3 {
        let mut low = solve_low_degree(&remaining);
        if low.is_empty() && remaining.len() == 3 {
            // Slightly negative discriminant left by deflating a repeated root
            let vertex = -remaining[1] / (2.0 * remaining[0]);
            if relative_residual(&original, vertex) <= RESIDUAL_TOLERANCE {
                low.push(vertex);
            }
        }
        let leftover = if low.is_empty() { remaining.len() - 1 } else { 0 };
        roots.extend(low);
        leftover
    } else {
        remaining.len() - 1
    };

    let mut polished: Vec<f64> = roots
        .into_iter()
        .map(|r| polish(&original, &original_deriv, r))
        .filter(|r| r.is_finite())
        .collect();
    polished.sort_by(f64::total_cmp);
    let real_roots = merge_clusters(&original, polished);

    tracing::debug!(degree, found = real_roots.len(), unresolved_degree, "polynomial roots");

    Ok(PolynomialResult {
        degree,
        real_roots,
        unresolved_degree,
        derivative: derivative(&original),
    })
}

pub fn calculate(input: &PolynomialInput) -> CalcResult<PolynomialResult> {
    find_roots(&input.coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roots(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "roots: {:?}", actual);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-7, "expected {} got {}", e, a);
        }
    }

    #[test]
    fn test_linear() {
        let result = find_roots(&[2.0, -8.0]).unwrap();
        assert_roots(&result.real_roots, &[4.0]);
        assert_eq!(result.degree, 1);
    }

    #[test]
    fn test_quadratic() {
        let result = find_roots(&[1.0, -3.0, 2.0]).unwrap();
        assert_roots(&result.real_roots, &[1.0, 2.0]);

        let none = find_roots(&[1.0, 0.0, 1.0]).unwrap();
        assert!(none.real_roots.is_empty());
        assert_eq!(none.unresolved_degree, 2);
    }

    #[test]
    fn test_cubic() {
        let result = find_roots(&[1.0, -6.0, 11.0, -6.0]).unwrap();
        assert_roots(&result.real_roots, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_quartic_with_negative_roots() {
        // (x² − 1)(x² − 4)
        let result = find_roots(&[1.0, 0.0, -5.0, 0.0, 4.0]).unwrap();
        assert_roots(&result.real_roots, &[-2.0, -1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_no_real_roots() {
        // x⁴ + 1
        let result = find_roots(&[1.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        assert!(result.real_roots.is_empty());
        assert_eq!(result.unresolved_degree, 4);
    }

    #[test]
    fn test_zero_roots_and_leading_zeros() {
        // 0x⁴ + x³ − x  = x(x − 1)(x + 1)
        let result = find_roots(&[0.0, 1.0, 0.0, -1.0, 0.0]).unwrap();
        assert_eq!(result.degree, 3);
        assert_roots(&result.real_roots, &[-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_repeated_roots_reported_once() {
        for coefficients in [
            vec![1.0, -3.0, 3.0, -1.0],      // (x − 1)³
            vec![1.0, -4.0, 6.0, -4.0, 1.0], // (x − 1)⁴
        ] {
            let result = find_roots(&coefficients).unwrap();
            assert_eq!(result.real_roots.len(), 1, "roots: {:?}", result.real_roots);
            assert!((result.real_roots[0] - 1.0).abs() < 1e-3);
            assert_eq!(result.unresolved_degree, 0);
        }
    }

    #[test]
    fn test_double_root_beside_simple_root() {
        // (x − 1)²(x − 2)
        let result = find_roots(&[1.0, -4.0, 5.0, -2.0]).unwrap();
        assert_eq!(result.real_roots.len(), 2, "roots: {:?}", result.real_roots);
        assert!((result.real_roots[0] - 1.0).abs() < 1e-6);
        assert!((result.real_roots[1] - 2.0).abs() < 1e-9);
        assert_eq!(result.unresolved_degree, 0);
    }

    #[test]
    fn test_close_distinct_roots_stay_apart() {
        // (x − 1)(x − 1.01)
        let result = find_roots(&[1.0, -2.01, 1.01]).unwrap();
        assert_roots(&result.real_roots, &[1.0, 1.01]);

        // x² − 2x + 1.01 has no real root even though it nearly touches zero
        let complex = find_roots(&[1.0, -2.0, 1.01]).unwrap();
        assert!(complex.real_roots.is_empty());
        assert_eq!(complex.unresolved_degree, 2);
    }

    #[test]
    fn test_all_zero_is_error() {
        assert!(find_roots(&[0.0, 0.0]).is_err());
        assert!(find_roots(&[]).is_err());
    }

    #[test]
    fn test_constant_has_no_roots() {
        let result = find_roots(&[5.0]).unwrap();
        assert_eq!(result.degree, 0);
        assert!(result.real_roots.is_empty());
        assert_eq!(result.unresolved_degree, 0);
    }

    #[test]
    fn test_helpers() {
        assert_eq!(evaluate(&[1.0, -6.0, 11.0, -6.0], 2.0), 0.0);
        assert_eq!(derivative(&[1.0, -6.0, 11.0, -6.0]), vec![3.0, -12.0, 11.0]);
        assert_eq!(deflate(&[1.0, -6.0, 11.0, -6.0], 1.0), vec![1.0, -5.0, 6.0]);
    }
}
