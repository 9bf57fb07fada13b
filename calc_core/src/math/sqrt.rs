//! # Square Root by Newton's Method
//!
//! Iterates `x_{n+1} = (x_n + S / x_n) / 2` and records every guess so the
//! convergence can be shown step by step.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::math::sqrt::newton_sqrt;
//!
//! let result = newton_sqrt(2.0, 1e-12, 50).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-12);
//! assert!(result.converged);
//!
//! assert!(newton_sqrt(-4.0, 1e-12, 50).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::{lenient, whole_count};
use crate::errors::{CalcError, CalcResult};

pub const DEFAULT_TOLERANCE: f64 = 1e-12;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqrtInput {
    #[serde(deserialize_with = "lenient")]
    pub value: f64,
    /// Relative change between guesses at which iteration stops
    #[serde(deserialize_with = "lenient")]
    pub tolerance: f64,
    #[serde(deserialize_with = "lenient")]
    pub max_iterations: f64,
}

impl Default for SqrtInput {
    fn default() -> Self {
        SqrtInput {
            value: 0.0,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqrtResult {
    pub root: f64,
    /// Successive guesses, starting with the initial one
    pub iterations: Vec<f64>,
    /// False if the iteration budget ran out first
    pub converged: bool,
}

/// Newton's method square root.
///
/// Fails with [`CalcError::Domain`] for negative input.
pub fn newton_sqrt(value: f64, tolerance: f64, max_iterations: usize) -> CalcResult<SqrtResult> {
    if value < 0.0 {
        return Err(CalcError::domain(
            "sqrt",
            format!("Cannot take the square root of a negative number ({})", value),
        ));
    }
    if value == 0.0 {
        return Ok(SqrtResult {
            root: 0.0,
            iterations: Vec::new(),
            converged: true,
        });
    }

    let tolerance = if tolerance > 0.0 { tolerance } else { DEFAULT_TOLERANCE };
    // Start above the root so the sequence decreases monotonically
    let mut guess = value.max(1.0);
    let mut iterations = vec![guess];

    for _ in 0..max_iterations {
        let next = 0.5 * (guess + value / guess);
        iterations.push(next);
        if (next - guess).abs() <= tolerance * next.abs() {
            tracing::trace!(value, steps = iterations.len(), "newton sqrt converged");
            return Ok(SqrtResult {
                root: next,
                iterations,
                converged: true,
            });
        }
        guess = next;
    }

    Ok(SqrtResult {
        root: guess,
        iterations,
        converged: false,
    })
}

pub fn calculate(input: &SqrtInput) -> CalcResult<SqrtResult> {
    newton_sqrt(
        input.value,
        input.tolerance,
        whole_count(input.max_iterations, 1),
    )
}
