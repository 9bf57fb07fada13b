//! # First-Order ODE Solver
//!
//! Integrates `dy/dx = f(x, y)` from `(x0, y0)` to `x_end` in fixed steps.
//! The right-hand side is parsed by [`crate::math::expression`]; the
//! equation may be written in full (`"dy/dx = x + y"`) or as the
//! right-hand side alone (`"x + y"`).
//!
//! ## Methods
//!
//! | Method | Order | Slope evaluations per step |
//! |--------|-------|----------------------------|
//! | Euler  | 1     | 1                          |
//! | Heun   | 2     | 2                          |
//! | RK4    | 4     | 4                          |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::math::differential::{solve, OdeInput, OdeMethod};
//!
//! let input = OdeInput {
//!     equation: "dy/dx = y".to_string(),
//!     x0: 0.0,
//!     y0: 1.0,
//!     x_end: 1.0,
//!     steps: 50.0,
//!     method: OdeMethod::Rk4,
//! };
//! let result = solve(&input).unwrap();
//! assert!((result.final_y - std::f64::consts::E).abs() < 1e-7);
//! assert_eq!(result.points.len(), 51);
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::{lenient, lenient_text, whole_count};
use crate::errors::{CalcError, CalcResult};
use crate::math::expression::{self, Expr};

pub const DEFAULT_STEPS: usize = 100;
pub const MAX_STEPS: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OdeMethod {
    Euler,
    Heun,
    #[default]
    Rk4,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OdeInput {
    #[serde(deserialize_with = "lenient_text")]
    pub equation: String,
    #[serde(deserialize_with = "lenient")]
    pub x0: f64,
    #[serde(deserialize_with = "lenient")]
    pub y0: f64,
    #[serde(deserialize_with = "lenient")]
    pub x_end: f64,
    /// Number of steps; clamped to `1..=MAX_STEPS`
    #[serde(deserialize_with = "lenient")]
    pub steps: f64,
    pub method: OdeMethod,
}

impl Default for OdeInput {
    fn default() -> Self {
        OdeInput {
            equation: String::new(),
            x0: 0.0,
            y0: 0.0,
            x_end: 1.0,
            steps: DEFAULT_STEPS as f64,
            method: OdeMethod::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OdePoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdeResult {
    pub method: OdeMethod,
    /// Solution points including the initial condition
    pub points: Vec<OdePoint>,
    pub final_y: f64,
    /// Signed; negative when integrating towards smaller x
    pub step_size: f64,
}

/// Parse `"dy/dx = f"` or `"f"` into `f(x, y)`.
///
/// Error positions refer to the full equation text.
pub fn parse_equation(equation: &str) -> CalcResult<Expr> {
    let (offset, rhs) = match equation.find('=') {
        Some(byte_index) => (equation[..=byte_index].chars().count(), &equation[byte_index + 1..]),
        None => (0, equation),
    };

    expression::parse(rhs).map_err(|err| match err {
        CalcError::Parse { position, reason, .. } => CalcError::parse(equation, position + offset, reason),
        other => other,
    })
}

fn slope(f: &Expr, x: f64, y: f64) -> CalcResult<f64> {
    let value = f.eval(x, y);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::domain(
            "differential",
            format!("dy/dx is not finite at x = {}, y = {}", x, y),
        ))
    }
}

fn step(f: &Expr, method: OdeMethod, x: f64, y: f64, h: f64) -> CalcResult<f64> {
    let next = match method {
        OdeMethod::Euler => y + h * slope(f, x, y)?,
        OdeMethod::Heun => {
            let k1 = slope(f, x, y)?;
            let k2 = slope(f, x + h, y + h * k1)?;
            y + h / 2.0 * (k1 + k2)
        }
        OdeMethod::Rk4 => {
            let k1 = slope(f, x, y)?;
            let k2 = slope(f, x + h / 2.0, y + h / 2.0 * k1)?;
            let k3 = slope(f, x + h / 2.0, y + h / 2.0 * k2)?;
            let k4 = slope(f, x + h, y + h * k3)?;
            y + h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
        }
    };

    if next.is_finite() {
        Ok(next)
    } else {
        Err(CalcError::domain(
            "differential",
            format!("Solution diverged after x = {}", x),
        ))
    }
}

pub fn solve(input: &OdeInput) -> CalcResult<OdeResult> {
    let f = parse_equation(&input.equation)?;
    let n = whole_count(input.steps, 1).min(MAX_STEPS);
    let h = (input.x_end - input.x0) / n as f64;

    let mut points = Vec::with_capacity(n + 1);
    let mut y = input.y0;
    points.push(OdePoint { x: input.x0, y });

    for i in 0..n {
        // Recompute x from the index to avoid drift
        let x = input.x0 + i as f64 * h;
        y = step(&f, input.method, x, y, h)?;
        points.push(OdePoint {
            x: input.x0 + (i + 1) as f64 * h,
            y,
        });
    }

    tracing::debug!(equation = %f, depends_on_y = f.uses_y(), method = ?input.method, steps = n, final_y = y, "ode solved");

    Ok(OdeResult {
        method: input.method,
        points,
        final_y: y,
        step_size: h,
    })
}

pub fn calculate(input: &OdeInput) -> CalcResult<OdeResult> {
    solve(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(equation: &str, y0: f64, x_end: f64, steps: f64, method: OdeMethod) -> OdeInput {
        OdeInput {
            equation: equation.to_string(),
            x0: 0.0,
            y0,
            x_end,
            steps,
            method,
        }
    }

    #[test]
    fn test_exponential_growth_rk4() {
        let result = solve(&input("dy/dx = y", 1.0, 1.0, 100.0, OdeMethod::Rk4)).unwrap();
        assert!((result.final_y - std::f64::consts::E).abs() < 1e-9);
        assert_eq!(result.step_size, 0.01);
        assert_eq!(result.points.len(), 101);
    }

    #[test]
    fn test_euler_matches_compound_growth() {
        let result = solve(&input("y", 1.0, 1.0, 100.0, OdeMethod::Euler)).unwrap();
        let expected = 1.01f64.powi(100);
        assert!((result.final_y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_heun_exact_for_linear_slope() {
        // y = x² / 2
        let result = solve(&input("x", 0.0, 2.0, 10.0, OdeMethod::Heun)).unwrap();
        assert!((result.final_y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_method_accuracy_ordering() {
        let exact = std::f64::consts::E;
        let err = |method| (solve(&input("y", 1.0, 1.0, 20.0, method)).unwrap().final_y - exact).abs();
        let (euler, heun, rk4) = (err(OdeMethod::Euler), err(OdeMethod::Heun), err(OdeMethod::Rk4));
        assert!(rk4 < heun && heun < euler);
    }

    #[test]
    fn test_backward_integration() {
        let mut backward = input("y", 1.0, -1.0, 100.0, OdeMethod::Rk4);
        backward.x0 = 0.0;
        let result = solve(&backward).unwrap();
        assert!(result.step_size < 0.0);
        assert!((result.final_y - (-1.0f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_steps_minimum_and_default() {
        let result = solve(&input("1", 0.0, 1.0, 0.0, OdeMethod::Euler)).unwrap();
        assert_eq!(result.points.len(), 2);

        let parsed: OdeInput = serde_json::from_str(r#"{ "equation": "x", "x_end": 1 }"#).unwrap();
        assert_eq!(parsed.method, OdeMethod::Rk4);
        assert_eq!(solve(&parsed).unwrap().points.len(), DEFAULT_STEPS + 1);
    }

    #[test]
    fn test_parse_error_position_in_full_equation() {
        let err = solve(&input("dy/dx = x + * y", 0.0, 1.0, 10.0, OdeMethod::Rk4)).unwrap_err();
        match err {
            CalcError::Parse { position, expression, .. } => {
                assert_eq!(position, 12);
                assert_eq!(expression, "dy/dx = x + * y");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_slope_is_domain_error() {
        let err = solve(&input("1 / x", 0.0, 1.0, 10.0, OdeMethod::Euler)).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_empty_equation_is_parse_error() {
        let err = solve(&OdeInput::default()).unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }
}
