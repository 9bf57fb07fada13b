//! # Math and Statistics Calculators
//!
//! - [`sqrt`] - Square root by Newton's method, with every iteration
//! - [`polynomial`] - Real roots of a polynomial
//! - [`triangle`] - Area, angles and classification from three sides
//! - [`coordinate`] - Distance, midpoint and line through two points
//! - [`statistics`] - Z-scores, normal CDF and descriptive statistics
//! - [`expression`] - Parser for `f(x, y)` expressions
//! - [`differential`] - Euler, Heun and RK4 solvers for `dy/dx = f(x, y)`

pub mod coordinate;
pub mod differential;
pub mod expression;
pub mod polynomial;
pub mod sqrt;
pub mod statistics;
pub mod triangle;

pub use coordinate::{CoordinateInput, CoordinateResult};
pub use differential::{OdeInput, OdeResult};
pub use polynomial::{PolynomialInput, PolynomialResult};
pub use sqrt::{SqrtInput, SqrtResult};
pub use statistics::{DescriptiveInput, DescriptiveResult, ZScoreInput, ZScoreResult};
pub use triangle::{TriangleInput, TriangleResult};
