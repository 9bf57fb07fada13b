//! # Triangle Solver (Heron's Formula)
//!
//! Given three side lengths, computes area, perimeter, interior angles and
//! the altitude to each side, and classifies the triangle.
//!
//! ```text
//! s    = (a + b + c) / 2
//! Area = √(s(s − a)(s − b)(s − c))
//! ```
//!
//! Angles come from the law of cosines; angle `A` is opposite side `a`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::math::triangle::{solve, TriangleType};
//!
//! let t = solve(3.0, 4.0, 5.0);
//! assert!((t.area - 6.0).abs() < 1e-12);
//! assert_eq!(t.triangle_type, TriangleType::Right);
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::lenient;

/// Relative tolerance for side equality and the right-angle check
const SHAPE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriangleType {
    Right,
    Acute,
    Obtuse,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideType {
    Equilateral,
    Isosceles,
    Scalene,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangleInput {
    #[serde(deserialize_with = "lenient")]
    pub a: f64,
    #[serde(deserialize_with = "lenient")]
    pub b: f64,
    #[serde(deserialize_with = "lenient")]
    pub c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleResult {
    pub valid: bool,
    pub area: f64,
    pub perimeter: f64,
    pub semi_perimeter: f64,
    /// Interior angles in degrees, opposite sides a, b, c
    pub angles_deg: [f64; 3],
    /// Altitudes to sides a, b, c
    pub heights: [f64; 3],
    pub triangle_type: TriangleType,
    /// `None` for an invalid triangle
    pub side_type: Option<SideType>,
}

impl TriangleResult {
    fn invalid() -> Self {
        TriangleResult {
            valid: false,
            area: 0.0,
            perimeter: 0.0,
            semi_perimeter: 0.0,
            angles_deg: [0.0; 3],
            heights: [0.0; 3],
            triangle_type: TriangleType::Invalid,
            side_type: None,
        }
    }
}

/// True when all sides are positive and satisfy the strict triangle inequality.
pub fn is_valid(a: f64, b: f64, c: f64) -> bool {
    [a, b, c].iter().all(|s| s.is_finite() && *s > 0.0) && a + b > c && a + c > b && b + c > a
}

fn nearly_equal(x: f64, y: f64) -> bool {
    (x - y).abs() <= SHAPE_TOLERANCE * x.abs().max(y.abs())
}

/// Angle opposite `opposite`, in degrees.
fn angle_deg(opposite: f64, adj1: f64, adj2: f64) -> f64 {
    let cos = (adj1 * adj1 + adj2 * adj2 - opposite * opposite) / (2.0 * adj1 * adj2);
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

fn classify_angles(a: f64, b: f64, c: f64) -> TriangleType {
    let mut sides = [a, b, c];
    sides.sort_by(f64::total_cmp);
    let [x, y, z] = sides;
    let legs = x * x + y * y;
    let hyp = z * z;
    if nearly_equal(legs, hyp) {
        TriangleType::Right
    } else if hyp < legs {
        TriangleType::Acute
    } else {
        TriangleType::Obtuse
    }
}

fn classify_sides(a: f64, b: f64, c: f64) -> SideType {
    match (nearly_equal(a, b), nearly_equal(b, c), nearly_equal(a, c)) {
        (true, true, _) => SideType::Equilateral,
        (false, false, false) => SideType::Scalene,
        _ => SideType::Isosceles,
    }
}

pub fn solve(a: f64, b: f64, c: f64) -> TriangleResult {
    if !is_valid(a, b, c) {
        return TriangleResult::invalid();
    }

    let s = (a + b + c) / 2.0;
    // Rounding can push a near-degenerate product slightly negative
    let area = (s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt();

    TriangleResult {
        valid: true,
        area,
        perimeter: a + b + c,
        semi_perimeter: s,
        angles_deg: [angle_deg(a, b, c), angle_deg(b, a, c), angle_deg(c, a, b)],
        heights: [2.0 * area / a, 2.0 * area / b, 2.0 * area / c],
        triangle_type: classify_angles(a, b, c),
        side_type: Some(classify_sides(a, b, c)),
    }
}

pub fn calculate(input: &TriangleInput) -> TriangleResult {
    solve(input.a, input.b, input.c)
}
