//! # Two-Point Coordinate Geometry
//!
//! Midpoint, distance, slope and the equation of the line through two
//! points. A vertical line has no slope or y-intercept and is written
//! `x = c`.
//!
//! ```rust
//! use calc_core::math::coordinate::{line_through, Point};
//!
//! let line = line_through(Point::new(0.0, 1.0), Point::new(1.0, 3.0));
//! assert_eq!(line.slope, Some(2.0));
//! assert_eq!(line.equation, "y = 2x + 1");
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::lenient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    #[serde(deserialize_with = "lenient")]
    pub x: f64,
    #[serde(deserialize_with = "lenient")]
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateInput {
    pub p1: Point,
    pub p2: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateResult {
    pub midpoint: Point,
    pub distance: f64,
    /// `None` for a vertical line
    pub slope: Option<f64>,
    pub y_intercept: Option<f64>,
    /// Inclination from p1 to p2, degrees counter-clockwise from +x
    pub angle_deg: f64,
    pub equation: String,
}

/// Format a coefficient without trailing zeros, to at most 4 decimals.
fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // Avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{:.4}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn slope_intercept_form(m: f64, b: f64) -> String {
    let slope_term = match format_number(m).as_str() {
        "0" => String::new(),
        "1" => "x".to_string(),
        "-1" => "-x".to_string(),
        text => format!("{}x", text),
    };
    let intercept = format_number(b.abs());

    match (slope_term.is_empty(), intercept == "0") {
        (true, _) => format!("y = {}", format_number(b)),
        (false, true) => format!("y = {}", slope_term),
        (false, false) if b < 0.0 => format!("y = {} - {}", slope_term, intercept),
        (false, false) => format!("y = {} + {}", slope_term, intercept),
    }
}

pub fn line_through(p1: Point, p2: Point) -> CoordinateResult {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;

    let (slope, y_intercept, equation) = if dx == 0.0 {
        (None, None, format!("x = {}", format_number(p1.x)))
    } else {
        let m = dy / dx;
        let b = p1.y - m * p1.x;
        (Some(m), Some(b), slope_intercept_form(m, b))
    };

    CoordinateResult {
        midpoint: Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0),
        distance: dx.hypot(dy),
        slope,
        y_intercept,
        angle_deg: dy.atan2(dx).to_degrees(),
        equation,
    }
}

pub fn calculate(input: &CoordinateInput) -> CoordinateResult {
    line_through(input.p1, input.p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_midpoint() {
        let r = line_through(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(r.distance, 5.0);
        assert_eq!(r.midpoint, Point::new(1.5, 2.0));
        assert!((r.angle_deg - 53.130102354).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_line() {
        let r = line_through(Point::new(3.0, 1.0), Point::new(3.0, 7.0));
        assert_eq!(r.slope, None);
        assert_eq!(r.y_intercept, None);
        assert_eq!(r.equation, "x = 3");
        assert!((r.angle_deg - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_equation_forms() {
        assert_eq!(line_through(Point::new(0.0, 1.0), Point::new(1.0, 3.0)).equation, "y = 2x + 1");
        assert_eq!(line_through(Point::new(0.0, -2.0), Point::new(1.0, -1.0)).equation, "y = x - 2");
        assert_eq!(line_through(Point::new(0.0, 0.0), Point::new(2.0, -2.0)).equation, "y = -x");
        assert_eq!(line_through(Point::new(-1.0, 4.0), Point::new(5.0, 4.0)).equation, "y = 4");
        assert_eq!(line_through(Point::new(0.0, 0.0), Point::new(3.0, 1.0)).equation, "y = 0.3333x");
    }

    #[test]
    fn test_same_point() {
        let r = line_through(Point::new(2.0, 2.0), Point::new(2.0, 2.0));
        assert_eq!(r.distance, 0.0);
        assert_eq!(r.equation, "x = 2");
    }

    #[test]
    fn test_deserialize_partial_points() {
        let input: CoordinateInput = serde_json::from_str(r#"{ "p1": { "x": "1" }, "p2": { "x": 4, "y": "4" } }"#).unwrap();
        let r = calculate(&input);
        assert_eq!(r.distance, 5.0);
    }
}
