//! # Plant Spacing
//!
//! How many plants fit in a rectangular bed at a given on-center spacing.
//! Every plant sits at least half a spacing from the bed edge.
//!
//! ```text
//! Square grid            Triangular (offset rows)
//!  o   o   o   o          o   o   o   o
//!                           o   o   o
//!  o   o   o   o          o   o   o   o
//! ```
//!
//! Triangular rows are `spacing × √3/2` apart, so a large bed holds up to
//! about 15% more plants than a square grid.

use serde::{Deserialize, Serialize};

use crate::coerce::lenient;
use crate::units::{Feet, Inches};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingPattern {
    #[default]
    Square,
    Triangular,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantSpacingInput {
    #[serde(deserialize_with = "lenient")]
    pub bed_length_ft: f64,
    #[serde(deserialize_with = "lenient")]
    pub bed_width_ft: f64,
    /// On-center spacing between plants, in inches
    #[serde(deserialize_with = "lenient")]
    pub spacing_in: f64,
    pub pattern: SpacingPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSpacingResult {
    pub plants: u64,
    pub rows: u64,
    /// Plants in the longest row
    pub per_row: u64,
    pub area_sqft: f64,
    pub plants_per_sqft: f64,
}

fn floor_count(value: f64) -> u64 {
    // Guard against 47.999999 style results from exact-fit beds
    (value + 1e-9).floor().max(0.0) as u64
}

pub fn calculate(input: &PlantSpacingInput) -> PlantSpacingResult {
    let length = Inches::from(Feet(input.bed_length_ft.max(0.0))).0;
    let width = Inches::from(Feet(input.bed_width_ft.max(0.0))).0;
    let area_sqft = input.bed_length_ft.max(0.0) * input.bed_width_ft.max(0.0);
    let s = input.spacing_in;

    let (plants, rows, per_row) = if s <= 0.0 || length < s || width < s {
        (0, 0, 0)
    } else {
        match input.pattern {
            SpacingPattern::Square => {
                let rows = floor_count(width / s);
                let per_row = floor_count(length / s);
                (rows.saturating_mul(per_row), rows, per_row)
            }
            SpacingPattern::Triangular => {
                let row_gap = s * 3f64.sqrt() / 2.0;
                let rows = floor_count((width - s) / row_gap).saturating_add(1);
                let full = floor_count(length / s);
                let offset = floor_count(length / s - 0.5);
                let full_rows = rows.div_ceil(2);
                let offset_rows = rows / 2;
                let plants = full_rows
                    .saturating_mul(full)
                    .saturating_add(offset_rows.saturating_mul(offset));
                (plants, rows, full)
            }
        }
    };

    PlantSpacingResult {
        plants,
        rows,
        per_row,
        area_sqft,
        plants_per_sqft: if area_sqft > 0.0 {
            plants as f64 / area_sqft
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bed(length: f64, width: f64, spacing: f64, pattern: SpacingPattern) -> PlantSpacingResult {
        calculate(&PlantSpacingInput {
            bed_length_ft: length,
            bed_width_ft: width,
            spacing_in: spacing,
            pattern,
        })
    }

    #[test]
    fn test_square_grid() {
        // 8 ft x 4 ft at 12" = 8 x 4
        let result = bed(8.0, 4.0, 12.0, SpacingPattern::Square);
        assert_eq!(result.plants, 32);
        assert_eq!(result.rows, 4);
        assert_eq!(result.per_row, 8);
        assert_eq!(result.plants_per_sqft, 1.0);
    }

    #[test]
    fn test_triangular_grid() {
        // 48" wide at 12": rows 10.39" apart -> floor(36 / 10.39) + 1 = 4 rows
        let result = bed(8.0, 4.0, 12.0, SpacingPattern::Triangular);
        assert_eq!(result.rows, 4);
        // 2 rows of 8 + 2 offset rows of 7
        assert_eq!(result.plants, 30);
    }

    #[test]
    fn test_triangular_beats_square_on_large_beds() {
        let square = bed(20.0, 10.0, 12.0, SpacingPattern::Square);
        let triangular = bed(20.0, 10.0, 12.0, SpacingPattern::Triangular);
        assert!(triangular.plants > square.plants);
    }

    #[test]
    fn test_bed_smaller_than_spacing() {
        assert_eq!(bed(0.5, 4.0, 12.0, SpacingPattern::Square).plants, 0);
        assert_eq!(bed(4.0, 4.0, 0.0, SpacingPattern::Square).plants, 0);
    }

    #[test]
    fn test_huge_bed_saturates() {
        let square = bed(1e6, 1e6, 0.001, SpacingPattern::Square);
        assert_eq!(square.plants, u64::MAX);
        assert!(square.rows > 11_999_999_000);

        let triangular = bed(1e20, 1e20, 1e-6, SpacingPattern::Triangular);
        assert_eq!(triangular.plants, u64::MAX);
        assert_eq!(triangular.per_row, u64::MAX);
    }
}
