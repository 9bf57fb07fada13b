//! # Soil / Mulch Volume
//!
//! How much material fills a bed of a given shape to a given depth, in
//! cubic feet, cubic yards (bulk delivery) and bags.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::gardening::soil_volume::{calculate, BedShape, SoilVolumeInput};
//!
//! let input = SoilVolumeInput {
//!     shape: BedShape::Rectangle { length_ft: 9.0, width_ft: 6.0 },
//!     depth_in: 6.0,
//!     bag_size_cuft: 2.0,
//! };
//! let result = calculate(&input);
//! assert_eq!(result.cubic_feet, 27.0);
//! assert_eq!(result.cubic_yards, 1.0);
//! assert_eq!(result.bags, 14);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::coerce::lenient;
use crate::units::{CubicFeet, CubicYards, Feet, Inches, Liters};

/// Plan shape of the bed. Dimensions in feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BedShape {
    Rectangle {
        #[serde(default, deserialize_with = "lenient")]
        length_ft: f64,
        #[serde(default, deserialize_with = "lenient")]
        width_ft: f64,
    },
    Circle {
        #[serde(default, deserialize_with = "lenient")]
        diameter_ft: f64,
    },
    Triangle {
        #[serde(default, deserialize_with = "lenient")]
        base_ft: f64,
        #[serde(default, deserialize_with = "lenient")]
        height_ft: f64,
    },
}

impl Default for BedShape {
    fn default() -> Self {
        BedShape::Rectangle {
            length_ft: 0.0,
            width_ft: 0.0,
        }
    }
}

impl BedShape {
    /// Plan area in square feet (negative dimensions count as 0)
    pub fn area_sqft(&self) -> f64 {
        match *self {
            BedShape::Rectangle { length_ft, width_ft } => length_ft.max(0.0) * width_ft.max(0.0),
            BedShape::Circle { diameter_ft } => {
                let r = diameter_ft.max(0.0) / 2.0;
                PI * r * r
            }
            BedShape::Triangle { base_ft, height_ft } => 0.5 * base_ft.max(0.0) * height_ft.max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilVolumeInput {
    pub shape: BedShape,
    #[serde(deserialize_with = "lenient")]
    pub depth_in: f64,
    /// Bag size in cubic feet (common sizes: 0.75, 1.5, 2.0)
    #[serde(deserialize_with = "lenient")]
    pub bag_size_cuft: f64,
}

impl Default for SoilVolumeInput {
    fn default() -> Self {
        SoilVolumeInput {
            shape: BedShape::default(),
            depth_in: 0.0,
            bag_size_cuft: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilVolumeResult {
    pub area_sqft: f64,
    pub cubic_feet: f64,
    pub cubic_yards: f64,
    pub liters: f64,
    /// Whole bags needed, rounded up; 0 when the bag size is not positive
    pub bags: u64,
}

pub fn calculate(input: &SoilVolumeInput) -> SoilVolumeResult {
    let area_sqft = input.shape.area_sqft();
    let depth: Feet = Inches(input.depth_in.max(0.0)).into();
    let volume = CubicFeet(area_sqft * depth.0);

    let bags = if input.bag_size_cuft > 0.0 {
        // Float noise just above a whole count must not add a bag
        let raw = volume.0 / input.bag_size_cuft;
        (raw - 1e-9).ceil().max(0.0) as u64
    } else {
        0
    };

    SoilVolumeResult {
        area_sqft,
        cubic_feet: volume.0,
        cubic_yards: CubicYards::from(volume).0,
        liters: Liters::from(volume).0,
        bags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle() {
        let result = calculate(&SoilVolumeInput {
            shape: BedShape::Rectangle {
                length_ft: 10.0,
                width_ft: 4.0,
            },
            depth_in: 3.0,
            bag_size_cuft: 2.0,
        });
        assert_eq!(result.area_sqft, 40.0);
        assert_eq!(result.cubic_feet, 10.0);
        assert_eq!(result.bags, 5);
    }

    #[test]
    fn test_circle() {
        let result = calculate(&SoilVolumeInput {
            shape: BedShape::Circle { diameter_ft: 4.0 },
            depth_in: 12.0,
            bag_size_cuft: 1.5,
        });
        assert!((result.cubic_feet - 4.0 * PI).abs() < 1e-9);
        // 12.566 / 1.5 = 8.38 -> 9 bags
        assert_eq!(result.bags, 9);
    }

    #[test]
    fn test_triangle() {
        let shape = BedShape::Triangle {
            base_ft: 6.0,
            height_ft: 3.0,
        };
        assert_eq!(shape.area_sqft(), 9.0);
    }

    #[test]
    fn test_json_shape_tag() {
        let json = r#"{ "shape": { "type": "circle", "diameter_ft": "8" }, "depth_in": 2 }"#;
        let input: SoilVolumeInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.shape, BedShape::Circle { diameter_ft: 8.0 });
        assert_eq!(input.bag_size_cuft, 2.0);
    }

    #[test]
    fn test_zero_bag_size() {
        let result = calculate(&SoilVolumeInput {
            shape: BedShape::Rectangle {
                length_ft: 2.0,
                width_ft: 2.0,
            },
            depth_in: 6.0,
            bag_size_cuft: 0.0,
        });
        assert_eq!(result.bags, 0);
        assert_eq!(result.cubic_feet, 2.0);
    }
}
