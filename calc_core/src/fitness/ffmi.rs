//! # Fat-Free Mass Index
//!
//! FFMI = lean mass (kg) / height (m)². The normalized value adjusts to a
//! 1.8 m reference height: `FFMI + 6.1 × (1.8 − height_m)`.

use serde::{Deserialize, Serialize};

use crate::coerce::lenient;
use crate::units::{Centimeters, Kilograms, Meters};

/// Height the normalized index is scaled to
pub const REFERENCE_HEIGHT_M: f64 = 1.8;
pub const HEIGHT_ADJUSTMENT: f64 = 6.1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfmiInput {
    #[serde(deserialize_with = "lenient")]
    pub weight_kg: f64,
    #[serde(deserialize_with = "lenient")]
    pub height_cm: f64,
    /// Body fat percentage (0-100)
    #[serde(deserialize_with = "lenient")]
    pub body_fat_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FfmiCategory {
    BelowAverage,
    Average,
    AboveAverage,
    Excellent,
    Superior,
    /// Rarely reached without pharmacological help
    SuspiciouslyHigh,
    Unknown,
}

impl FfmiCategory {
    pub fn from_normalized(ffmi: f64) -> Self {
        match ffmi {
            v if v <= 0.0 => FfmiCategory::Unknown,
            v if v < 18.0 => FfmiCategory::BelowAverage,
            v if v < 20.0 => FfmiCategory::Average,
            v if v < 22.0 => FfmiCategory::AboveAverage,
            v if v < 23.0 => FfmiCategory::Excellent,
            v if v < 26.0 => FfmiCategory::Superior,
            _ => FfmiCategory::SuspiciouslyHigh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FfmiResult {
    pub lean_mass_kg: f64,
    pub fat_mass_kg: f64,
    pub ffmi: f64,
    pub normalized_ffmi: f64,
    pub category: FfmiCategory,
}

pub fn calculate(input: &FfmiInput) -> FfmiResult {
    let height: Meters = Centimeters(input.height_cm).into();
    let weight = Kilograms(input.weight_kg.max(0.0));
    let body_fat = input.body_fat_pct.clamp(0.0, 100.0) / 100.0;

    let fat_mass = weight * body_fat;
    let fat_mass_kg = fat_mass.value();
    let lean_mass_kg = (weight - fat_mass).value();

    if height.0 <= 0.0 || lean_mass_kg <= 0.0 {
        return FfmiResult {
            lean_mass_kg,
            fat_mass_kg,
            ffmi: 0.0,
            normalized_ffmi: 0.0,
            category: FfmiCategory::Unknown,
        };
    }

    let ffmi = lean_mass_kg / (height.0 * height.0);
    let normalized_ffmi = ffmi + HEIGHT_ADJUSTMENT * (REFERENCE_HEIGHT_M - height.0);

    FfmiResult {
        lean_mass_kg,
        fat_mass_kg,
        ffmi,
        normalized_ffmi,
        category: FfmiCategory::from_normalized(normalized_ffmi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_height_needs_no_adjustment() {
        let result = calculate(&FfmiInput {
            weight_kg: 90.0,
            height_cm: 180.0,
            body_fat_pct: 15.0,
        });
        assert!((result.lean_mass_kg - 76.5).abs() < 1e-9);
        assert!((result.ffmi - 23.611).abs() < 0.001);
        assert!((result.normalized_ffmi - result.ffmi).abs() < 1e-9);
        assert_eq!(result.category, FfmiCategory::Superior);
    }

    #[test]
    fn test_short_lifter_adjusted_up() {
        let result = calculate(&FfmiInput {
            weight_kg: 70.0,
            height_cm: 165.0,
            body_fat_pct: 12.0,
        });
        assert!((result.normalized_ffmi - (result.ffmi + 6.1 * 0.15)).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate() {
        let result = calculate(&FfmiInput::default());
        assert_eq!(result.ffmi, 0.0);
        assert_eq!(result.category, FfmiCategory::Unknown);
    }
}
