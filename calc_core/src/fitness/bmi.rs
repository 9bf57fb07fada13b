//! # Body Mass Index
//!
//! BMI = kg / m². Accepts metric (kg, cm) or imperial (lb, in) input and
//! reports the healthy weight range for the given height in the same unit
//! the weight was entered in.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::fitness::bmi::{calculate, BmiCategory, BmiInput};
//! use calc_core::profile::UnitSystem;
//!
//! let result = calculate(&BmiInput { weight: 70.0, height: 175.0, units: UnitSystem::Metric });
//! assert!((result.bmi - 22.86).abs() < 0.01);
//! assert_eq!(result.category, BmiCategory::Normal);
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::lenient;
use crate::profile::UnitSystem;
use crate::units::{Centimeters, Inches, Kilograms, Meters, Pounds};

pub const UNDERWEIGHT_BELOW: f64 = 18.5;
pub const NORMAL_BELOW: f64 = 25.0;
pub const OVERWEIGHT_BELOW: f64 = 30.0;
/// Upper end of the healthy range as usually quoted
pub const HEALTHY_MAX: f64 = 24.9;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BmiInput {
    /// Body weight in kg (metric) or lb (imperial)
    #[serde(deserialize_with = "lenient")]
    pub weight: f64,
    /// Height in cm (metric) or in (imperial)
    #[serde(deserialize_with = "lenient")]
    pub height: f64,
    pub units: UnitSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
    /// Height or weight missing
    Unknown,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi <= 0.0 || !bmi.is_finite() {
            BmiCategory::Unknown
        } else if bmi < UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if bmi < NORMAL_BELOW {
            BmiCategory::Normal
        } else if bmi < OVERWEIGHT_BELOW {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    /// Lowest healthy weight for this height, in the input weight unit
    pub healthy_weight_min: f64,
    /// Highest healthy weight for this height, in the input weight unit
    pub healthy_weight_max: f64,
}

fn to_metric(input: &BmiInput) -> (Kilograms, Meters) {
    match input.units {
        UnitSystem::Metric => (Kilograms(input.weight), Centimeters(input.height).into()),
        UnitSystem::Imperial => (Pounds(input.weight).into(), Inches(input.height).into()),
    }
}

fn from_kg(kg: Kilograms, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => kg.0,
        UnitSystem::Imperial => Pounds::from(kg).0,
    }
}

pub fn calculate(input: &BmiInput) -> BmiResult {
    let (kg, m) = to_metric(input);
    if m.0 <= 0.0 || kg.0 <= 0.0 {
        return BmiResult {
            bmi: 0.0,
            category: BmiCategory::Unknown,
            healthy_weight_min: 0.0,
            healthy_weight_max: 0.0,
        };
    }

    let height_sq = m.0 * m.0;
    let bmi = kg.0 / height_sq;

    BmiResult {
        bmi,
        category: BmiCategory::from_bmi(bmi),
        healthy_weight_min: from_kg(Kilograms(UNDERWEIGHT_BELOW * height_sq), input.units),
        healthy_weight_max: from_kg(Kilograms(HEALTHY_MAX * height_sq), input.units),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_bmi() {
        let result = calculate(&BmiInput {
            weight: 80.0,
            height: 200.0,
            units: UnitSystem::Metric,
        });
        assert!((result.bmi - 20.0).abs() < 1e-9);
        assert!((result.healthy_weight_min - 74.0).abs() < 1e-9);
        assert!((result.healthy_weight_max - 99.6).abs() < 1e-9);
    }

    #[test]
    fn test_imperial_matches_metric() {
        let imperial = calculate(&BmiInput {
            weight: 180.0,
            height: 70.0,
            units: UnitSystem::Imperial,
        });
        // Classic 703 × lb / in² approximation
        let approx = 703.0 * 180.0 / (70.0 * 70.0);
        assert!((imperial.bmi - approx).abs() < 0.05);
        assert_eq!(imperial.category, BmiCategory::Overweight);
        assert!(imperial.healthy_weight_max > 120.0 && imperial.healthy_weight_max < 180.0);
    }

    #[test]
    fn test_categories() {
        assert_eq!(BmiCategory::from_bmi(17.0), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_missing_height() {
        let result = calculate(&BmiInput {
            weight: 80.0,
            height: 0.0,
            units: UnitSystem::Metric,
        });
        assert_eq!(result.bmi, 0.0);
        assert_eq!(result.category, BmiCategory::Unknown);
    }
}
