//! # Daily Protein Recommendation
//!
//! Grams per kilogram of body weight looked up by activity level, nudged
//! by goal, and capped at 2.2 g/kg.
//!
//! | Activity    | g/kg |
//! |-------------|------|
//! | Sedentary   | 0.8  |
//! | Light       | 1.0  |
//! | Moderate    | 1.3  |
//! | Active      | 1.6  |
//! | Very active | 2.0  |

use serde::{Deserialize, Serialize};

use crate::coerce::{lenient, whole_count};
use crate::profile::{ActivityLevel, UnitSystem};
use crate::units::{Kilograms, Pounds};

pub const MAX_GRAMS_PER_KG: f64 = 2.2;
const KCAL_PER_GRAM: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProteinGoal {
    FatLoss,
    #[default]
    Maintain,
    MuscleGain,
}

impl ProteinGoal {
    fn modifier(&self) -> f64 {
        match self {
            ProteinGoal::FatLoss => 0.2,
            ProteinGoal::Maintain => 0.0,
            ProteinGoal::MuscleGain => 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProteinInput {
    #[serde(deserialize_with = "lenient")]
    pub weight: f64,
    /// Unit the weight is given in (kg for metric, lb for imperial)
    pub units: UnitSystem,
    pub activity: ActivityLevel,
    pub goal: ProteinGoal,
    #[serde(deserialize_with = "lenient")]
    pub meals_per_day: f64,
}

impl Default for ProteinInput {
    fn default() -> Self {
        ProteinInput {
            weight: 0.0,
            units: UnitSystem::Metric,
            activity: ActivityLevel::Sedentary,
            goal: ProteinGoal::Maintain,
            meals_per_day: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinResult {
    pub grams_per_kg: f64,
    pub daily_grams: f64,
    pub per_meal_grams: f64,
    pub calories_from_protein: f64,
}

/// Base intake in g/kg for an activity level.
pub fn base_grams_per_kg(activity: ActivityLevel) -> f64 {
    match activity {
        ActivityLevel::Sedentary => 0.8,
        ActivityLevel::Light => 1.0,
        ActivityLevel::Moderate => 1.3,
        ActivityLevel::Active => 1.6,
        ActivityLevel::VeryActive => 2.0,
    }
}

pub fn calculate(input: &ProteinInput) -> ProteinResult {
    let weight_kg = match input.units {
        UnitSystem::Metric => Kilograms(input.weight),
        UnitSystem::Imperial => Pounds(input.weight).into(),
    }
    .value()
    .max(0.0);

    let grams_per_kg =
        (base_grams_per_kg(input.activity) + input.goal.modifier()).min(MAX_GRAMS_PER_KG);
    let daily_grams = weight_kg * grams_per_kg;
    let meals = whole_count(input.meals_per_day, 1) as f64;

    ProteinResult {
        grams_per_kg,
        daily_grams,
        per_meal_grams: daily_grams / meals,
        calories_from_protein: daily_grams * KCAL_PER_GRAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sedentary_maintenance() {
        let result = calculate(&ProteinInput {
            weight: 75.0,
            ..Default::default()
        });
        assert!((result.daily_grams - 60.0).abs() < 1e-9);
        assert!((result.per_meal_grams - 20.0).abs() < 1e-9);
        assert!((result.calories_from_protein - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_cap_applies() {
        let result = calculate(&ProteinInput {
            weight: 100.0,
            activity: ActivityLevel::VeryActive,
            goal: ProteinGoal::MuscleGain,
            ..Default::default()
        });
        assert_eq!(result.grams_per_kg, MAX_GRAMS_PER_KG);
        assert!((result.daily_grams - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_imperial_weight() {
        let result = calculate(&ProteinInput {
            weight: 220.462_262_18,
            units: UnitSystem::Imperial,
            activity: ActivityLevel::Active,
            ..Default::default()
        });
        assert!((result.daily_grams - 160.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_meals_means_one() {
        let result = calculate(&ProteinInput {
            weight: 50.0,
            meals_per_day: 0.0,
            ..Default::default()
        });
        assert_eq!(result.per_meal_grams, result.daily_grams);
    }
}
