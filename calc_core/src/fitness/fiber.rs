//! # Daily Fiber Recommendation
//!
//! Adequate Intake (AI) values by age and sex, plus the calorie-based
//! guideline of 14 g per 1000 kcal when a calorie budget is given.

use serde::{Deserialize, Serialize};

use crate::coerce::{lenient, whole_count};
use crate::profile::Sex;

pub const GRAMS_PER_1000_KCAL: f64 = 14.0;

/// (minimum age, male g/day, female g/day), highest bracket first
const FIBER_TABLE: [(f64, f64, f64); 6] = [
    (51.0, 30.0, 21.0),
    (19.0, 38.0, 25.0),
    (14.0, 38.0, 26.0),
    (9.0, 31.0, 26.0),
    (4.0, 25.0, 25.0),
    (1.0, 19.0, 19.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiberInput {
    #[serde(deserialize_with = "lenient")]
    pub age: f64,
    pub sex: Sex,
    /// Daily calorie intake; 0 skips the calorie-based figure
    #[serde(deserialize_with = "lenient")]
    pub daily_calories: f64,
    #[serde(deserialize_with = "lenient")]
    pub meals_per_day: f64,
}

impl Default for FiberInput {
    fn default() -> Self {
        FiberInput {
            age: 30.0,
            sex: Sex::Male,
            daily_calories: 0.0,
            meals_per_day: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberResult {
    /// Adequate intake from the age/sex table (g/day)
    pub recommended_g: f64,
    /// 14 g per 1000 kcal, when calories were given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_based_g: Option<f64>,
    pub per_meal_g: f64,
}

/// Adequate intake for an age and sex; 0 for infants under one year.
pub fn adequate_intake(age: f64, sex: Sex) -> f64 {
    FIBER_TABLE
        .iter()
        .find(|(min_age, _, _)| age >= *min_age)
        .map_or(0.0, |(_, male, female)| match sex {
            Sex::Male => *male,
            Sex::Female => *female,
        })
}

pub fn calculate(input: &FiberInput) -> FiberResult {
    let recommended_g = adequate_intake(input.age, input.sex);
    let calorie_based_g =
        (input.daily_calories > 0.0).then(|| input.daily_calories / 1000.0 * GRAMS_PER_1000_KCAL);
    let meals = whole_count(input.meals_per_day, 1) as f64;

    FiberResult {
        recommended_g,
        calorie_based_g,
        per_meal_g: recommended_g / meals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adult_table() {
        assert_eq!(adequate_intake(30.0, Sex::Male), 38.0);
        assert_eq!(adequate_intake(30.0, Sex::Female), 25.0);
        assert_eq!(adequate_intake(51.0, Sex::Male), 30.0);
        assert_eq!(adequate_intake(70.0, Sex::Female), 21.0);
    }

    #[test]
    fn test_children() {
        assert_eq!(adequate_intake(2.0, Sex::Female), 19.0);
        assert_eq!(adequate_intake(10.0, Sex::Male), 31.0);
        assert_eq!(adequate_intake(16.0, Sex::Female), 26.0);
        assert_eq!(adequate_intake(0.5, Sex::Male), 0.0);
    }

    #[test]
    fn test_calorie_based() {
        let result = calculate(&FiberInput {
            daily_calories: 2000.0,
            ..Default::default()
        });
        assert_eq!(result.calorie_based_g, Some(28.0));

        let without = calculate(&FiberInput::default());
        assert_eq!(without.calorie_based_g, None);
        assert!((without.per_meal_g - 38.0 / 3.0).abs() < 1e-9);
    }
}
