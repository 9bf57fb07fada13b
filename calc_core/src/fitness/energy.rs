//! # Calorie Needs (BMR / TDEE)
//!
//! Basal metabolic rate by the Mifflin-St Jeor equation:
//!
//! ```text
//! BMR = 10 × kg + 6.25 × cm − 5 × age + 5     (male)
//! BMR = 10 × kg + 6.25 × cm − 5 × age − 161   (female)
//! ```
//!
//! Total daily energy expenditure is BMR times the activity multiplier.
//! A lose/gain goal shifts the target by 500 kcal, about 0.45 kg a week.

use serde::{Deserialize, Serialize};

use crate::coerce::lenient;
use crate::profile::{ActivityLevel, Goal, Sex};

pub const GOAL_ADJUSTMENT_KCAL: f64 = 500.0;

/// Macro split of target calories: protein / carbohydrate / fat
pub const MACRO_SPLIT_PCT: (f64, f64, f64) = (30.0, 40.0, 30.0);

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyInput {
    #[serde(deserialize_with = "lenient")]
    pub weight_kg: f64,
    #[serde(deserialize_with = "lenient")]
    pub height_cm: f64,
    #[serde(deserialize_with = "lenient")]
    pub age: f64,
    pub sex: Sex,
    pub activity: ActivityLevel,
    pub goal: Goal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: f64,
    pub macros: MacroGrams,
}

/// Mifflin-St Jeor basal metabolic rate in kcal/day.
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: f64, sex: Sex) -> f64 {
    let offset = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age + offset
}

/// Split a calorie budget into grams of each macronutrient.
pub fn macro_grams(calories: f64) -> MacroGrams {
    let (protein, carbs, fat) = MACRO_SPLIT_PCT;
    MacroGrams {
        protein_g: calories * protein / 100.0 / KCAL_PER_G_PROTEIN,
        carbs_g: calories * carbs / 100.0 / KCAL_PER_G_CARB,
        fat_g: calories * fat / 100.0 / KCAL_PER_G_FAT,
    }
}

pub fn calculate(input: &EnergyInput) -> EnergyResult {
    if input.weight_kg <= 0.0 || input.height_cm <= 0.0 {
        return EnergyResult {
            bmr: 0.0,
            tdee: 0.0,
            target_calories: 0.0,
            macros: macro_grams(0.0),
        };
    }

    let bmr = mifflin_st_jeor(input.weight_kg, input.height_cm, input.age.max(0.0), input.sex).max(0.0);
    let tdee = bmr * input.activity.tdee_multiplier();
    let target_calories = match input.goal {
        Goal::Lose => (tdee - GOAL_ADJUSTMENT_KCAL).max(0.0),
        Goal::Maintain => tdee,
        Goal::Gain => tdee + GOAL_ADJUSTMENT_KCAL,
    };

    EnergyResult {
        bmr,
        tdee,
        target_calories,
        macros: macro_grams(target_calories),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(sex: Sex) -> EnergyInput {
        EnergyInput {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: 30.0,
            sex,
            activity: ActivityLevel::Sedentary,
            goal: Goal::Maintain,
        }
    }

    #[test]
    fn test_male_bmr() {
        let result = calculate(&person(Sex::Male));
        // 700 + 1093.75 - 150 + 5
        assert_eq!(result.bmr, 1648.75);
        assert!((result.tdee - 1978.5).abs() < 1e-9);
    }

    #[test]
    fn test_female_bmr() {
        let result = calculate(&person(Sex::Female));
        assert_eq!(result.bmr, 1482.75);
    }

    #[test]
    fn test_goal_adjustment() {
        let mut input = person(Sex::Male);
        input.activity = ActivityLevel::Moderate;
        input.goal = Goal::Lose;
        let result = calculate(&input);
        assert!((result.target_calories - (result.tdee - 500.0)).abs() < 1e-9);
    }

    #[test]
    fn test_macros_add_up() {
        let macros = macro_grams(2000.0);
        let kcal = macros.protein_g * 4.0 + macros.carbs_g * 4.0 + macros.fat_g * 9.0;
        assert!((kcal - 2000.0).abs() < 1e-9);
        assert_eq!(macros.protein_g, 150.0);
    }

    #[test]
    fn test_missing_measurements() {
        let result = calculate(&EnergyInput::default());
        assert_eq!(result.tdee, 0.0);
    }
}
