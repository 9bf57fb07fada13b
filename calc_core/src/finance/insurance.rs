//! # Term Life Insurance Estimate
//!
//! Rough premium estimate from a rate table. The annual premium is
//!
//! ```text
//! coverage / 1000 × rate(age band) × term factor × smoker factor × sex factor
//! ```
//!
//! Real underwriting uses far more inputs; this mirrors the ballpark numbers
//! quote comparison pages show.

use serde::{Deserialize, Serialize};

use crate::coerce::lenient;
use crate::profile::Sex;

pub const MIN_INSURABLE_AGE: f64 = 18.0;
pub const MAX_INSURABLE_AGE: f64 = 85.0;
pub const SMOKER_FACTOR: f64 = 2.5;
pub const FEMALE_FACTOR: f64 = 0.85;

/// Annual rate per $1000 of coverage, by upper age bound (exclusive)
const AGE_RATES: [(f64, &str, f64); 6] = [
    (30.0, "18-29", 0.08),
    (40.0, "30-39", 0.11),
    (50.0, "40-49", 0.22),
    (60.0, "50-59", 0.55),
    (70.0, "60-69", 1.40),
    (f64::INFINITY, "70+", 3.20),
];

/// Multiplier by term length, by upper term bound (inclusive)
const TERM_FACTORS: [(f64, f64); 5] = [
    (10.0, 1.0),
    (15.0, 1.15),
    (20.0, 1.3),
    (25.0, 1.5),
    (f64::INFINITY, 1.7),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceInput {
    #[serde(deserialize_with = "lenient")]
    pub age: f64,
    /// Death benefit in dollars
    #[serde(deserialize_with = "lenient")]
    pub coverage: f64,
    #[serde(deserialize_with = "lenient")]
    pub term_years: f64,
    pub smoker: bool,
    pub sex: Sex,
}

impl Default for InsuranceInput {
    fn default() -> Self {
        InsuranceInput {
            age: 30.0,
            coverage: 500_000.0,
            term_years: 20.0,
            smoker: false,
            sex: Sex::Male,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceResult {
    /// False when the age falls outside the rate table
    pub insurable: bool,
    pub age_band: String,
    /// Base table rate per $1000 of coverage per year
    pub rate_per_thousand: f64,
    pub annual_premium: f64,
    pub monthly_premium: f64,
}

/// Look up the age band label and base rate.
pub fn age_rate(age: f64) -> Option<(&'static str, f64)> {
    if !(MIN_INSURABLE_AGE..=MAX_INSURABLE_AGE).contains(&age) {
        return None;
    }
    AGE_RATES
        .iter()
        .find(|(upper, _, _)| age < *upper)
        .map(|(_, label, rate)| (*label, *rate))
}

/// Look up the term-length multiplier.
pub fn term_factor(term_years: f64) -> f64 {
    TERM_FACTORS
        .iter()
        .find(|(upper, _)| term_years <= *upper)
        .map_or(1.0, |(_, factor)| *factor)
}

pub fn calculate(input: &InsuranceInput) -> InsuranceResult {
    let Some((band, rate)) = age_rate(input.age) else {
        return InsuranceResult {
            insurable: false,
            age_band: "uninsurable".to_string(),
            rate_per_thousand: 0.0,
            annual_premium: 0.0,
            monthly_premium: 0.0,
        };
    };

    let smoker = if input.smoker { SMOKER_FACTOR } else { 1.0 };
    let sex = match input.sex {
        Sex::Male => 1.0,
        Sex::Female => FEMALE_FACTOR,
    };

    let annual_premium =
        input.coverage.max(0.0) / 1000.0 * rate * term_factor(input.term_years) * smoker * sex;

    InsuranceResult {
        insurable: true,
        age_band: band.to_string(),
        rate_per_thousand: rate,
        annual_premium,
        monthly_premium: annual_premium / 12.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_premium() {
        let result = calculate(&InsuranceInput {
            age: 25.0,
            coverage: 500_000.0,
            term_years: 10.0,
            ..Default::default()
        });
        // 500 × 0.08
        assert!((result.annual_premium - 40.0).abs() < 1e-9);
        assert_eq!(result.age_band, "18-29");
    }

    #[test]
    fn test_factors_multiply() {
        let result = calculate(&InsuranceInput {
            age: 45.0,
            coverage: 250_000.0,
            term_years: 20.0,
            smoker: true,
            sex: Sex::Female,
        });
        let expected = 250.0 * 0.22 * 1.3 * 2.5 * 0.85;
        assert!((result.annual_premium - expected).abs() < 1e-9);
        assert!((result.monthly_premium * 12.0 - expected).abs() < 1e-9);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(age_rate(29.9).map(|r| r.0), Some("18-29"));
        assert_eq!(age_rate(30.0).map(|r| r.0), Some("30-39"));
        assert_eq!(age_rate(85.0).map(|r| r.0), Some("70+"));
        assert_eq!(term_factor(30.0), 1.7);
    }

    #[test]
    fn test_outside_table() {
        let minor = calculate(&InsuranceInput {
            age: 16.0,
            ..Default::default()
        });
        assert!(!minor.insurable);
        assert_eq!(minor.annual_premium, 0.0);

        assert!(!calculate(&InsuranceInput { age: 90.0, ..Default::default() }).insurable);
    }
}
