//! # Compound Interest
//!
//! Growth of a lump sum plus regular monthly contributions. The balance is
//! stepped month by month using the effective monthly factor
//! `(1 + r/n)^(n/12)`, so any compounding frequency (annual through daily)
//! runs through the same loop. Contributions land at the end of each month.

use serde::{Deserialize, Serialize};

use crate::coerce::{lenient, whole_count};

/// Longest projection accepted; longer horizons are clamped
pub const MAX_YEARS: usize = 100;

/// Input parameters for a compound-interest projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundInterestInput {
    #[serde(deserialize_with = "lenient")]
    pub principal: f64,

    /// Nominal annual rate in percent
    #[serde(deserialize_with = "lenient")]
    pub annual_rate_pct: f64,

    /// Whole years to project, capped at `MAX_YEARS`
    #[serde(deserialize_with = "lenient")]
    pub years: f64,

    /// Compounding periods per year (1, 4, 12, 365, ...)
    #[serde(deserialize_with = "lenient")]
    pub compounds_per_year: f64,

    #[serde(deserialize_with = "lenient")]
    pub monthly_contribution: f64,
}

impl Default for CompoundInterestInput {
    fn default() -> Self {
        CompoundInterestInput {
            principal: 0.0,
            annual_rate_pct: 0.0,
            years: 0.0,
            compounds_per_year: 12.0,
            monthly_contribution: 0.0,
        }
    }
}

/// Balance at the end of one projected year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundYear {
    pub year: usize,
    pub balance: f64,
    /// Cumulative money put in (principal + contributions)
    pub contributions: f64,
    /// Cumulative interest earned
    pub interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub future_value: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub yearly: Vec<CompoundYear>,
}

/// Effective growth factor for one month.
pub fn monthly_growth_factor(annual_rate: f64, compounds_per_year: usize) -> f64 {
    let n = compounds_per_year.max(1) as f64;
    (1.0 + annual_rate / n).powf(n / 12.0)
}

pub fn calculate(input: &CompoundInterestInput) -> CompoundInterestResult {
    let principal = input.principal.max(0.0);
    let contribution = input.monthly_contribution.max(0.0);
    let years = whole_count(input.years, 0).min(MAX_YEARS);
    let factor = monthly_growth_factor(
        input.annual_rate_pct.max(0.0) / 100.0,
        whole_count(input.compounds_per_year, 1),
    );

    let mut balance = principal;
    let mut contributed = principal;
    let mut yearly = Vec::with_capacity(years);

    for year in 1..=years {
        for _ in 0..12 {
            balance = balance * factor + contribution;
            contributed += contribution;
        }
        yearly.push(CompoundYear {
            year,
            balance,
            contributions: contributed,
            interest: balance - contributed,
        });
    }

    CompoundInterestResult {
        future_value: balance,
        total_contributions: contributed,
        total_interest: balance - contributed,
        yearly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_compounding_matches_closed_form() {
        let input = CompoundInterestInput {
            principal: 1000.0,
            annual_rate_pct: 5.0,
            years: 10.0,
            compounds_per_year: 1.0,
            ..Default::default()
        };
        let result = calculate(&input);
        let expected = 1000.0 * 1.05_f64.powi(10);
        assert!((result.future_value - expected).abs() < 1e-6);
    }

    #[test]
    fn test_years_are_capped() {
        let input = CompoundInterestInput {
            principal: 100.0,
            annual_rate_pct: 1.0,
            years: 1e30,
            ..Default::default()
        };
        let result = calculate(&input);
        assert_eq!(result.yearly.len(), MAX_YEARS);
        assert_eq!(result.yearly.last().unwrap().year, MAX_YEARS);
    }

    #[test]
    fn test_monthly_compounding() {
        let input = CompoundInterestInput {
            principal: 10_000.0,
            annual_rate_pct: 6.0,
            years: 5.0,
            ..Default::default()
        };
        let result = calculate(&input);
        // 10000 * (1.005)^60
        assert!((result.future_value - 13_488.50).abs() < 0.01);
        assert_eq!(result.yearly.len(), 5);
    }

    #[test]
    fn test_contributions_without_interest() {
        let input = CompoundInterestInput {
            principal: 500.0,
            years: 2.0,
            monthly_contribution: 100.0,
            ..Default::default()
        };
        let result = calculate(&input);
        assert_eq!(result.future_value, 2900.0);
        assert_eq!(result.total_contributions, 2900.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_yearly_interest_grows() {
        let input = CompoundInterestInput {
            principal: 1000.0,
            annual_rate_pct: 8.0,
            years: 3.0,
            monthly_contribution: 50.0,
            ..Default::default()
        };
        let result = calculate(&input);
        assert!(result.yearly[0].interest < result.yearly[1].interest);
        assert_eq!(result.yearly[2].balance, result.future_value);
    }

    #[test]
    fn test_zero_years() {
        let input = CompoundInterestInput {
            principal: 1000.0,
            annual_rate_pct: 5.0,
            ..Default::default()
        };
        let result = calculate(&input);
        assert_eq!(result.future_value, 1000.0);
        assert!(result.yearly.is_empty());
    }
}
