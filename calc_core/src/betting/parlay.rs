//! # Parlay (Accumulator) Payout
//!
//! The combined price is the product of every leg's decimal odds. Legs that
//! are not valid prices are skipped rather than failing the whole slip.

use serde::{Deserialize, Serialize};

use super::odds::{decimal_to_american, to_decimal, OddsInput};
use crate::coerce::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParlayInput {
    pub legs: Vec<OddsInput>,
    #[serde(deserialize_with = "lenient")]
    pub stake: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParlayResult {
    pub combined_decimal: f64,
    pub combined_american: f64,
    pub payout: f64,
    pub profit: f64,
    pub implied_probability_pct: f64,
    pub legs_used: usize,
    pub skipped_legs: usize,
}

pub fn calculate(input: &ParlayInput) -> ParlayResult {
    let decimals: Vec<f64> = input
        .legs
        .iter()
        .filter_map(|leg| to_decimal(&leg.value, leg.format))
        .collect();
    let skipped_legs = input.legs.len() - decimals.len();

    if decimals.is_empty() {
        return ParlayResult {
            combined_decimal: 0.0,
            combined_american: 0.0,
            payout: 0.0,
            profit: 0.0,
            implied_probability_pct: 0.0,
            legs_used: 0,
            skipped_legs,
        };
    }

    let combined_decimal: f64 = decimals.iter().product();
    let stake = input.stake.max(0.0);
    let payout = stake * combined_decimal;

    ParlayResult {
        combined_decimal,
        combined_american: decimal_to_american(combined_decimal),
        payout,
        profit: payout - stake,
        implied_probability_pct: 100.0 / combined_decimal,
        legs_used: decimals.len(),
        skipped_legs,
    }
}
