//! # Kelly Criterion Stake
//!
//! ```text
//! f* = (b·p − q) / b
//! ```
//!
//! where `b` is the net decimal odds (odds − 1), `p` the win probability and
//! `q = 1 − p`. A negative `f*` means the bet has no edge and the stake is 0.
//! `fraction` scales the stake down (0.5 for half-Kelly).

use serde::{Deserialize, Serialize};

use crate::coerce::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KellyInput {
    #[serde(deserialize_with = "lenient")]
    pub decimal_odds: f64,
    /// Estimated probability of winning, in percent
    #[serde(deserialize_with = "lenient")]
    pub win_probability_pct: f64,
    #[serde(deserialize_with = "lenient")]
    pub bankroll: f64,
    /// Portion of the full Kelly stake to use (0-1)
    #[serde(deserialize_with = "lenient")]
    pub fraction: f64,
}

impl Default for KellyInput {
    fn default() -> Self {
        KellyInput {
            decimal_odds: 0.0,
            win_probability_pct: 0.0,
            bankroll: 0.0,
            fraction: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KellyResult {
    /// Share of bankroll to stake, after the fractional multiplier
    pub kelly_fraction: f64,
    pub stake: f64,
    /// Expected profit per unit staked
    pub expected_value: f64,
    /// Expected return over the bookmaker's implied probability, in percent
    pub edge_pct: f64,
    pub implied_probability_pct: f64,
}

pub fn calculate(input: &KellyInput) -> KellyResult {
    let b = input.decimal_odds - 1.0;
    if b <= 0.0 {
        return KellyResult {
            kelly_fraction: 0.0,
            stake: 0.0,
            expected_value: 0.0,
            edge_pct: 0.0,
            implied_probability_pct: 0.0,
        };
    }

    let p = (input.win_probability_pct / 100.0).clamp(0.0, 1.0);
    let q = 1.0 - p;
    let full_kelly = ((b * p - q) / b).max(0.0);
    let kelly_fraction = full_kelly * input.fraction.clamp(0.0, 1.0);
    let expected_value = b * p - q;

    KellyResult {
        kelly_fraction,
        stake: kelly_fraction * input.bankroll.max(0.0),
        expected_value,
        edge_pct: expected_value * 100.0,
        implied_probability_pct: 100.0 / input.decimal_odds,
    }
}
