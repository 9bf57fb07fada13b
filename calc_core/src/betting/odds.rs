//! # Odds Converter
//!
//! Converts a price between the four common notations. Everything is routed
//! through decimal odds (total return per unit staked):
//!
//! | From                  | To decimal                         |
//! |-----------------------|------------------------------------|
//! | American `+a`         | `1 + a/100`                        |
//! | American `−a`         | `1 + 100/a`                        |
//! | Fractional `n/d`      | `1 + n/d`                          |
//! | Implied probability p | `100 / p`                          |
//!
//! American ±100 both mean even money and normalize to `+100`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::betting::odds::{convert_odds, OddsFormat};
//!
//! let result = convert_odds("-150", OddsFormat::American);
//! assert!((result.decimal - 1.6667).abs() < 1e-4);
//! assert_eq!(result.fractional, "2/3");
//! assert!((result.implied_probability_pct - 60.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::{lenient_text, parse_number};

/// Largest denominator used when expressing odds as a fraction
pub const MAX_FRACTION_DENOMINATOR: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OddsFormat {
    #[default]
    American,
    Decimal,
    Fractional,
    /// Win probability in percent
    ImpliedProbability,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsInput {
    /// Odds as typed: "-110", "2.5", "5/2", "40"
    #[serde(deserialize_with = "lenient_text")]
    pub value: String,
    pub format: OddsFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsResult {
    /// False when the input is not a valid price; all figures are then 0
    pub valid: bool,
    pub american: f64,
    pub decimal: f64,
    /// Fraction in lowest terms, e.g. "5/2"
    pub fractional: String,
    pub implied_probability_pct: f64,
}

impl OddsResult {
    fn invalid() -> Self {
        OddsResult {
            valid: false,
            american: 0.0,
            decimal: 0.0,
            fractional: String::new(),
            implied_probability_pct: 0.0,
        }
    }

    /// Build every notation from a decimal price.
    pub fn from_decimal(decimal: f64) -> Self {
        if !decimal.is_finite() || decimal <= 1.0 {
            return OddsResult::invalid();
        }
        let (num, den) = best_fraction(decimal - 1.0, MAX_FRACTION_DENOMINATOR);
        OddsResult {
            valid: true,
            american: decimal_to_american(decimal),
            decimal,
            fractional: format!("{}/{}", num, den),
            implied_probability_pct: 100.0 / decimal,
        }
    }
}

/// American odds to decimal; `None` for the dead zone between −100 and +100.
pub fn american_to_decimal(american: f64) -> Option<f64> {
    if american >= 100.0 {
        Some(1.0 + american / 100.0)
    } else if american <= -100.0 {
        Some(1.0 + 100.0 / -american)
    } else {
        None
    }
}

/// Decimal odds (> 1) to American.
pub fn decimal_to_american(decimal: f64) -> f64 {
    if decimal >= 2.0 {
        (decimal - 1.0) * 100.0
    } else {
        -100.0 / (decimal - 1.0)
    }
}

/// Parse "n/d" (or "evens") into a decimal price.
pub fn fractional_to_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("evens") || text.eq_ignore_ascii_case("evs") {
        return Some(2.0);
    }
    let (num, den) = match text.split_once('/') {
        Some((n, d)) => (parse_number(n), parse_number(d)),
        None => (parse_number(text), 1.0),
    };
    if num <= 0.0 || den <= 0.0 {
        return None;
    }
    Some(1.0 + num / den)
}

/// Convert any supported notation to decimal odds.
pub fn to_decimal(value: &str, format: OddsFormat) -> Option<f64> {
    let decimal = match format {
        OddsFormat::American => american_to_decimal(parse_number(value))?,
        OddsFormat::Decimal => parse_number(value),
        OddsFormat::Fractional => fractional_to_decimal(value)?,
        OddsFormat::ImpliedProbability => {
            let pct = parse_number(value);
            if pct <= 0.0 || pct >= 100.0 {
                return None;
            }
            100.0 / pct
        }
    };
    (decimal > 1.0 && decimal.is_finite()).then_some(decimal)
}

/// Closest fraction to `x` with denominator at most `max_den`.
///
/// Ties keep the smaller denominator, so the result is in lowest terms.
pub fn best_fraction(x: f64, max_den: u64) -> (u64, u64) {
    let mut best = (1, 1);
    let mut best_err = f64::INFINITY;
    for den in 1..=max_den.max(1) {
        let num = (x * den as f64).round().max(1.0) as u64;
        let err = (x - num as f64 / den as f64).abs();
        if err < best_err - 1e-12 {
            best = (num, den);
            best_err = err;
        }
    }
    best
}

/// Convert odds in one notation to all the others.
pub fn convert_odds(value: &str, format: OddsFormat) -> OddsResult {
    match to_decimal(value, format) {
        Some(decimal) => OddsResult::from_decimal(decimal),
        None => OddsResult::invalid(),
    }
}

pub fn calculate(input: &OddsInput) -> OddsResult {
    convert_odds(&input.value, input.format)
}
