//! # Tip / Gratuity Splitter
//!
//! ```rust
//! use calc_core::finance::tip::calculate_tip;
//!
//! let result = calculate_tip(50.0, 15.0, 2.0);
//! assert_eq!(result.tip, 7.5);
//! assert_eq!(result.total, 57.5);
//! assert_eq!(result.per_person, 28.75);
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::{lenient, whole_count};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipInput {
    #[serde(deserialize_with = "lenient")]
    pub bill: f64,
    #[serde(deserialize_with = "lenient")]
    pub tip_pct: f64,
    /// Number of people splitting the bill (at least 1)
    #[serde(deserialize_with = "lenient")]
    pub people: f64,
    /// Round each share up to the next whole currency unit
    pub round_up: bool,
}

impl Default for TipInput {
    fn default() -> Self {
        TipInput {
            bill: 0.0,
            tip_pct: 15.0,
            people: 1.0,
            round_up: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipResult {
    pub tip: f64,
    pub total: f64,
    pub per_person: f64,
    pub tip_per_person: f64,
    /// Number of people the bill was actually split across
    pub people: usize,
}

/// Shorthand for the common three-number form.
pub fn calculate_tip(bill: f64, tip_pct: f64, people: f64) -> TipResult {
    calculate(&TipInput {
        bill,
        tip_pct,
        people,
        round_up: false,
    })
}

pub fn calculate(input: &TipInput) -> TipResult {
    let bill = input.bill.max(0.0);
    let people = whole_count(input.people, 1);
    let split = people as f64;

    let mut tip = bill * input.tip_pct.max(0.0) / 100.0;
    let mut per_person = (bill + tip) / split;

    if input.round_up {
        per_person = per_person.ceil();
        // The rounding surplus goes to the tip
        tip = per_person * split - bill;
    }

    let total = bill + tip;
    TipResult {
        tip,
        total,
        per_person,
        tip_per_person: tip / split,
        people,
    }
}
