//! # Stamp Duty Land Tax (England & Northern Ireland, residential)
//!
//! Band-table tax: each slice of the price is taxed at its own rate and the
//! slices are summed.
//!
//! ## Rates (from 1 April 2025)
//!
//! | Band              | Standard | First-time buyer (≤ £500k) |
//! |-------------------|----------|----------------------------|
//! | £0 – £125k        | 0%       | 0% (to £300k)              |
//! | £125k – £250k     | 2%       |                            |
//! | £250k – £925k     | 5%       | 5% (£300k – £500k)         |
//! | £925k – £1.5m     | 10%      |                            |
//! | over £1.5m        | 12%      |                            |
//!
//! Additional properties pay a 5% surcharge on every band; non-UK residents
//! pay a further 2%.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::finance::stamp_duty::{calculate, BuyerType, StampDutyInput};
//!
//! let result = calculate(&StampDutyInput {
//!     price: 300_000.0,
//!     buyer: BuyerType::Standard,
//!     non_resident: false,
//! });
//! assert_eq!(result.total_tax, 5_000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::lenient;

/// A tax band: rate applies to the slice of price from `from` up to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBand {
    pub from: f64,
    /// Upper bound; `None` for the open-ended top band
    pub to: Option<f64>,
    pub rate_pct: f64,
}

const fn band(from: f64, to: Option<f64>, rate_pct: f64) -> TaxBand {
    TaxBand { from, to, rate_pct }
}

/// Standard residential bands
pub const STANDARD_BANDS: [TaxBand; 5] = [
    band(0.0, Some(125_000.0), 0.0),
    band(125_000.0, Some(250_000.0), 2.0),
    band(250_000.0, Some(925_000.0), 5.0),
    band(925_000.0, Some(1_500_000.0), 10.0),
    band(1_500_000.0, None, 12.0),
];

/// First-time buyer relief bands
pub const FIRST_TIME_BUYER_BANDS: [TaxBand; 2] = [
    band(0.0, Some(300_000.0), 0.0),
    band(300_000.0, Some(500_000.0), 5.0),
];

/// First-time buyer relief is lost entirely above this price
pub const FIRST_TIME_BUYER_LIMIT: f64 = 500_000.0;

/// Surcharge on every band for second homes and buy-to-let
pub const ADDITIONAL_PROPERTY_SURCHARGE_PCT: f64 = 5.0;

/// Surcharge on every band for non-UK residents
pub const NON_RESIDENT_SURCHARGE_PCT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyerType {
    /// Moving home or buying a sole residence
    #[default]
    Standard,
    /// Never owned a home anywhere
    FirstTime,
    /// Already owns a residence (second home, buy-to-let)
    AdditionalProperty,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampDutyInput {
    #[serde(deserialize_with = "lenient")]
    pub price: f64,
    pub buyer: BuyerType,
    pub non_resident: bool,
}

/// Tax charged on one band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandCharge {
    pub from: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
    /// Effective rate for this buyer, surcharges included
    pub rate_pct: f64,
    pub taxable: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampDutyResult {
    pub total_tax: f64,
    pub effective_rate_pct: f64,
    /// True when first-time buyer relief was used
    pub relief_applied: bool,
    pub bands: Vec<BandCharge>,
}

/// Apply a band table to a price.
pub fn apply_bands(price: f64, bands: &[TaxBand], surcharge_pct: f64) -> Vec<BandCharge> {
    bands
        .iter()
        .map(|b| {
            let upper = b.to.map_or(price, |to| price.min(to));
            let taxable = (upper - b.from).max(0.0);
            let rate_pct = b.rate_pct + surcharge_pct;
            BandCharge {
                from: b.from,
                to: b.to,
                rate_pct,
                taxable,
                tax: taxable * rate_pct / 100.0,
            }
        })
        .collect()
}

pub fn calculate(input: &StampDutyInput) -> StampDutyResult {
    let price = input.price.max(0.0);

    let relief_applied =
        input.buyer == BuyerType::FirstTime && price <= FIRST_TIME_BUYER_LIMIT;

    let mut surcharge = 0.0;
    if input.buyer == BuyerType::AdditionalProperty {
        surcharge += ADDITIONAL_PROPERTY_SURCHARGE_PCT;
    }
    if input.non_resident {
        surcharge += NON_RESIDENT_SURCHARGE_PCT;
    }

    let table: &[TaxBand] = if relief_applied {
        &FIRST_TIME_BUYER_BANDS
    } else {
        &STANDARD_BANDS
    };

    let bands = apply_bands(price, table, surcharge);
    let total_tax: f64 = bands.iter().map(|b| b.tax).sum();
    let effective_rate_pct = if price > 0.0 {
        total_tax / price * 100.0
    } else {
        0.0
    };

    StampDutyResult {
        total_tax,
        effective_rate_pct,
        relief_applied,
        bands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tax(price: f64, buyer: BuyerType) -> f64 {
        calculate(&StampDutyInput {
            price,
            buyer,
            non_resident: false,
        })
        .total_tax
    }

    #[test]
    fn test_standard_bands() {
        assert_eq!(tax(125_000.0, BuyerType::Standard), 0.0);
        assert_eq!(tax(250_000.0, BuyerType::Standard), 2_500.0);
        assert_eq!(tax(500_000.0, BuyerType::Standard), 15_000.0);
        // 2,500 + 33,750 + 57,500 + 60,000
        assert_eq!(tax(2_000_000.0, BuyerType::Standard), 153_750.0);
    }

    #[test]
    fn test_first_time_buyer_relief() {
        assert_eq!(tax(300_000.0, BuyerType::FirstTime), 0.0);
        assert_eq!(tax(450_000.0, BuyerType::FirstTime), 7_500.0);
    }

    #[test]
    fn test_first_time_buyer_relief_lost_above_limit() {
        let result = calculate(&StampDutyInput {
            price: 510_000.0,
            buyer: BuyerType::FirstTime,
            non_resident: false,
        });
        assert!(!result.relief_applied);
        assert_eq!(result.total_tax, tax(510_000.0, BuyerType::Standard));
    }

    #[test]
    fn test_additional_property_surcharge() {
        // 125k @ 5% + 125k @ 7% + 50k @ 10%
        assert!((tax(300_000.0, BuyerType::AdditionalProperty) - 20_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_resident_surcharge() {
        let result = calculate(&StampDutyInput {
            price: 200_000.0,
            buyer: BuyerType::Standard,
            non_resident: true,
        });
        // 125k @ 2% + 75k @ 4%
        assert!((result.total_tax - 5_500.0).abs() < 1e-6);
        assert!((result.effective_rate_pct - 2.75).abs() < 1e-9);
    }

    #[test]
    fn test_band_breakdown() {
        let result = calculate(&StampDutyInput {
            price: 300_000.0,
            ..Default::default()
        });
        assert_eq!(result.bands.len(), 5);
        assert_eq!(result.bands[2].taxable, 50_000.0);
        assert_eq!(result.bands[4].taxable, 0.0);
    }

    #[test]
    fn test_zero_price() {
        let result = calculate(&StampDutyInput::default());
        assert_eq!(result.total_tax, 0.0);
        assert_eq!(result.effective_rate_pct, 0.0);
    }
}
