//! # Compound Annual Growth Rate
//!
//! ```rust
//! use calc_core::finance::cagr::{calculate, CagrInput};
//!
//! let result = calculate(&CagrInput { begin_value: 1000.0, end_value: 2000.0, years: 5.0 });
//! assert!((result.cagr_pct - 14.87).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::{finite_or_zero, lenient};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CagrInput {
    #[serde(deserialize_with = "lenient")]
    pub begin_value: f64,
    #[serde(deserialize_with = "lenient")]
    pub end_value: f64,
    /// Holding period in years (fractional years allowed)
    #[serde(deserialize_with = "lenient")]
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CagrResult {
    /// Annualized growth rate in percent
    pub cagr_pct: f64,
    /// Whole-period return in percent
    pub total_return_pct: f64,
    pub absolute_change: f64,
}

/// Calculate CAGR = (end / begin)^(1 / years) − 1.
///
/// A non-positive starting value, negative ending value, or non-positive
/// period has no meaningful growth rate and reports 0.
pub fn calculate(input: &CagrInput) -> CagrResult {
    let CagrInput {
        begin_value,
        end_value,
        years,
    } = *input;

    let absolute_change = end_value - begin_value;
    if begin_value <= 0.0 || end_value < 0.0 || years <= 0.0 {
        return CagrResult {
            cagr_pct: 0.0,
            total_return_pct: 0.0,
            absolute_change,
        };
    }

    let ratio = end_value / begin_value;
    CagrResult {
        cagr_pct: finite_or_zero((ratio.powf(1.0 / years) - 1.0) * 100.0),
        total_return_pct: (ratio - 1.0) * 100.0,
        absolute_change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubling_in_ten_years() {
        let result = calculate(&CagrInput {
            begin_value: 100.0,
            end_value: 200.0,
            years: 10.0,
        });
        assert!((result.cagr_pct - 7.177).abs() < 0.001);
        assert_eq!(result.total_return_pct, 100.0);
        assert_eq!(result.absolute_change, 100.0);
    }

    #[test]
    fn test_loss() {
        let result = calculate(&CagrInput {
            begin_value: 1000.0,
            end_value: 810.0,
            years: 2.0,
        });
        assert!((result.cagr_pct + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs() {
        let zero_begin = calculate(&CagrInput {
            begin_value: 0.0,
            end_value: 500.0,
            years: 3.0,
        });
        assert_eq!(zero_begin.cagr_pct, 0.0);
        assert_eq!(zero_begin.absolute_change, 500.0);

        let zero_years = calculate(&CagrInput {
            begin_value: 100.0,
            end_value: 500.0,
            years: 0.0,
        });
        assert_eq!(zero_years.cagr_pct, 0.0);
    }
}
