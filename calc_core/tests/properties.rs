//! Property-based tests for calculator invariants.

use proptest::prelude::*;

use calc_core::betting::odds::{american_to_decimal, decimal_to_american};
use calc_core::finance::loan::{self, LoanInput};
use calc_core::math::statistics::describe;
use calc_core::math::triangle::solve;

fn american_odds() -> impl Strategy<Value = f64> {
    prop_oneof![100.0f64..10_000.0, -10_000.0f64..-100.5]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// American -> decimal -> American returns the original price.
    #[test]
    fn american_odds_round_trip(american in american_odds()) {
        let decimal = american_to_decimal(american).unwrap();
        let back = decimal_to_american(decimal);
        prop_assert!((back - american).abs() < 1e-6 * american.abs(), "{} -> {} -> {}", american, decimal, back);
    }

    /// Decimal odds always exceed 1 for valid American prices.
    #[test]
    fn decimal_odds_above_one(american in american_odds()) {
        prop_assert!(american_to_decimal(american).unwrap() > 1.0);
    }

    /// Heron's area is never negative or NaN, and valid triangles have 180 degrees.
    #[test]
    fn triangle_area_non_negative(a in 0.0f64..1000.0, b in 0.0f64..1000.0, c in 0.0f64..1000.0) {
        let t = solve(a, b, c);
        prop_assert!(t.area >= 0.0);
        prop_assert!(!t.area.is_nan());
        if t.valid {
            let sum: f64 = t.angles_deg.iter().sum();
            prop_assert!((sum - 180.0).abs() < 1e-4, "angles sum to {}", sum);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// The amortization schedule always ends at a zero balance and repays the loan.
    #[test]
    fn amortization_balance_reaches_zero(
        price in 1_000.0f64..1_000_000.0,
        rate in 0.0f64..25.0,
        term in 1u32..480,
        extra in 0.0f64..2_000.0,
    ) {
        let input = LoanInput {
            price,
            annual_rate_pct: rate,
            term_months: term as f64,
            extra_monthly_payment: extra,
            ..LoanInput::default()
        };
        let result = loan::calculate(&input);

        let last = result.schedule.last().unwrap();
        prop_assert_eq!(last.balance, 0.0);
        prop_assert!(result.payoff_months <= term as usize);

        let repaid: f64 = result.schedule.iter().map(|r| r.principal + r.extra_principal).sum();
        prop_assert!((repaid - price).abs() < 1e-6 * price);
    }

    /// The mean of a sample lies between its minimum and maximum.
    #[test]
    fn mean_within_range(values in prop::collection::vec(-1e6f64..1e6, 1..50)) {
        let summary = describe(&values);
        prop_assert!(summary.min <= summary.mean + 1e-9);
        prop_assert!(summary.mean <= summary.max + 1e-9);
        prop_assert!(summary.population_variance >= 0.0);
    }
}
