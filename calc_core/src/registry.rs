//! # Calculator Registry
//!
//! Central catalogue of every calculator. Each calculator has a stable
//! snake_case slug (used as the `calculator` tag in JSON requests), a
//! display title, a category and a one-line description.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::registry::{CalculatorKind, Category};
//!
//! let kind = CalculatorKind::from_slug("Stamp-Duty").unwrap();
//! assert_eq!(kind, CalculatorKind::StampDuty);
//! assert_eq!(kind.category(), Category::Finance);
//!
//! // Common aliases resolve too
//! assert_eq!(CalculatorKind::from_slug("mortgage"), Some(CalculatorKind::Loan));
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// Categories
// ============================================================================

/// Top-level grouping used when listing calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Finance,
    Fitness,
    Betting,
    Gardening,
    Math,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Finance,
        Category::Fitness,
        Category::Betting,
        Category::Gardening,
        Category::Math,
    ];

    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Finance => "Finance",
            Category::Fitness => "Fitness & Nutrition",
            Category::Betting => "Betting",
            Category::Gardening => "Gardening",
            Category::Math => "Math & Statistics",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Finance => "finance",
            Category::Fitness => "fitness",
            Category::Betting => "betting",
            Category::Gardening => "gardening",
            Category::Math => "math",
        }
    }

    /// Case-insensitive lookup by slug or display name.
    pub fn from_name(name: &str) -> Option<Category> {
        let wanted = name.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == wanted || c.display_name().to_lowercase() == wanted)
    }

    /// Sort order for listings (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            Category::Finance => 1,
            Category::Fitness => 2,
            Category::Betting => 3,
            Category::Gardening => 4,
            Category::Math => 5,
        }
    }
}

// ============================================================================
// Calculators
// ============================================================================

/// Type-safe identifier for each calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    Loan,
    CompoundInterest,
    Cagr,
    Tip,
    StampDuty,
    Insurance,
    Bmi,
    Ffmi,
    Energy,
    Protein,
    Fiber,
    Odds,
    Parlay,
    Kelly,
    SoilVolume,
    PlantSpacing,
    Sqrt,
    Polynomial,
    Triangle,
    Coordinate,
    ZScore,
    DescriptiveStatistics,
    Differential,
}

/// Serializable summary of a calculator, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatorInfo {
    pub slug: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub description: &'static str,
}

/// Alternative names accepted by [`CalculatorKind::from_slug`].
const ALIASES: &[(&str, CalculatorKind)] = &[
    ("mortgage", CalculatorKind::Loan),
    ("boat_loan", CalculatorKind::Loan),
    ("car_loan", CalculatorKind::Loan),
    ("amortization", CalculatorKind::Loan),
    ("savings", CalculatorKind::CompoundInterest),
    ("sdlt", CalculatorKind::StampDuty),
    ("life_insurance", CalculatorKind::Insurance),
    ("bmr", CalculatorKind::Energy),
    ("tdee", CalculatorKind::Energy),
    ("macros", CalculatorKind::Energy),
    ("odds_converter", CalculatorKind::Odds),
    ("accumulator", CalculatorKind::Parlay),
    ("square_root", CalculatorKind::Sqrt),
    ("heron", CalculatorKind::Triangle),
    ("statistics", CalculatorKind::DescriptiveStatistics),
    ("stats", CalculatorKind::DescriptiveStatistics),
    ("ode", CalculatorKind::Differential),
];

static SLUG_LOOKUP: Lazy<HashMap<&'static str, CalculatorKind>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, CalculatorKind> =
        CalculatorKind::ALL.iter().map(|k| (k.slug(), *k)).collect();
    for (alias, kind) in ALIASES {
        map.insert(*alias, *kind);
    }
    map
});

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 23] = [
        CalculatorKind::Loan,
        CalculatorKind::CompoundInterest,
        CalculatorKind::Cagr,
        CalculatorKind::Tip,
        CalculatorKind::StampDuty,
        CalculatorKind::Insurance,
        CalculatorKind::Bmi,
        CalculatorKind::Ffmi,
        CalculatorKind::Energy,
        CalculatorKind::Protein,
        CalculatorKind::Fiber,
        CalculatorKind::Odds,
        CalculatorKind::Parlay,
        CalculatorKind::Kelly,
        CalculatorKind::SoilVolume,
        CalculatorKind::PlantSpacing,
        CalculatorKind::Sqrt,
        CalculatorKind::Polynomial,
        CalculatorKind::Triangle,
        CalculatorKind::Coordinate,
        CalculatorKind::ZScore,
        CalculatorKind::DescriptiveStatistics,
        CalculatorKind::Differential,
    ];

    /// Stable identifier, identical to the serde tag
    pub fn slug(&self) -> &'static str {
        match self {
            CalculatorKind::Loan => "loan",
            CalculatorKind::CompoundInterest => "compound_interest",
            CalculatorKind::Cagr => "cagr",
            CalculatorKind::Tip => "tip",
            CalculatorKind::StampDuty => "stamp_duty",
            CalculatorKind::Insurance => "insurance",
            CalculatorKind::Bmi => "bmi",
            CalculatorKind::Ffmi => "ffmi",
            CalculatorKind::Energy => "energy",
            CalculatorKind::Protein => "protein",
            CalculatorKind::Fiber => "fiber",
            CalculatorKind::Odds => "odds",
            CalculatorKind::Parlay => "parlay",
            CalculatorKind::Kelly => "kelly",
            CalculatorKind::SoilVolume => "soil_volume",
            CalculatorKind::PlantSpacing => "plant_spacing",
            CalculatorKind::Sqrt => "sqrt",
            CalculatorKind::Polynomial => "polynomial",
            CalculatorKind::Triangle => "triangle",
            CalculatorKind::Coordinate => "coordinate",
            CalculatorKind::ZScore => "z_score",
            CalculatorKind::DescriptiveStatistics => "descriptive_statistics",
            CalculatorKind::Differential => "differential",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::Loan => "Loan Amortization",
            CalculatorKind::CompoundInterest => "Compound Interest",
            CalculatorKind::Cagr => "Compound Annual Growth Rate",
            CalculatorKind::Tip => "Tip Calculator",
            CalculatorKind::StampDuty => "Stamp Duty (SDLT)",
            CalculatorKind::Insurance => "Term Life Insurance Estimate",
            CalculatorKind::Bmi => "Body Mass Index",
            CalculatorKind::Ffmi => "Fat-Free Mass Index",
            CalculatorKind::Energy => "Calories & Macros (BMR / TDEE)",
            CalculatorKind::Protein => "Protein Intake",
            CalculatorKind::Fiber => "Fiber Intake",
            CalculatorKind::Odds => "Odds Converter",
            CalculatorKind::Parlay => "Parlay Payout",
            CalculatorKind::Kelly => "Kelly Criterion",
            CalculatorKind::SoilVolume => "Soil Volume",
            CalculatorKind::PlantSpacing => "Plant Spacing",
            CalculatorKind::Sqrt => "Square Root (Newton's Method)",
            CalculatorKind::Polynomial => "Polynomial Roots",
            CalculatorKind::Triangle => "Triangle (Heron's Formula)",
            CalculatorKind::Coordinate => "Two-Point Line",
            CalculatorKind::ZScore => "Z-Score & P-Value",
            CalculatorKind::DescriptiveStatistics => "Descriptive Statistics",
            CalculatorKind::Differential => "Differential Equation Solver",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            CalculatorKind::Loan
            | CalculatorKind::CompoundInterest
            | CalculatorKind::Cagr
            | CalculatorKind::Tip
            | CalculatorKind::StampDuty
            | CalculatorKind::Insurance => Category::Finance,
            CalculatorKind::Bmi
            | CalculatorKind::Ffmi
            | CalculatorKind::Energy
            | CalculatorKind::Protein
            | CalculatorKind::Fiber => Category::Fitness,
            CalculatorKind::Odds | CalculatorKind::Parlay | CalculatorKind::Kelly => Category::Betting,
            CalculatorKind::SoilVolume | CalculatorKind::PlantSpacing => Category::Gardening,
            CalculatorKind::Sqrt
            | CalculatorKind::Polynomial
            | CalculatorKind::Triangle
            | CalculatorKind::Coordinate
            | CalculatorKind::ZScore
            | CalculatorKind::DescriptiveStatistics
            | CalculatorKind::Differential => Category::Math,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CalculatorKind::Loan => {
                "Monthly payment, total interest and amortization schedule for a loan, with optional extra payments"
            }
            CalculatorKind::CompoundInterest => {
                "Future value of a deposit with monthly contributions and periodic compounding"
            }
            CalculatorKind::Cagr => "Annualized growth rate between a beginning and ending value",
            CalculatorKind::Tip => "Tip amount, total and per-person split of a bill",
            CalculatorKind::StampDuty => {
                "UK Stamp Duty Land Tax by band, including first-time buyer relief and surcharges"
            }
            CalculatorKind::Insurance => "Indicative term life premium from an age and term rate table",
            CalculatorKind::Bmi => "Body mass index, category and healthy weight range",
            CalculatorKind::Ffmi => "Fat-free mass index, raw and normalized to 1.8 m",
            CalculatorKind::Energy => {
                "Basal metabolic rate (Mifflin-St Jeor), daily energy expenditure, goal calories and macros"
            }
            CalculatorKind::Protein => "Daily protein target by body weight, activity and goal",
            CalculatorKind::Fiber => "Recommended daily fiber by age and sex",
            CalculatorKind::Odds => "Convert between American, decimal, fractional odds and implied probability",
            CalculatorKind::Parlay => "Combined odds, payout and probability of a multi-leg bet",
            CalculatorKind::Kelly => "Optimal stake fraction by the Kelly criterion",
            CalculatorKind::SoilVolume => "Soil or mulch volume and bag count for a garden bed",
            CalculatorKind::PlantSpacing => "Number of plants in a bed on a square or triangular grid",
            CalculatorKind::Sqrt => "Square root by Newton's method, showing each iteration",
            CalculatorKind::Polynomial => "Real roots and derivative of a polynomial",
            CalculatorKind::Triangle => "Area, perimeter, angles and type of a triangle from its sides",
            CalculatorKind::Coordinate => "Distance, midpoint, slope and equation of the line through two points",
            CalculatorKind::ZScore => "Z-score, percentile and p-values against a normal distribution",
            CalculatorKind::DescriptiveStatistics => "Mean, median, mode, variance and spread of a list of numbers",
            CalculatorKind::Differential => "Numerical solution of dy/dx = f(x, y) by Euler, Heun or RK4",
        }
    }

    /// Resolve a slug or alias. Case-insensitive; `-` and spaces count as `_`.
    pub fn from_slug(slug: &str) -> Option<CalculatorKind> {
        let normalized: String = slug
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        SLUG_LOOKUP.get(normalized.as_str()).copied()
    }

    pub fn info(&self) -> CalculatorInfo {
        CalculatorInfo {
            slug: self.slug(),
            title: self.title(),
            category: self.category(),
            description: self.description(),
        }
    }

    /// All calculators in a category, in catalogue order.
    pub fn in_category(category: Category) -> impl Iterator<Item = CalculatorKind> {
        CalculatorKind::ALL
            .into_iter()
            .filter(move |k| k.category() == category)
    }
}

impl std::fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugs_unique_and_round_trip() {
        let slugs: HashSet<_> = CalculatorKind::ALL.iter().map(|k| k.slug()).collect();
        assert_eq!(slugs.len(), CalculatorKind::ALL.len());
        for kind in CalculatorKind::ALL {
            assert_eq!(CalculatorKind::from_slug(kind.slug()), Some(kind));
        }
    }

    #[test]
    fn test_slug_matches_serde_name() {
        for kind in CalculatorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.slug()));
        }
    }

    #[test]
    fn test_from_slug_normalization() {
        assert_eq!(CalculatorKind::from_slug("  Compound-Interest "), Some(CalculatorKind::CompoundInterest));
        assert_eq!(CalculatorKind::from_slug("Z SCORE"), Some(CalculatorKind::ZScore));
        assert_eq!(CalculatorKind::from_slug("tdee"), Some(CalculatorKind::Energy));
        assert_eq!(CalculatorKind::from_slug("unknown"), None);
    }

    #[test]
    fn test_every_category_populated() {
        for category in Category::ALL {
            assert!(CalculatorKind::in_category(category).count() > 0);
        }
        assert_eq!(CalculatorKind::in_category(Category::Math).count(), 7);
    }

    #[test]
    fn test_category_from_name() {
        assert_eq!(Category::from_name("FINANCE"), Some(Category::Finance));
        assert_eq!(Category::from_name("math & statistics"), Some(Category::Math));
        assert_eq!(Category::from_name("cooking"), None);
    }

    #[test]
    fn test_info_serializes() {
        let json = serde_json::to_value(CalculatorKind::Kelly.info()).unwrap();
        assert_eq!(json["slug"], "kelly");
        assert_eq!(json["category"], "betting");
    }
}
