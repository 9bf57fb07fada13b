//! # calc_core - Everyday Calculator Engine
//!
//! `calc_core` is the computational heart of Quickcalc: a catalogue of small,
//! independent calculators for finance, fitness, betting, gardening and
//! math. All inputs and outputs are JSON-serializable, so any calculator can
//! be driven from a form, a script or the `quickcalc` CLI.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Forgiving Input**: Numeric fields accept numbers, numeric strings and
//!   null; unusable values fall back to documented defaults
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{run_json, CalculationOutput};
//! use serde_json::json;
//!
//! let output = run_json("bmi", json!({ "weight": 70, "height": 175 })).unwrap();
//! if let CalculationOutput::Bmi(result) = output {
//!     assert!((result.bmi - 22.86).abs() < 0.01);
//! }
//!
//! // Or call a calculator directly
//! use calc_core::finance::tip::calculate_tip;
//! assert_eq!(calculate_tip(40.0, 25.0, 2.0).per_person, 25.0);
//! ```
//!
//! ## Modules
//!
//! - [`finance`] - Loans, compound interest, CAGR, tips, stamp duty, insurance
//! - [`fitness`] - BMI, FFMI, energy expenditure, protein and fiber targets
//! - [`betting`] - Odds conversion, parlays, Kelly staking
//! - [`gardening`] - Soil volume and plant spacing
//! - [`math`] - Roots, triangles, lines, statistics, ODEs
//! - [`calculations`] - Tagged request/output enums and dispatch
//! - [`registry`] - Calculator slugs, titles and categories
//! - [`coerce`] - Lenient number parsing and serde helpers
//! - [`profile`] - Sex, unit system, activity level and goal shared by calculators
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod betting;
pub mod calculations;
pub mod coerce;
pub mod errors;
pub mod finance;
pub mod fitness;
pub mod gardening;
pub mod math;
pub mod profile;
pub mod registry;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{run, run_json, CalculationOutput, CalculationRequest};
pub use errors::{CalcError, CalcResult};
pub use registry::{CalculatorKind, Category};
