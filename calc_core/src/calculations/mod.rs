//! # Calculation Dispatch
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, lenient about types)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(&input)` - Pure calculation function
//!
//! This module wraps them in two tagged enums so any calculator can be
//! driven from JSON:
//!
//! ```json
//! { "calculator": "tip", "input": { "bill": 80, "tip_pct": 20, "people": 4 } }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{run, CalculationOutput, CalculationRequest};
//!
//! let request: CalculationRequest = serde_json::from_str(
//!     r#"{ "calculator": "cagr", "input": { "begin_value": 100, "end_value": 200, "years": 5 } }"#,
//! ).unwrap();
//!
//! match run(&request).unwrap() {
//!     CalculationOutput::Cagr(result) => assert!((result.cagr_pct - 14.87).abs() < 0.01),
//!     other => panic!("unexpected output {:?}", other),
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::betting::{kelly, odds, parlay, KellyInput, KellyResult, OddsInput, OddsResult, ParlayInput, ParlayResult};
use crate::errors::{CalcError, CalcResult};
use crate::finance::{
    cagr, compound_interest, insurance, loan, stamp_duty, tip, CagrInput, CagrResult, CompoundInterestInput,
    CompoundInterestResult, InsuranceInput, InsuranceResult, LoanInput, LoanResult, StampDutyInput,
    StampDutyResult, TipInput, TipResult,
};
use crate::fitness::{
    bmi, energy, ffmi, fiber, protein, BmiInput, BmiResult, EnergyInput, EnergyResult, FfmiInput, FfmiResult,
    FiberInput, FiberResult, ProteinInput, ProteinResult,
};
use crate::gardening::{
    plant_spacing, soil_volume, PlantSpacingInput, PlantSpacingResult, SoilVolumeInput, SoilVolumeResult,
};
use crate::math::{
    coordinate, differential, polynomial, sqrt, statistics, triangle, CoordinateInput, CoordinateResult,
    DescriptiveInput, DescriptiveResult, OdeInput, OdeResult, PolynomialInput, PolynomialResult, SqrtInput,
    SqrtResult, TriangleInput, TriangleResult, ZScoreInput, ZScoreResult,
};
use crate::registry::CalculatorKind;

/// A request for one calculation, tagged by calculator slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", content = "input", rename_all = "snake_case")]
pub enum CalculationRequest {
    Loan(LoanInput),
    CompoundInterest(CompoundInterestInput),
    Cagr(CagrInput),
    Tip(TipInput),
    StampDuty(StampDutyInput),
    Insurance(InsuranceInput),
    Bmi(BmiInput),
    Ffmi(FfmiInput),
    Energy(EnergyInput),
    Protein(ProteinInput),
    Fiber(FiberInput),
    Odds(OddsInput),
    Parlay(ParlayInput),
    Kelly(KellyInput),
    SoilVolume(SoilVolumeInput),
    PlantSpacing(PlantSpacingInput),
    Sqrt(SqrtInput),
    Polynomial(PolynomialInput),
    Triangle(TriangleInput),
    Coordinate(CoordinateInput),
    ZScore(ZScoreInput),
    DescriptiveStatistics(DescriptiveInput),
    Differential(OdeInput),
}

/// The result of one calculation, tagged like the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", content = "result", rename_all = "snake_case")]
pub enum CalculationOutput {
    Loan(LoanResult),
    CompoundInterest(CompoundInterestResult),
    Cagr(CagrResult),
    Tip(TipResult),
    StampDuty(StampDutyResult),
    Insurance(InsuranceResult),
    Bmi(BmiResult),
    Ffmi(FfmiResult),
    Energy(EnergyResult),
    Protein(ProteinResult),
    Fiber(FiberResult),
    Odds(OddsResult),
    Parlay(ParlayResult),
    Kelly(KellyResult),
    SoilVolume(SoilVolumeResult),
    PlantSpacing(PlantSpacingResult),
    Sqrt(SqrtResult),
    Polynomial(PolynomialResult),
    Triangle(TriangleResult),
    Coordinate(CoordinateResult),
    ZScore(ZScoreResult),
    DescriptiveStatistics(DescriptiveResult),
    Differential(OdeResult),
}

impl CalculationRequest {
    /// Which calculator this request targets
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationRequest::Loan(_) => CalculatorKind::Loan,
            CalculationRequest::CompoundInterest(_) => CalculatorKind::CompoundInterest,
            CalculationRequest::Cagr(_) => CalculatorKind::Cagr,
            CalculationRequest::Tip(_) => CalculatorKind::Tip,
            CalculationRequest::StampDuty(_) => CalculatorKind::StampDuty,
            CalculationRequest::Insurance(_) => CalculatorKind::Insurance,
            CalculationRequest::Bmi(_) => CalculatorKind::Bmi,
            CalculationRequest::Ffmi(_) => CalculatorKind::Ffmi,
            CalculationRequest::Energy(_) => CalculatorKind::Energy,
            CalculationRequest::Protein(_) => CalculatorKind::Protein,
            CalculationRequest::Fiber(_) => CalculatorKind::Fiber,
            CalculationRequest::Odds(_) => CalculatorKind::Odds,
            CalculationRequest::Parlay(_) => CalculatorKind::Parlay,
            CalculationRequest::Kelly(_) => CalculatorKind::Kelly,
            CalculationRequest::SoilVolume(_) => CalculatorKind::SoilVolume,
            CalculationRequest::PlantSpacing(_) => CalculatorKind::PlantSpacing,
            CalculationRequest::Sqrt(_) => CalculatorKind::Sqrt,
            CalculationRequest::Polynomial(_) => CalculatorKind::Polynomial,
            CalculationRequest::Triangle(_) => CalculatorKind::Triangle,
            CalculationRequest::Coordinate(_) => CalculatorKind::Coordinate,
            CalculationRequest::ZScore(_) => CalculatorKind::ZScore,
            CalculationRequest::DescriptiveStatistics(_) => CalculatorKind::DescriptiveStatistics,
            CalculationRequest::Differential(_) => CalculatorKind::Differential,
        }
    }

    /// A request carrying the calculator's default input.
    pub fn with_defaults(kind: CalculatorKind) -> Self {
        match kind {
            CalculatorKind::Loan => CalculationRequest::Loan(LoanInput::default()),
            CalculatorKind::CompoundInterest => CalculationRequest::CompoundInterest(CompoundInterestInput::default()),
            CalculatorKind::Cagr => CalculationRequest::Cagr(CagrInput::default()),
            CalculatorKind::Tip => CalculationRequest::Tip(TipInput::default()),
            CalculatorKind::StampDuty => CalculationRequest::StampDuty(StampDutyInput::default()),
            CalculatorKind::Insurance => CalculationRequest::Insurance(InsuranceInput::default()),
            CalculatorKind::Bmi => CalculationRequest::Bmi(BmiInput::default()),
            CalculatorKind::Ffmi => CalculationRequest::Ffmi(FfmiInput::default()),
            CalculatorKind::Energy => CalculationRequest::Energy(EnergyInput::default()),
            CalculatorKind::Protein => CalculationRequest::Protein(ProteinInput::default()),
            CalculatorKind::Fiber => CalculationRequest::Fiber(FiberInput::default()),
            CalculatorKind::Odds => CalculationRequest::Odds(OddsInput::default()),
            CalculatorKind::Parlay => CalculationRequest::Parlay(ParlayInput::default()),
            CalculatorKind::Kelly => CalculationRequest::Kelly(KellyInput::default()),
            CalculatorKind::SoilVolume => CalculationRequest::SoilVolume(SoilVolumeInput::default()),
            CalculatorKind::PlantSpacing => CalculationRequest::PlantSpacing(PlantSpacingInput::default()),
            CalculatorKind::Sqrt => CalculationRequest::Sqrt(SqrtInput::default()),
            CalculatorKind::Polynomial => CalculationRequest::Polynomial(PolynomialInput::default()),
            CalculatorKind::Triangle => CalculationRequest::Triangle(TriangleInput::default()),
            CalculatorKind::Coordinate => CalculationRequest::Coordinate(CoordinateInput::default()),
            CalculatorKind::ZScore => CalculationRequest::ZScore(ZScoreInput::default()),
            CalculatorKind::DescriptiveStatistics => {
                CalculationRequest::DescriptiveStatistics(DescriptiveInput::default())
            }
            CalculatorKind::Differential => CalculationRequest::Differential(OdeInput::default()),
        }
    }
}

impl CalculationOutput {
    /// Which calculator produced this output
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationOutput::Loan(_) => CalculatorKind::Loan,
            CalculationOutput::CompoundInterest(_) => CalculatorKind::CompoundInterest,
            CalculationOutput::Cagr(_) => CalculatorKind::Cagr,
            CalculationOutput::Tip(_) => CalculatorKind::Tip,
            CalculationOutput::StampDuty(_) => CalculatorKind::StampDuty,
            CalculationOutput::Insurance(_) => CalculatorKind::Insurance,
            CalculationOutput::Bmi(_) => CalculatorKind::Bmi,
            CalculationOutput::Ffmi(_) => CalculatorKind::Ffmi,
            CalculationOutput::Energy(_) => CalculatorKind::Energy,
            CalculationOutput::Protein(_) => CalculatorKind::Protein,
            CalculationOutput::Fiber(_) => CalculatorKind::Fiber,
            CalculationOutput::Odds(_) => CalculatorKind::Odds,
            CalculationOutput::Parlay(_) => CalculatorKind::Parlay,
            CalculationOutput::Kelly(_) => CalculatorKind::Kelly,
            CalculationOutput::SoilVolume(_) => CalculatorKind::SoilVolume,
            CalculationOutput::PlantSpacing(_) => CalculatorKind::PlantSpacing,
            CalculationOutput::Sqrt(_) => CalculatorKind::Sqrt,
            CalculationOutput::Polynomial(_) => CalculatorKind::Polynomial,
            CalculationOutput::Triangle(_) => CalculatorKind::Triangle,
            CalculationOutput::Coordinate(_) => CalculatorKind::Coordinate,
            CalculationOutput::ZScore(_) => CalculatorKind::ZScore,
            CalculationOutput::DescriptiveStatistics(_) => CalculatorKind::DescriptiveStatistics,
            CalculationOutput::Differential(_) => CalculatorKind::Differential,
        }
    }
}

/// Run one calculation.
///
/// Only the square root, polynomial and differential calculators can fail;
/// the rest degrade to zero-valued results on unusable input.
pub fn run(request: &CalculationRequest) -> CalcResult<CalculationOutput> {
    tracing::debug!(calculator = %request.kind(), "running calculation");

    let output = match request {
        CalculationRequest::Loan(input) => CalculationOutput::Loan(loan::calculate(input)),
        CalculationRequest::CompoundInterest(input) => {
            CalculationOutput::CompoundInterest(compound_interest::calculate(input))
        }
        CalculationRequest::Cagr(input) => CalculationOutput::Cagr(cagr::calculate(input)),
        CalculationRequest::Tip(input) => CalculationOutput::Tip(tip::calculate(input)),
        CalculationRequest::StampDuty(input) => CalculationOutput::StampDuty(stamp_duty::calculate(input)),
        CalculationRequest::Insurance(input) => CalculationOutput::Insurance(insurance::calculate(input)),
        CalculationRequest::Bmi(input) => CalculationOutput::Bmi(bmi::calculate(input)),
        CalculationRequest::Ffmi(input) => CalculationOutput::Ffmi(ffmi::calculate(input)),
        CalculationRequest::Energy(input) => CalculationOutput::Energy(energy::calculate(input)),
        CalculationRequest::Protein(input) => CalculationOutput::Protein(protein::calculate(input)),
        CalculationRequest::Fiber(input) => CalculationOutput::Fiber(fiber::calculate(input)),
        CalculationRequest::Odds(input) => CalculationOutput::Odds(odds::calculate(input)),
        CalculationRequest::Parlay(input) => CalculationOutput::Parlay(parlay::calculate(input)),
        CalculationRequest::Kelly(input) => CalculationOutput::Kelly(kelly::calculate(input)),
        CalculationRequest::SoilVolume(input) => CalculationOutput::SoilVolume(soil_volume::calculate(input)),
        CalculationRequest::PlantSpacing(input) => {
            CalculationOutput::PlantSpacing(plant_spacing::calculate(input))
        }
        CalculationRequest::Sqrt(input) => CalculationOutput::Sqrt(sqrt::calculate(input)?),
        CalculationRequest::Polynomial(input) => CalculationOutput::Polynomial(polynomial::calculate(input)?),
        CalculationRequest::Triangle(input) => CalculationOutput::Triangle(triangle::calculate(input)),
        CalculationRequest::Coordinate(input) => CalculationOutput::Coordinate(coordinate::calculate(input)),
        CalculationRequest::ZScore(input) => CalculationOutput::ZScore(statistics::calculate_z_score(input)),
        CalculationRequest::DescriptiveStatistics(input) => {
            CalculationOutput::DescriptiveStatistics(statistics::calculate_descriptive(input))
        }
        CalculationRequest::Differential(input) => {
            CalculationOutput::Differential(differential::calculate(input)?)
        }
    };

    Ok(output)
}

/// Build a request from a slug (or alias) and raw JSON input, then run it.
///
/// `null` input means "all defaults". Fails with
/// [`CalcError::UnknownCalculator`] for an unrecognized slug and
/// [`CalcError::InvalidInput`] when the input has the wrong shape
/// (e.g. a string where an object is expected).
pub fn run_json(slug: &str, input: Value) -> CalcResult<CalculationOutput> {
    let request = request_from_json(slug, input)?;
    run(&request)
}

/// Build a request from a slug and raw JSON input without running it.
pub fn request_from_json(slug: &str, input: Value) -> CalcResult<CalculationRequest> {
    let kind = CalculatorKind::from_slug(slug).ok_or_else(|| CalcError::unknown_calculator(slug))?;
    let input = if input.is_null() { Value::Object(Default::default()) } else { input };

    let tagged = serde_json::json!({ "calculator": kind.slug(), "input": input });
    serde_json::from_value(tagged).map_err(|e| CalcError::invalid_input("input", kind.slug(), e.to_string()))
}

/// Default input for a calculator, as JSON.
pub fn default_input(kind: CalculatorKind) -> CalcResult<Value> {
    let request = serde_json::to_value(CalculationRequest::with_defaults(kind))?;
    Ok(request.get("input").cloned().unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_kind_round_trips_through_defaults() {
        for kind in CalculatorKind::ALL {
            let request = CalculationRequest::with_defaults(kind);
            assert_eq!(request.kind(), kind);

            let json = serde_json::to_value(&request).unwrap();
            assert_eq!(json["calculator"], kind.slug());
            let back: CalculationRequest = serde_json::from_value(json).unwrap();
            assert_eq!(back.kind(), kind);
        }
    }

    #[test]
    fn test_defaults_never_panic() {
        for kind in CalculatorKind::ALL {
            let result = run(&CalculationRequest::with_defaults(kind));
            match kind {
                // No coefficients and no equation to work with
                CalculatorKind::Differential | CalculatorKind::Polynomial => assert!(result.is_err()),
                _ => assert_eq!(result.unwrap().kind(), kind),
            }
        }
    }

    #[test]
    fn test_run_json_tip() {
        let output = run_json("tip", json!({ "bill": "100", "tip_pct": 20, "people": 4 })).unwrap();
        match output {
            CalculationOutput::Tip(result) => {
                assert_eq!(result.tip, 20.0);
                assert_eq!(result.per_person, 30.0);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_run_json_alias_and_null_input() {
        let output = run_json("Z-Score", Value::Null).unwrap();
        assert_eq!(output.kind(), CalculatorKind::ZScore);
    }

    #[test]
    fn test_run_json_errors() {
        let err = run_json("warp_drive", json!({})).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CALCULATOR");

        let err = run_json("bmi", json!("tall")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = run_json("sqrt", json!({ "value": -4 })).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_output_serialization_shape() {
        let output = run_json("triangle", json!({ "a": 3, "b": 4, "c": 5 })).unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["calculator"], "triangle");
        assert_eq!(json["result"]["area"], 6.0);
        assert_eq!(json["result"]["triangle_type"], "Right");
    }

    #[test]
    fn test_default_input_lists_fields() {
        let input = default_input(CalculatorKind::Tip).unwrap();
        assert_eq!(input["tip_pct"], 15.0);
        assert_eq!(input["people"], 1.0);
    }
}
