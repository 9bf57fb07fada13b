//! # Error Types
//!
//! Structured error types for calc_core. Most calculators never fail: bad
//! numeric input is coerced to a default and the result degrades to zeros.
//! The few that can fail (square root of a negative, polynomial with no
//! terms, unparseable differential equation) report why through these
//! variants, in a shape that serializes cleanly for API consumers.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn checked_sqrt(x: f64) -> CalcResult<f64> {
//!     if x < 0.0 {
//!         return Err(CalcError::domain("sqrt", "Cannot take the square root of a negative number"));
//!     }
//!     Ok(x.sqrt())
//! }
//!
//! assert_eq!(checked_sqrt(-1.0).unwrap_err().error_code(), "DOMAIN_ERROR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong shape, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// No calculator is registered under the requested slug
    #[error("Unknown calculator: {slug}")]
    UnknownCalculator { slug: String },

    /// The input lies outside the mathematical domain of the operation
    #[error("Domain error in {operation}: {reason}")]
    Domain { operation: String, reason: String },

    /// An expression could not be parsed
    #[error("Parse error at position {position} in '{expression}': {reason}")]
    Parse {
        expression: String,
        position: usize,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownCalculator error
    pub fn unknown_calculator(slug: impl Into<String>) -> Self {
        CalcError::UnknownCalculator { slug: slug.into() }
    }

    /// Create a Domain error
    pub fn domain(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Domain {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a Parse error
    pub fn parse(expression: impl Into<String>, position: usize, reason: impl Into<String>) -> Self {
        CalcError::Parse {
            expression: expression.into(),
            position,
            reason: reason.into(),
        }
    }

    /// Check if the caller can fix this error by changing its input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::UnknownCalculator { .. }
                | CalcError::Domain { .. }
                | CalcError::Parse { .. }
                | CalcError::SerializationError { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnknownCalculator { .. } => "UNKNOWN_CALCULATOR",
            CalcError::Domain { .. } => "DOMAIN_ERROR",
            CalcError::Parse { .. } => "PARSE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::parse("x +* y", 3, "Unexpected '*'");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("\"type\":\"Parse\""));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::unknown_calculator("abacus").error_code(), "UNKNOWN_CALCULATOR");
        assert_eq!(CalcError::parse("1 +", 3, "Unexpected end").error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_error_display() {
        let err = CalcError::domain("sqrt", "negative input");
        assert_eq!(err.to_string(), "Domain error in sqrt: negative input");
    }

    #[test]
    fn test_input_errors() {
        assert!(CalcError::domain("sqrt", "negative").is_input_error());
        assert!(!CalcError::Internal { message: "oops".into() }.is_input_error());
    }

    #[test]
    fn test_from_serde_error() {
        let err: CalcError = serde_json::from_str::<f64>("not json").unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
