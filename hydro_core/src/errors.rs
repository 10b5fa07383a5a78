//! # Error Types
//!
//! Structured error types for hydro_core. Every failure is local and
//! synchronous: there is no I/O inside the engine, so nothing here is
//! retryable. Messages are meant to be shown to the end user verbatim.
//!
//! ## Example
//!
//! ```rust
//! use hydro_core::errors::{CalcError, CalcResult};
//!
//! fn validate_diameter(d_m: f64) -> CalcResult<()> {
//!     if d_m <= 0.0 {
//!         return Err(CalcError::invalid_input("D", d_m.to_string(), "Diameter must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_diameter(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for hydro_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The formula id is not one of the catalog entries
    #[error("Unknown formula ID: {formula_id}")]
    UnknownFormula { formula_id: String },

    /// A symbol the formula needs was not supplied
    #[error("Missing parameter '{symbol}' for formula '{formula_id}'")]
    MissingParameter { formula_id: String, symbol: String },

    /// An input value is non-finite or outside the formula's domain
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings file could not be read or holds unusable values
    #[error("Settings error in '{path}': {reason}")]
    SettingsError { path: String, reason: String },
}

impl CalcError {
    /// Create an UnknownFormula error
    pub fn unknown_formula(formula_id: impl Into<String>) -> Self {
        CalcError::UnknownFormula {
            formula_id: formula_id.into(),
        }
    }

    /// Create a MissingParameter error
    pub fn missing_parameter(formula_id: impl Into<String>, symbol: impl Into<String>) -> Self {
        CalcError::MissingParameter {
            formula_id: formula_id.into(),
            symbol: symbol.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError { reason: reason.into() }
    }

    /// Create a SettingsError
    pub fn settings(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::SettingsError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::UnknownFormula { .. } => "UNKNOWN_FORMULA",
            CalcError::MissingParameter { .. } => "MISSING_PARAMETER",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::SettingsError { .. } => "SETTINGS_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("h", "-1", "Head cannot be negative");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unknown_formula("x").error_code(), "UNKNOWN_FORMULA");
        assert_eq!(CalcError::missing_parameter("tank_volume", "D").error_code(), "MISSING_PARAMETER");
        assert_eq!(CalcError::settings("a.json", "bad").error_code(), "SETTINGS_ERROR");
    }

    #[test]
    fn test_messages_name_the_culprit() {
        let err = CalcError::unknown_formula("not_a_formula");
        assert_eq!(err.to_string(), "Unknown formula ID: not_a_formula");

        let err = CalcError::missing_parameter("pump_power", "η");
        assert!(err.to_string().contains("'η'"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: CalcError = parse.unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
