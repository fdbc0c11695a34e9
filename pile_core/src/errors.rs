//! # Error Types
//!
//! Structured error types for pile_core. Each variant carries enough context
//! for a caller (or a report layer) to understand and surface the failure
//! without re-deriving it from the inputs.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::errors::{CalcError, CalcResult};
//!
//! fn validate_diameter(diameter_mm: f64) -> CalcResult<()> {
//!     if diameter_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "diameter_mm",
//!             diameter_mm.to_string(),
//!             "Diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pile_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for the bearing capacity engine.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Section dimensions are non-physical (e.g. degenerate annulus)
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// Tip-resistance method is incompatible with the pile type
    #[error("Unsupported method: {method} is not applicable to {pile_type} piles")]
    UnsupportedMethod { method: String, pile_type: String },

    /// Requested dimensions are not tabulated in the section catalog.
    ///
    /// Non-fatal for the engine: the section resolver falls back to the
    /// analytical annulus derivation. Surfaced only by direct catalog lookups.
    #[error("No catalog entry for {pile_type} D{diameter_mm}x{thickness_mm}t")]
    MissingCatalogEntry {
        pile_type: String,
        diameter_mm: f64,
        thickness_mm: f64,
    },

    /// A stage produced a non-computable intermediate (overflow, NaN domain)
    #[error("Calculation failed: {stage} - {reason}")]
    CalculationFailed { stage: String, reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedMethod error
    pub fn unsupported_method(method: impl Into<String>, pile_type: impl Into<String>) -> Self {
        CalcError::UnsupportedMethod {
            method: method.into(),
            pile_type: pile_type.into(),
        }
    }

    /// Create a MissingCatalogEntry error
    pub fn missing_catalog_entry(
        pile_type: impl Into<String>,
        diameter_mm: f64,
        thickness_mm: f64,
    ) -> Self {
        CalcError::MissingCatalogEntry {
            pile_type: pile_type.into(),
            diameter_mm,
            thickness_mm,
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Check whether the engine recovers from this error internally
    /// (catalog misses trigger the analytical fallback path).
    ///
    /// Exposed for front-ends that surface errors to the user: a
    /// recoverable error is a note on the result, not a hard stop.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::MissingCatalogEntry { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::UnsupportedMethod { .. } => "UNSUPPORTED_METHOD",
            CalcError::MissingCatalogEntry { .. } => "MISSING_CATALOG_ENTRY",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("diameter_mm", "-500", "Diameter must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_geometry("test").error_code(),
            "INVALID_GEOMETRY"
        );
        assert_eq!(
            CalcError::unsupported_method("rock", "PHC").error_code(),
            "UNSUPPORTED_METHOD"
        );
    }

    #[test]
    fn test_catalog_miss_is_recoverable() {
        let err = CalcError::missing_catalog_entry("PHC", 550.0, 80.0);
        assert!(err.is_recoverable());
        assert!(!CalcError::invalid_geometry("x").is_recoverable());
    }
}
