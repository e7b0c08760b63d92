//! # Error Types
//!
//! Structured error types for section_core. These errors carry enough
//! context to identify the offending geometry, material, or strategy name
//! programmatically, not just as a message string.
//!
//! ## Example
//!
//! ```rust
//! use section_core::errors::{SectionError, SectionResult};
//!
//! fn validate_area(area: f64) -> SectionResult<()> {
//!     if area <= 0.0 {
//!         return Err(SectionError::invalid_input(
//!             "area",
//!             area.to_string(),
//!             "Area must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for section_core operations
pub type SectionResult<T> = Result<T, SectionError>;

/// Structured error type for section analysis operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic handling by callers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SectionError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Input or clipped geometry violates a ring orientation invariant
    /// (exterior must be counter-clockwise, holes clockwise) or is
    /// otherwise degenerate beyond repair.
    #[error("Malformed geometry: {reason}")]
    MalformedGeometry { reason: String },

    /// No integration strategy registered under the requested name
    #[error("Unknown integrator '{name}' - registered: {registered}")]
    UnknownIntegrator { name: String, registered: String },

    /// A constitutive law cannot express its stress field in the form an
    /// integration strategy requires (e.g. a non-polynomial curve shape
    /// requested as polynomial stress zones).
    #[error("Unsupported law for '{law}': {reason}")]
    UnsupportedLaw { law: String, reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SectionError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SectionError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MalformedGeometry error
    pub fn malformed_geometry(reason: impl Into<String>) -> Self {
        SectionError::MalformedGeometry {
            reason: reason.into(),
        }
    }

    /// Create an UnknownIntegrator error
    pub fn unknown_integrator(
        name: impl Into<String>,
        registered: impl Into<String>,
    ) -> Self {
        SectionError::UnknownIntegrator {
            name: name.into(),
            registered: registered.into(),
        }
    }

    /// Create an UnsupportedLaw error
    pub fn unsupported_law(law: impl Into<String>, reason: impl Into<String>) -> Self {
        SectionError::UnsupportedLaw {
            law: law.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SectionError::InvalidInput { .. } => "INVALID_INPUT",
            SectionError::MalformedGeometry { .. } => "MALFORMED_GEOMETRY",
            SectionError::UnknownIntegrator { .. } => "UNKNOWN_INTEGRATOR",
            SectionError::UnsupportedLaw { .. } => "UNSUPPORTED_LAW",
            SectionError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SectionError::invalid_input("area", "-1.0", "Area must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SectionError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SectionError::malformed_geometry("hole wound ccw").error_code(),
            "MALFORMED_GEOMETRY"
        );
        assert_eq!(
            SectionError::unknown_integrator("gauss", "marin, fiber").error_code(),
            "UNKNOWN_INTEGRATOR"
        );
    }

    #[test]
    fn test_error_display() {
        let error = SectionError::unknown_integrator("gauss", "marin, fiber");
        let msg = error.to_string();
        assert!(msg.contains("gauss"));
        assert!(msg.contains("marin"));
    }
}
