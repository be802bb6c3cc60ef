//! # Error Types
//!
//! Structured error types for bridge_core. Every analysis routine either
//! returns a domain-defined fallback value (ybar = 0, stress = 0, FOS = +∞)
//! or fails immediately with one of these variants. Nothing here is
//! transient, so there is no retry classification.
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::errors::{BridgeError, BridgeResult};
//!
//! fn validate_mass(mass_n: f64) -> BridgeResult<()> {
//!     if !mass_n.is_finite() {
//!         return Err(BridgeError::invalid_input(
//!             "mass",
//!             mass_n.to_string(),
//!             "Train mass must be a finite number of newtons",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_mass(f64::NAN).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bridge_core operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Structured error type for analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BridgeError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Load case tag outside {1, 2, 3}
    #[error("Unsupported load case: {value} (expected 1, 2 or 3)")]
    UnsupportedLoadCase { value: String },

    /// Plate tag outside {top_flange, web, bottom_flange}
    #[error("Unknown plate type: '{value}' (expected top_flange, web or bottom_flange)")]
    UnknownPlateType { value: String },

    /// Named cross-section not found among presets or project designs
    #[error("Design not found: {name}")]
    DesignNotFound { name: String },

    /// A session result was computed against a geometry that has since been edited
    #[error("Result for geometry revision {revision} superseded by revision {current}")]
    Superseded { revision: u64, current: u64 },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl BridgeError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BridgeError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedLoadCase error
    pub fn unsupported_load_case(value: impl ToString) -> Self {
        BridgeError::UnsupportedLoadCase {
            value: value.to_string(),
        }
    }

    /// Create an UnknownPlateType error
    pub fn unknown_plate_type(value: impl Into<String>) -> Self {
        BridgeError::UnknownPlateType {
            value: value.into(),
        }
    }

    /// Create a DesignNotFound error
    pub fn design_not_found(name: impl Into<String>) -> Self {
        BridgeError::DesignNotFound { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BridgeError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError from any displayable cause
    pub fn serialization(reason: impl ToString) -> Self {
        BridgeError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BridgeError::InvalidInput { .. } => "INVALID_INPUT",
            BridgeError::UnsupportedLoadCase { .. } => "UNSUPPORTED_LOAD_CASE",
            BridgeError::UnknownPlateType { .. } => "UNKNOWN_PLATE_TYPE",
            BridgeError::DesignNotFound { .. } => "DESIGN_NOT_FOUND",
            BridgeError::Superseded { .. } => "SUPERSEDED",
            BridgeError::FileError { .. } => "FILE_ERROR",
            BridgeError::SerializationError { .. } => "SERIALIZATION_ERROR",
            BridgeError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = BridgeError::invalid_input("mass", "NaN", "Mass must be finite");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: BridgeError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            BridgeError::unsupported_load_case(4).error_code(),
            "UNSUPPORTED_LOAD_CASE"
        );
        assert_eq!(
            BridgeError::unknown_plate_type("diaphragm").error_code(),
            "UNKNOWN_PLATE_TYPE"
        );
        assert_eq!(
            BridgeError::Superseded { revision: 1, current: 2 }.error_code(),
            "SUPERSEDED"
        );
    }

    #[test]
    fn test_messages_name_the_bad_value() {
        let msg = BridgeError::unsupported_load_case(7).to_string();
        assert!(msg.contains('7'));
        let msg = BridgeError::unknown_plate_type("stiffener").to_string();
        assert!(msg.contains("stiffener"));
    }
}
