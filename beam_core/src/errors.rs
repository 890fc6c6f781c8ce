//! # Error Types
//!
//! Structured error types for beam_core. Validation failures name the
//! offending load (by id) and field so a form layer can point the user at
//! the exact input that needs fixing.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::errors::{EngineError, EngineResult};
//!
//! fn validate_length(length: f64) -> EngineResult<()> {
//!     if length <= 0.0 {
//!         return Err(EngineError::invalid_beam_config(
//!             "length",
//!             length.to_string(),
//!             "Beam length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for beam_core operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Structured error type for engine operations.
///
/// Input errors (`InvalidLoad`, `InvalidBeamConfig`) are always raised before
/// any computation starts; the engine never returns partial results.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EngineError {
    /// A load record violates a validation rule
    #[error("Invalid load '{load_id}' field '{field}': {value} - {reason}")]
    InvalidLoad {
        load_id: String,
        field: String,
        value: String,
        reason: String,
    },

    /// The beam length or support combination cannot be solved
    #[error("Invalid beam configuration '{field}': {value} - {reason}")]
    InvalidBeamConfig {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
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

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl EngineError {
    /// Create an InvalidLoad error
    pub fn invalid_load(
        load_id: impl ToString,
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::InvalidLoad {
            load_id: load_id.to_string(),
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidBeamConfig error
    pub fn invalid_beam_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::InvalidBeamConfig {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        EngineError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError from anything displayable
    pub fn serialization(reason: impl ToString) -> Self {
        EngineError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::FileLocked { .. })
    }

    /// True for errors caused by caller input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidLoad { .. } | EngineError::InvalidBeamConfig { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::InvalidLoad { .. } => "INVALID_LOAD",
            EngineError::InvalidBeamConfig { .. } => "INVALID_BEAM_CONFIG",
            EngineError::FileError { .. } => "FILE_ERROR",
            EngineError::FileLocked { .. } => "FILE_LOCKED",
            EngineError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EngineError::VersionMismatch { .. } => "VERSION_MISMATCH",
            EngineError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EngineError::invalid_load("F1", "location", "12.5", "Location is past the beam end");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InvalidLoad"));
        let roundtrip: EngineError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            EngineError::invalid_beam_config("supports", "Free/Free", "unstable").error_code(),
            "INVALID_BEAM_CONFIG"
        );
        assert_eq!(EngineError::serialization("bad json").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_input_errors_are_not_recoverable() {
        let error = EngineError::invalid_load("Q1", "end_magnitude", "-3", "sign change");
        assert!(error.is_input_error());
        assert!(!error.is_recoverable());
        assert!(EngineError::file_locked("a.beam", "someone", "now").is_recoverable());
    }

    #[test]
    fn test_display_names_field() {
        let error = EngineError::invalid_load("F2", "angle", "200", "Angle must be within [0, 180] degrees");
        let text = error.to_string();
        assert!(text.contains("F2"));
        assert!(text.contains("angle"));
    }
}
