//! # Error Types
//!
//! Structured error types for sizing_core. Each variant carries enough context
//! for a caller (or the batch failure list) to explain what went wrong without
//! re-running the calculation.
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::errors::{SizingError, SizingResult};
//!
//! fn validate_length(length_m: f64) -> SizingResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(SizingError::invalid_input(
//!             "length_m",
//!             length_m.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for sizing_core operations
pub type SizingResult<T> = Result<T, SizingError>;

/// Structured error type for sizing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SizingError {
    /// An input value is invalid (negative moment, non-positive length, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Section name is not present in the catalog
    #[error("Section not found: {section_name}")]
    SectionNotFound { section_name: String },

    /// No catalog section provides the required section modulus
    #[error("No adequate section: required Sx = {required_modulus_cm3:.1} cm³ exceeds largest available {largest_available_cm3:.1} cm³")]
    NoAdequateSection {
        required_modulus_cm3: f64,
        largest_available_cm3: f64,
    },

    /// A catalog entry violates the catalog invariants
    #[error("Invalid catalog entry '{section_name}': {reason}")]
    InvalidCatalogEntry { section_name: String, reason: String },

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

impl SizingError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        SizingError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SectionNotFound error
    pub fn section_not_found(section_name: impl Into<String>) -> Self {
        SizingError::SectionNotFound {
            section_name: section_name.into(),
        }
    }

    /// Create an InvalidCatalogEntry error
    pub fn invalid_catalog_entry(section_name: impl Into<String>, reason: impl Into<String>) -> Self {
        SizingError::InvalidCatalogEntry {
            section_name: section_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        SizingError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        SizingError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Errors that concern a single beam and are recorded in the batch
    /// failure list instead of aborting the run.
    pub fn is_per_beam(&self) -> bool {
        matches!(
            self,
            SizingError::InvalidInput { .. }
                | SizingError::SectionNotFound { .. }
                | SizingError::NoAdequateSection { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SizingError::InvalidInput { .. } => "INVALID_INPUT",
            SizingError::SectionNotFound { .. } => "SECTION_NOT_FOUND",
            SizingError::NoAdequateSection { .. } => "NO_ADEQUATE_SECTION",
            SizingError::InvalidCatalogEntry { .. } => "INVALID_CATALOG_ENTRY",
            SizingError::FileError { .. } => "FILE_ERROR",
            SizingError::SerializationError { .. } => "SERIALIZATION_ERROR",
            SizingError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for SizingError {
    fn from(e: serde_json::Error) -> Self {
        SizingError::serialization(e.to_string())
    }
}
