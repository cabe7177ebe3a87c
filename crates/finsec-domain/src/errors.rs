//! Domain errors for the FinSec dashboard

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Invalid upload: {reason}")]
    InvalidUpload { reason: String },

    #[error("Export failed: {reason}")]
    ExportFailed { reason: String },

    #[error("Unknown view: {label}")]
    UnknownView { label: String },
}

impl DomainError {
    /// Shorthand for a field validation failure
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
