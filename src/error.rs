//! Unified error types for fabric-grading.
//!
//! Fatal conditions (invalid samples, broken catalogs, unreadable files) are
//! returned as [`GradingError`]. Non-fatal conditions never surface here; they
//! are embedded as warnings inside the produced report.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::CatalogError;

/// Main error type for fabric-grading operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GradingError {
    /// The inspection sample failed validation; no report was produced
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The defect catalog could not be built or loaded
    #[error("Defect catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// Input documents (samples, catalogs) that could not be deserialized
    #[error("Failed to parse {context}: {message}")]
    Parse { context: String, message: String },

    /// Report rendering failures
    #[error("Report generation failed: {0}")]
    Report(String),
}

/// Convenient Result type for fabric-grading operations
pub type Result<T> = std::result::Result<T, GradingError>;

impl GradingError {
    /// Create an IO error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Field-level validation errors, if this is a validation failure
    #[must_use]
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation(errors) => Some(errors.as_slice()),
            _ => None,
        }
    }

    /// Whether the caller can fix this by correcting the input sample
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<ValidationErrors> for GradingError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

// ============================================================================
// Field-level validation errors
// ============================================================================

/// A single invalid field on an inspection sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path, e.g. `batch_number` or `observations[2].width`
    pub field: String,
    /// Description of the problem
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field-level problem found on one sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether any error targets the given field path
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Convert into a `Result`, failing when at least one error was recorded
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display_joins_fields() {
        let mut errors = ValidationErrors::new();
        errors.push("batch_number", "must not be blank");
        errors.push("observations[0].width", "must be positive, got -1");

        assert_eq!(
            errors.to_string(),
            "batch_number: must not be blank; observations[0].width: must be positive, got -1"
        );
        assert!(errors.contains_field("batch_number"));
        assert!(!errors.contains_field("weight"));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.push("weight", "must be positive");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn test_grading_error_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.push("fabric_type", "must not be blank");
        let err = GradingError::from(errors);

        assert!(err.is_validation());
        let fields = err.field_errors().unwrap();
        assert_eq!(fields[0].field, "fabric_type");
        assert!(err.to_string().starts_with("Validation failed: fabric_type"));
    }

    #[test]
    fn test_non_validation_has_no_field_errors() {
        let err = GradingError::Config("bad preset".to_string());
        assert!(err.field_errors().is_none());
        assert!(!err.is_validation());
    }
}
