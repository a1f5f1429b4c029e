//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only explicit inputs fail: form fields, select values, configuration and
/// catalog payloads. Missing product metadata is never an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A form field failed validation.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A select value did not name a known option.
    #[error("invalid {kind}: {value:?}")]
    InvalidSelection { kind: &'static str, value: String },

    /// The catalog payload could not be decoded.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A configuration value is malformed.
    #[error("invalid config {key}: {reason}")]
    Config { key: &'static str, reason: String },
}

impl DomainError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_selection(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidSelection {
            kind,
            value: value.into(),
        }
    }

    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }

    pub fn config(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            key,
            reason: reason.into(),
        }
    }

    /// Field name for validation failures, used to surface the reason on the form.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_exposes_field() {
        let err = DomainError::validation("email", "missing @");
        assert_eq!(err.field(), Some("email"));
        assert_eq!(err.to_string(), "validation failed for email: missing @");
    }

    #[test]
    fn non_validation_errors_have_no_field() {
        let err = DomainError::invalid_selection("price tier", "cheap");
        assert_eq!(err.field(), None);
        assert_eq!(err.to_string(), "invalid price tier: \"cheap\"");
    }
}
