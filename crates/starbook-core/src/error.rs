//! Domain error types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Name of the offending field, as it appears on the wire.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The field was absent or blank.
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::new(field, format!("{field} is required"))
    }

    /// The field exceeded `max` characters.
    #[must_use]
    pub fn too_long(field: &str, max: usize, actual: usize) -> Self {
        Self::new(
            field,
            format!("{field} must be at most {max} characters (got {actual})"),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Non-empty list of validation failures surfaced to the caller together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps a list of failures.
    #[must_use]
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Returns the individual failures.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns true if a failure was recorded for `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self(vec![err])
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

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The requested entity does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `"story"`.
        kind: &'static str,
        /// The identifier that was looked up.
        id: Uuid,
    },

    /// One or more input fields failed validation.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The requester may not act on the entity.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A workflow was asked to move somewhere it cannot go.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// Storage or downstream service failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errs: ValidationErrors) -> Self {
        Self::Validation(errs)
    }
}
