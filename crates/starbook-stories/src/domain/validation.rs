//! Field validation rules.
//!
//! Each rule takes the value produced by the previous rule and either
//! passes it on or stops with a [`ValidationError`]. Rules for one field are
//! chained with `and_then`, so the first failure for that field wins.
//! [`Collector`] then gathers the outcome of every field so that all
//! offending fields are reported in a single response.

use starbook_core::error::{DomainError, ValidationError, ValidationErrors};

use super::story::{StoryFields, StoryInput};

/// Trims `raw` and rejects it if nothing is left.
///
/// # Errors
///
/// Returns a "required" error naming `field` when `raw` is blank.
pub fn required(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::missing(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Trims `raw`, mapping a blank value to `None`.
#[must_use]
pub fn optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Builds a rule that rejects values longer than `max` characters.
pub fn max_chars(
    field: &'static str,
    max: usize,
) -> impl Fn(String) -> Result<String, ValidationError> {
    move |value| {
        let len = value.chars().count();
        if len > max {
            Err(ValidationError::too_long(field, max, len))
        } else {
            Ok(value)
        }
    }
}

/// Accumulates per-field results, keeping every failure.
#[derive(Debug, Default)]
pub struct Collector {
    errors: Vec<ValidationError>,
}

impl Collector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one field, returning the value on success.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }

    /// Records several failures at once (e.g. one per bad tag).
    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    /// Consumes the collector, returning every recorded failure.
    #[must_use]
    pub fn into_errors(self) -> ValidationErrors {
        ValidationErrors::new(self.errors)
    }
}

/// Validates a submitted story, reporting every invalid field together.
///
/// # Errors
///
/// Returns `DomainError::Validation` listing the first failure of each
/// invalid field.
pub fn validate_story_fields(input: &StoryInput) -> Result<StoryFields, DomainError> {
    input.validate().map_err(DomainError::from)
}
