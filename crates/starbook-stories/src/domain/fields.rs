//! Validated story field wrappers.
//!
//! A value of any of these types has already been trimmed and checked, so
//! a `Story` assembled from them is valid by construction.

use std::collections::HashSet;

use serde::Serialize;
use starbook_core::error::ValidationError;

use super::validation::{max_chars, required};

/// Maximum length of a story title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;
/// Maximum length of a narrative section, in characters.
pub const NARRATIVE_MAX_CHARS: usize = 4000;
/// Maximum length of a single tag, in characters.
pub const TAG_MAX_CHARS: usize = 40;
/// Maximum number of tags on one story.
pub const MAX_TAGS: usize = 16;

macro_rules! text_field {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wire name of this field, used in validation errors.
            pub const FIELD: &'static str = $field;

            /// Trims and validates `raw`.
            ///
            /// # Errors
            ///
            /// Returns a `ValidationError` if the value is blank or too long.
            pub fn parse(raw: &str) -> Result<Self, ValidationError> {
                required($field, raw)
                    .and_then(max_chars($field, $max))
                    .map(Self)
            }

            /// Returns the validated text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

text_field! {
    /// Headline of a story.
    Title, "title", TITLE_MAX_CHARS
}

text_field! {
    /// The context the storyteller was in.
    Situation, "situation", NARRATIVE_MAX_CHARS
}

text_field! {
    /// The responsibility or goal the storyteller owned (STAR only).
    Task, "task", NARRATIVE_MAX_CHARS
}

text_field! {
    /// What the storyteller actually did.
    Action, "action", NARRATIVE_MAX_CHARS
}

text_field! {
    /// The outcome of the action.
    StoryResult, "result", NARRATIVE_MAX_CHARS
}

/// Normalizes tags: trimmed, lowercased, deduplicated, first-seen order.
///
/// Blank entries are dropped silently.
///
/// # Errors
///
/// Returns one error per over-long tag, plus one if the count exceeds
/// [`MAX_TAGS`] after deduplication.
pub fn normalize_tags<S: AsRef<str>>(raw: &[S]) -> Result<Vec<String>, Vec<ValidationError>> {
    let mut seen = HashSet::new();
    let mut tags: Vec<String> = Vec::new();
    let mut errors = Vec::new();

    for tag in raw {
        let tag = tag.as_ref().trim().to_lowercase();
        // Rejected tags count as seen, so a repeat is reported once.
        if tag.is_empty() || !seen.insert(tag.clone()) {
            continue;
        }
        let len = tag.chars().count();
        if len > TAG_MAX_CHARS {
            errors.push(ValidationError::new(
                "tags",
                format!("tag `{tag}` must be at most {TAG_MAX_CHARS} characters (got {len})"),
            ));
            continue;
        }
        tags.push(tag);
    }

    if tags.len() > MAX_TAGS {
        errors.push(ValidationError::new(
            "tags",
            format!("at most {MAX_TAGS} tags are allowed (got {})", tags.len()),
        ));
    }

    if errors.is_empty() { Ok(tags) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_trimmed() {
        let title = Title::parse("  Cut build times in half  ").unwrap();
        assert_eq!(title.as_str(), "Cut build times in half");
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let err = Title::parse("   ").unwrap_err();
        assert_eq!(err.field, "title");
    }

    #[test]
    fn test_title_at_limit_is_accepted_and_over_limit_rejected() {
        let at_limit = "a".repeat(TITLE_MAX_CHARS);
        assert!(Title::parse(&at_limit).is_ok());

        let over = "a".repeat(TITLE_MAX_CHARS + 1);
        let err = Title::parse(&over).unwrap_err();
        assert!(err.message.contains("at most 200"));
    }

    #[test]
    fn test_result_field_reports_wire_name() {
        let err = StoryResult::parse("").unwrap_err();
        assert_eq!(err.field, "result");
        assert_eq!(StoryResult::FIELD, "result");
    }

    #[test]
    fn test_tags_are_normalized_and_deduplicated() {
        let tags = normalize_tags(&[" Leadership", "leadership", "", "  ", "Rust"]).unwrap();
        assert_eq!(tags, vec!["leadership".to_owned(), "rust".to_owned()]);
    }

    #[test]
    fn test_max_tags_is_accepted() {
        let raw: Vec<String> = (0..MAX_TAGS).map(|i| format!("tag{i}")).collect();
        let tags = normalize_tags(&raw).unwrap();
        assert_eq!(tags.len(), MAX_TAGS);
    }

    #[test]
    fn test_too_many_tags_is_rejected() {
        let raw: Vec<String> = (0..=MAX_TAGS).map(|i| format!("tag{i}")).collect();
        let errs = normalize_tags(&raw).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("at most 16 tags"));
    }

    #[test]
    fn test_overlong_tag_is_rejected() {
        let long = "x".repeat(TAG_MAX_CHARS + 1);
        let errs = normalize_tags(&[long.as_str(), "ok"]).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field, "tags");
    }

    #[test]
    fn test_repeated_overlong_tag_is_reported_once() {
        let long = "x".repeat(TAG_MAX_CHARS + 1);
        let shouted = long.to_uppercase();
        let errs = normalize_tags(&[long.as_str(), shouted.as_str()]).unwrap_err();
        assert_eq!(errs.len(), 1);
    }
}
