//! The story record.

use chrono::{DateTime, Utc};
use starbook_core::error::{DomainError, ValidationErrors};
use starbook_core::id::{RoleId, StoryId, UserId};

use super::fields::{Action, Situation, StoryResult, Task, Title, normalize_tags};
use super::validation::{Collector, optional};

/// Unvalidated story content as submitted by a caller.
#[derive(Debug, Clone, Default)]
pub struct StoryInput {
    /// Story headline.
    pub title: String,
    /// Situation section.
    pub situation: String,
    /// Task section; absent for SAR stories.
    pub task: Option<String>,
    /// Action section.
    pub action: String,
    /// Result section.
    pub result: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Target job role.
    pub role: Option<RoleId>,
}

/// Story content that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryFields {
    /// Story headline.
    pub title: Title,
    /// Situation section.
    pub situation: Situation,
    /// Task section.
    pub task: Option<Task>,
    /// Action section.
    pub action: Action,
    /// Result section.
    pub result: StoryResult,
    /// Normalized tags.
    pub tags: Vec<String>,
    /// Target job role.
    pub role: Option<RoleId>,
}

impl StoryInput {
    /// Validates every field, reporting all failing fields together.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` listing the first failure of each invalid
    /// field.
    pub fn validate(&self) -> Result<StoryFields, ValidationErrors> {
        let mut collector = Collector::new();

        let title = collector.check(Title::parse(&self.title));
        let situation = collector.check(Situation::parse(&self.situation));
        let task = collector.check(
            optional(self.task.as_deref())
                .map(|raw| Task::parse(&raw))
                .transpose(),
        );
        let action = collector.check(Action::parse(&self.action));
        let result = collector.check(StoryResult::parse(&self.result));
        let tags = match normalize_tags(&self.tags) {
            Ok(tags) => Some(tags),
            Err(errs) => {
                collector.extend(errs);
                None
            }
        };

        // Every field that failed is `None` and has a recorded error.
        match (title, situation, task, action, result, tags) {
            (Some(title), Some(situation), Some(task), Some(action), Some(result), Some(tags)) => {
                Ok(StoryFields {
                    title,
                    situation,
                    task,
                    action,
                    result,
                    tags,
                    role: self.role,
                })
            }
            _ => Err(collector.into_errors()),
        }
    }
}

/// A stored SAR/STAR story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    /// Story identifier.
    pub id: StoryId,
    /// Validated content.
    pub fields: StoryFields,
    /// Author, when the creator identified themselves.
    pub author: Option<UserId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the most recent revision.
    pub updated_at: DateTime<Utc>,
}

impl Story {
    /// Creates a new story with a fresh id.
    #[must_use]
    pub fn create(fields: StoryFields, author: Option<UserId>, now: DateTime<Utc>) -> Self {
        Self {
            id: StoryId::new(),
            fields,
            author,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with every content field replaced.
    ///
    /// Identity, author and creation time carry over unchanged.
    #[must_use]
    pub fn revise(&self, fields: StoryFields, now: DateTime<Utc>) -> Self {
        Self {
            fields,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Checks that `requester` may modify this story.
    ///
    /// Stories without an author, and requests without a requester, are
    /// not restricted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` if both are known and differ.
    pub fn ensure_modifiable_by(&self, requester: Option<UserId>) -> Result<(), DomainError> {
        match (self.author, requester) {
            (Some(author), Some(requester)) if author != requester => {
                Err(DomainError::Unauthorized(format!(
                    "user {requester} is not the author of story {}",
                    self.id
                )))
            }
            _ => Ok(()),
        }
    }

    /// Case-insensitive substring match over the title and narrative text.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        let f = &self.fields;
        [
            Some(f.title.as_str()),
            Some(f.situation.as_str()),
            f.task.as_ref().map(Task::as_str),
            Some(f.action.as_str()),
            Some(f.result.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(&needle))
    }

    /// Returns true if the story carries `tag` (compared after normalizing).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.fields.tags.iter().any(|t| *t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn input() -> StoryInput {
        StoryInput {
            title: "  Rescued the release  ".to_owned(),
            situation: "Release was blocked by flaky tests.".to_owned(),
            task: Some("   ".to_owned()),
            action: "Quarantined the flaky suite and fixed the root cause.".to_owned(),
            result: "Shipped on schedule.".to_owned(),
            tags: vec!["Testing".to_owned(), "testing".to_owned()],
            role: None,
        }
    }

    #[test]
    fn test_validate_trims_and_normalizes() {
        let fields = input().validate().unwrap();
        assert_eq!(fields.title.as_str(), "Rescued the release");
        assert_eq!(fields.task, None);
        assert_eq!(fields.tags, vec!["testing".to_owned()]);
    }

    #[test]
    fn test_validate_collects_one_error_per_field() {
        let raw = StoryInput {
            title: " ".to_owned(),
            action: String::new(),
            ..input()
        };
        let errs = raw.validate().unwrap_err();
        assert_eq!(errs.errors().len(), 2);
        assert!(errs.has_field("title"));
        assert!(errs.has_field("action"));
    }

    #[test]
    fn test_revise_keeps_identity_and_creation_time() {
        let created = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).unwrap();
        let author = Some(UserId::new());
        let story = Story::create(input().validate().unwrap(), author, created);

        let new_fields = StoryInput {
            title: "Rescued two releases".to_owned(),
            ..input()
        }
        .validate()
        .unwrap();
        let revised = story.revise(new_fields, later);

        assert_eq!(revised.id, story.id);
        assert_eq!(revised.author, author);
        assert_eq!(revised.created_at, created);
        assert_eq!(revised.updated_at, later);
        assert_eq!(revised.fields.title.as_str(), "Rescued two releases");
        // The original value is untouched.
        assert_eq!(story.fields.title.as_str(), "Rescued the release");
    }

    #[test]
    fn test_only_a_different_known_user_is_refused() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let author = UserId::new();
        let owned = Story::create(input().validate().unwrap(), Some(author), now);
        let unowned = Story::create(input().validate().unwrap(), None, now);

        assert!(owned.ensure_modifiable_by(Some(author)).is_ok());
        assert!(owned.ensure_modifiable_by(None).is_ok());
        assert!(unowned.ensure_modifiable_by(Some(UserId::new())).is_ok());
        assert!(matches!(
            owned.ensure_modifiable_by(Some(UserId::new())),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_text_and_tag_matching_ignore_case() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let story = Story::create(input().validate().unwrap(), None, now);

        assert!(story.matches_text("FLAKY"));
        assert!(story.matches_text("schedule"));
        assert!(!story.matches_text("kubernetes"));
        assert!(story.has_tag(" TESTING "));
        assert!(!story.has_tag("rust"));
    }
}
