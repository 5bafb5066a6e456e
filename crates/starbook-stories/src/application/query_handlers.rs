//! Query handlers for the Story context.
//!
//! Queries read from the repository and return serializable view DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use starbook_core::error::DomainError;
use starbook_core::id::{RoleId, StoryId, UserId};
use tracing::instrument;

use crate::application::command_handlers::STORY_KIND;
use crate::domain::fields::Task;
use crate::domain::repository::StoryRepository;
use crate::domain::story::Story;

/// Wire view of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryView {
    /// Story identifier.
    pub id: StoryId,
    /// Headline.
    pub title: String,
    /// Situation section.
    pub situation: String,
    /// Task section, absent for SAR stories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    /// Action section.
    pub action: String,
    /// Result section.
    pub result: String,
    /// Normalized tags.
    pub tags: Vec<String>,
    /// Author, if known.
    pub author_id: Option<UserId>,
    /// Target job role, if any.
    pub role_id: Option<RoleId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last revision time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Story> for StoryView {
    fn from(story: &Story) -> Self {
        let f = &story.fields;
        Self {
            id: story.id,
            title: f.title.as_str().to_owned(),
            situation: f.situation.as_str().to_owned(),
            task: f.task.as_ref().map(Task::as_str).map(str::to_owned),
            action: f.action.as_str().to_owned(),
            result: f.result.as_str().to_owned(),
            tags: f.tags.clone(),
            author_id: story.author,
            role_id: f.role,
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

/// Filters for listing stories. Empty filters match everything.
#[derive(Debug, Clone, Default)]
pub struct StoryQuery {
    /// Case-insensitive substring over title and narrative text.
    pub text: Option<String>,
    /// Tag the story must carry.
    pub tag: Option<String>,
    /// Author the story must belong to.
    pub author: Option<UserId>,
    /// Role the story must target.
    pub role: Option<RoleId>,
}

impl StoryQuery {
    fn matches(&self, story: &Story) -> bool {
        let text_ok = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .is_none_or(|t| story.matches_text(t));
        let tag_ok = self
            .tag
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .is_none_or(|t| story.has_tag(t));
        let author_ok = self.author.is_none_or(|a| story.author == Some(a));
        let role_ok = self.role.is_none_or(|r| story.fields.role == Some(r));

        text_ok && tag_ok && author_ok && role_ok
    }
}

/// Lists stories matching `query`, most recently updated first.
///
/// Ties on `updated_at` are broken by id so the order is stable.
///
/// # Errors
///
/// Returns the repository's error if listing fails.
#[instrument(skip(repo))]
pub async fn get_all_stories(
    query: &StoryQuery,
    repo: &dyn StoryRepository,
) -> Result<Vec<StoryView>, DomainError> {
    let mut stories: Vec<Story> = repo
        .list()
        .await?
        .into_iter()
        .filter(|s| query.matches(s))
        .collect();
    stories.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(stories.iter().map(StoryView::from).collect())
}

/// Retrieves a story by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no story has that id, or the
/// repository's error if loading fails.
#[instrument(skip(repo))]
pub async fn get_story_by_id(
    story_id: StoryId,
    repo: &dyn StoryRepository,
) -> Result<StoryView, DomainError> {
    let story = repo
        .get(story_id)
        .await?
        .ok_or(DomainError::NotFound {
            kind: STORY_KIND,
            id: story_id.as_uuid(),
        })?;
    Ok(StoryView::from(&story))
}
