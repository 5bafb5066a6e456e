//! Command handlers for the Story context.
//!
//! Each handler validates input, loads what it needs from the repository,
//! applies the domain change, and persists the result.

use starbook_core::clock::Clock;
use starbook_core::command::Command;
use starbook_core::error::DomainError;
use starbook_core::id::StoryId;
use tracing::{debug, instrument};

use crate::domain::commands::{CreateStory, DeleteStory, UpdateStory};
use crate::domain::repository::StoryRepository;
use crate::domain::story::Story;
use crate::domain::validation::validate_story_fields;

/// Entity kind reported in `NotFound` errors.
pub const STORY_KIND: &str = "story";

fn not_found(id: StoryId) -> DomainError {
    DomainError::NotFound {
        kind: STORY_KIND,
        id: id.as_uuid(),
    }
}

/// Handles the `CreateStory` command: validates the input, assigns an id
/// and timestamps, and stores the new story.
///
/// # Errors
///
/// Returns `DomainError::Validation` if any field is invalid, or the
/// repository's error if saving fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub async fn handle_create_story(
    command: &CreateStory,
    clock: &dyn Clock,
    repo: &dyn StoryRepository,
) -> Result<Story, DomainError> {
    let fields = validate_story_fields(&command.input)?;
    let story = Story::create(fields, command.requester(), clock.now());

    repo.save(&story).await?;

    debug!(story_id = %story.id, command_type = command.command_type(), "story created");
    Ok(story)
}

/// Handles the `UpdateStory` command: loads the story, checks the
/// requester, and replaces every content field.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the story does not exist,
/// `DomainError::Unauthorized` if the requester is not the author,
/// `DomainError::Validation` if any field is invalid, or the repository's
/// error if loading or saving fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, story_id = %command.story_id))]
pub async fn handle_update_story(
    command: &UpdateStory,
    clock: &dyn Clock,
    repo: &dyn StoryRepository,
) -> Result<Story, DomainError> {
    let existing = repo
        .get(command.story_id)
        .await?
        .ok_or_else(|| not_found(command.story_id))?;
    existing.ensure_modifiable_by(command.requester())?;

    let fields = validate_story_fields(&command.input)?;
    let revised = existing.revise(fields, clock.now());

    if !repo.replace(&revised).await? {
        // Deleted between the load and the write.
        return Err(not_found(command.story_id));
    }

    debug!(command_type = command.command_type(), "story revised");
    Ok(revised)
}

/// Handles the `DeleteStory` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the story does not exist,
/// `DomainError::Unauthorized` if the requester is not the author, or the
/// repository's error if loading or deleting fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, story_id = %command.story_id))]
pub async fn handle_delete_story(
    command: &DeleteStory,
    repo: &dyn StoryRepository,
) -> Result<(), DomainError> {
    let existing = repo
        .get(command.story_id)
        .await?
        .ok_or_else(|| not_found(command.story_id))?;
    existing.ensure_modifiable_by(command.requester())?;

    if !repo.delete(command.story_id).await? {
        // Removed by someone else between the load and the delete.
        return Err(not_found(command.story_id));
    }

    debug!(command_type = command.command_type(), "story deleted");
    Ok(())
}
