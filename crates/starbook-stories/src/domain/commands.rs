//! Commands for the Story context.

use starbook_core::command::Command;
use starbook_core::id::{StoryId, UserId};
use uuid::Uuid;

use super::story::StoryInput;

/// Command to create a story.
#[derive(Debug, Clone)]
pub struct CreateStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Author of the new story, if known.
    pub author: Option<UserId>,
    /// Submitted content.
    pub input: StoryInput,
}

impl Command for CreateStory {
    fn command_type(&self) -> &'static str {
        "stories.create_story"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn requester(&self) -> Option<UserId> {
        self.author
    }
}

/// Command to replace every content field of a story.
#[derive(Debug, Clone)]
pub struct UpdateStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story to revise.
    pub story_id: StoryId,
    /// Who is asking, if known.
    pub requester: Option<UserId>,
    /// Replacement content.
    pub input: StoryInput,
}

impl Command for UpdateStory {
    fn command_type(&self) -> &'static str {
        "stories.update_story"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn requester(&self) -> Option<UserId> {
        self.requester
    }
}

/// Command to delete a story.
#[derive(Debug, Clone)]
pub struct DeleteStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story to delete.
    pub story_id: StoryId,
    /// Who is asking, if known.
    pub requester: Option<UserId>,
}

impl Command for DeleteStory {
    fn command_type(&self) -> &'static str {
        "stories.delete_story"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn requester(&self) -> Option<UserId> {
        self.requester
    }
}
