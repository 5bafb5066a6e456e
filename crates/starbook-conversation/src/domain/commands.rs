//! Commands for the Conversation context.

use starbook_core::command::Command;
use uuid::Uuid;

use super::state::ConversationState;

/// Command to open a fresh wizard session.
#[derive(Debug, Clone)]
pub struct StartConversation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StartConversation {
    fn command_type(&self) -> &'static str {
        "conversation.start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to submit a user message and get the assistant's follow-up.
#[derive(Debug, Clone)]
pub struct Clarify {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// State as last returned to the client.
    pub state: ConversationState,
    /// The user's new message.
    pub message: String,
}

impl Command for Clarify {
    fn command_type(&self) -> &'static str {
        "conversation.clarify"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to turn the conversation into a draft story.
#[derive(Debug, Clone)]
pub struct GenerateDraft {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// State as last returned to the client.
    pub state: ConversationState,
}

impl Command for GenerateDraft {
    fn command_type(&self) -> &'static str {
        "conversation.generate"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
