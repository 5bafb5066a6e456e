//! Conversation state carried between wizard requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use starbook_core::error::{DomainError, ValidationError, ValidationErrors};

use super::message::{Message, MessageRole};
use super::step::WorkflowStep;

/// Maximum number of messages kept in one conversation.
pub const MAX_MESSAGES: usize = 64;
/// Maximum length of one user message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;
/// Number of user answers needed to cover situation, task, action and result.
pub const STAR_SECTIONS: usize = 4;

/// Story content proposed by the assistant; unvalidated until the user
/// submits it as a story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDraft {
    /// Proposed headline.
    pub title: String,
    /// Situation section.
    pub situation: String,
    /// Task section, if the user gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    /// Action section.
    pub action: String,
    /// Result section.
    pub result: String,
}

/// Message log, current step and optional draft of one wizard session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    /// Messages in the order they were appended.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Where the wizard currently is.
    #[serde(default)]
    pub current_step: WorkflowStep,
    /// The generated draft, once there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<StoryDraft>,
}

impl ConversationState {
    /// Starts a conversation with the assistant's opening line.
    pub fn start(greeting: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting, now)],
            current_step: WorkflowStep::InitialCapture,
            draft: None,
        }
    }

    /// User-authored message contents, oldest first.
    pub fn user_messages(&self) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
    }

    /// Number of user-authored messages.
    #[must_use]
    pub fn user_message_count(&self) -> usize {
        self.user_messages().count()
    }

    /// Returns true once the user has answered every STAR section.
    #[must_use]
    pub fn all_sections_answered(&self) -> bool {
        self.user_message_count() >= STAR_SECTIONS
    }

    /// Fails if the wizard already reached its final step.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` at `Generation`.
    pub fn ensure_open(&self) -> Result<(), DomainError> {
        if self.current_step.is_terminal() {
            return Err(DomainError::InvalidTransition(
                "conversation already produced a draft; start a new one".to_owned(),
            ));
        }
        Ok(())
    }

    /// Fails unless `needed` more messages fit in the log.
    ///
    /// # Errors
    ///
    /// Returns a `messages` validation error when the log is too full.
    pub fn ensure_capacity(&self, needed: usize) -> Result<(), DomainError> {
        if self.messages.len() + needed > MAX_MESSAGES {
            return Err(ValidationError::new(
                "messages",
                format!("conversation is limited to {MAX_MESSAGES} messages"),
            )
            .into());
        }
        Ok(())
    }

    /// Appends a user message after trimming and length checks.
    ///
    /// # Errors
    ///
    /// Returns a `message` validation error when the text is blank or too
    /// long, or a `messages` error when the log is full.
    pub fn push_user(&mut self, raw: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        let content = raw.trim();
        if content.is_empty() {
            return Err(ValidationError::missing("message").into());
        }
        let len = content.chars().count();
        if len > MAX_MESSAGE_CHARS {
            return Err(ValidationError::too_long("message", MAX_MESSAGE_CHARS, len).into());
        }
        self.ensure_capacity(1)?;
        self.messages.push(Message::user(content, now));
        Ok(())
    }

    /// Appends an assistant message.
    ///
    /// # Errors
    ///
    /// Returns a `messages` validation error when the log is full.
    pub fn push_assistant(
        &mut self,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_capacity(1)?;
        self.messages.push(Message::assistant(content, now));
        Ok(())
    }

    /// Moves to `target`, which must not be earlier than the current step.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` for a backwards move.
    pub fn advance_to(&mut self, target: WorkflowStep) -> Result<(), DomainError> {
        if target < self.current_step {
            return Err(DomainError::InvalidTransition(format!(
                "cannot move from {} back to {target}",
                self.current_step
            )));
        }
        self.current_step = target;
        Ok(())
    }

    /// Checks a state received from a client against the log limits.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` listing every violated limit.
    pub fn check_limits(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();
        if self.messages.len() > MAX_MESSAGES {
            errors.push(ValidationError::new(
                "messages",
                format!("conversation is limited to {MAX_MESSAGES} messages"),
            ));
        }
        if let Some(pos) = self
            .messages
            .iter()
            .position(|m| m.content.chars().count() > MAX_MESSAGE_CHARS)
        {
            errors.push(ValidationError::new(
                "messages",
                format!("message {pos} exceeds {MAX_MESSAGE_CHARS} characters"),
            ));
        }
        if self
            .messages
            .windows(2)
            .any(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            errors.push(ValidationError::new(
                "messages",
                "messages must be in chronological order",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(ValidationErrors::new(errors)))
        }
    }
}
