//! Command handlers for the Conversation context.
//!
//! Each handler takes the client's state, applies one wizard turn, and
//! returns the new state. Nothing is stored server-side.

use starbook_core::clock::Clock;
use starbook_core::command::Command;
use starbook_core::error::{DomainError, ValidationError};
use tracing::{debug, instrument};

use crate::assistant::Assistant;
use crate::domain::commands::{Clarify, GenerateDraft, StartConversation};
use crate::domain::state::{ConversationState, StoryDraft};
use crate::domain::step::WorkflowStep;

/// Outcome of a clarify turn.
#[derive(Debug, Clone)]
pub struct ClarifyOutcome {
    /// The updated conversation.
    pub state: ConversationState,
    /// The assistant's reply, also appended to `state`.
    pub reply: String,
}

/// Outcome of draft generation.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// The updated conversation, now at `Generation`.
    pub state: ConversationState,
    /// The generated draft, also stored on `state`.
    pub draft: StoryDraft,
}

/// Handles `StartConversation`: a new state holding the assistant's greeting.
///
/// # Errors
///
/// Returns the assistant's error if it cannot produce a greeting.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub async fn handle_start(
    command: &StartConversation,
    clock: &dyn Clock,
    assistant: &dyn Assistant,
) -> Result<ConversationState, DomainError> {
    let greeting = assistant.reply(&ConversationState::default()).await?;
    debug!(command_type = command.command_type(), "conversation started");
    Ok(ConversationState::start(greeting, clock.now()))
}

/// Handles `Clarify`: appends the user's message and the assistant's reply,
/// then moves the wizard forward when a step is complete.
///
/// The first message moves `InitialCapture` to `Clarification`; answering
/// every STAR section moves `Clarification` to `Refinement`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` if a draft was already
/// generated, `DomainError::Validation` for a blank or oversized message or
/// a full log, or the assistant's error.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, step = %command.state.current_step))]
pub async fn handle_clarify(
    command: &Clarify,
    clock: &dyn Clock,
    assistant: &dyn Assistant,
) -> Result<ClarifyOutcome, DomainError> {
    let mut state = command.state.clone();
    state.ensure_open()?;
    state.check_limits()?;

    let now = clock.now();
    state.push_user(&command.message, now)?;
    // Room for the reply too.
    state.ensure_capacity(1)?;
    let reply = assistant.reply(&state).await?;
    state.push_assistant(reply.clone(), now)?;

    if state.current_step == WorkflowStep::InitialCapture {
        state.advance_to(WorkflowStep::Clarification)?;
    }
    if state.current_step == WorkflowStep::Clarification && state.all_sections_answered() {
        state.advance_to(WorkflowStep::Refinement)?;
    }

    debug!(
        command_type = command.command_type(),
        new_step = %state.current_step,
        messages = state.messages.len(),
        "clarify turn complete"
    );
    Ok(ClarifyOutcome { state, reply })
}

/// Handles `GenerateDraft`: asks the assistant for a draft, stores it, and
/// closes the wizard at `Generation`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` if a draft was already
/// generated, `DomainError::Validation` if the user has said nothing yet or
/// the log is full, or the assistant's error.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, step = %command.state.current_step))]
pub async fn handle_generate(
    command: &GenerateDraft,
    clock: &dyn Clock,
    assistant: &dyn Assistant,
) -> Result<GenerateOutcome, DomainError> {
    let mut state = command.state.clone();
    state.ensure_open()?;
    state.check_limits()?;
    if state.user_message_count() == 0 {
        return Err(ValidationError::new(
            "messages",
            "describe the situation before generating a story",
        )
        .into());
    }
    state.ensure_capacity(1)?;

    let draft = assistant.draft(&state).await?;
    state.push_assistant(
        format!("Here is a draft of your story: \"{}\".", draft.title),
        clock.now(),
    )?;
    state.draft = Some(draft.clone());
    state.advance_to(WorkflowStep::Generation)?;

    debug!(command_type = command.command_type(), "draft generated");
    Ok(GenerateOutcome { state, draft })
}
