//! The assistant behind the wizard.
//!
//! [`Assistant`] is the seam where a language-model provider would plug in.
//! [`TemplateAssistant`] is the built-in implementation: it follows a fixed
//! STAR question script and assembles the draft from the user's answers.

use async_trait::async_trait;
use starbook_core::error::DomainError;

use crate::domain::state::{ConversationState, STAR_SECTIONS, StoryDraft};

/// Longest generated title, in characters (excluding the ellipsis).
pub const DRAFT_TITLE_MAX_CHARS: usize = 80;

/// Produces the wizard's side of the conversation.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// The next assistant message for `state`, whose last message is the
    /// user's latest input (or which is empty at the start).
    async fn reply(&self, state: &ConversationState) -> Result<String, DomainError>;

    /// A draft story built from everything said so far.
    async fn draft(&self, state: &ConversationState) -> Result<StoryDraft, DomainError>;
}

const GREETING: &str = "Tell me about a time you made a difference at work. \
    Where were you, and what was going on?";
const ASK_TASK: &str = "Got it. What was your task: the goal or responsibility \
    that was yours in that situation?";
const ASK_ACTION: &str = "What did you do about it? Focus on the steps you \
    took yourself rather than the team.";
const ASK_RESULT: &str = "How did it turn out? Numbers, dates, or feedback \
    make the result concrete.";
const INVITE_REFINEMENT: &str = "Thanks, that covers situation, task, action \
    and result. Add anything you want sharpened, or generate the story when \
    you're ready.";

/// Scripted assistant that needs no external service.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateAssistant;

impl TemplateAssistant {
    fn question_for(answered: usize) -> &'static str {
        match answered {
            0 => GREETING,
            1 => ASK_TASK,
            2 => ASK_ACTION,
            3 => ASK_RESULT,
            _ => INVITE_REFINEMENT,
        }
    }
}

#[async_trait]
impl Assistant for TemplateAssistant {
    async fn reply(&self, state: &ConversationState) -> Result<String, DomainError> {
        Ok(Self::question_for(state.user_message_count()).to_owned())
    }

    async fn draft(&self, state: &ConversationState) -> Result<StoryDraft, DomainError> {
        let answers: Vec<&str> = state.user_messages().collect();
        let section = |i: usize| answers.get(i).copied().unwrap_or_default().to_owned();

        // Answers past the fourth refine the result.
        let result = if answers.len() > STAR_SECTIONS {
            answers[STAR_SECTIONS - 1..].join("\n\n")
        } else {
            section(3)
        };
        let situation = section(0);

        Ok(StoryDraft {
            title: title_from(&situation),
            task: answers.get(1).map(|t| (*t).to_owned()),
            action: section(2),
            result,
            situation,
        })
    }
}

/// First sentence of `text`, clipped to [`DRAFT_TITLE_MAX_CHARS`].
fn title_from(text: &str) -> String {
    let sentence = text
        .split(['.', '!', '?', '\n'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("");

    if sentence.is_empty() {
        return "Untitled story".to_owned();
    }
    if sentence.chars().count() <= DRAFT_TITLE_MAX_CHARS {
        return sentence.to_owned();
    }
    let clipped: String = sentence.chars().take(DRAFT_TITLE_MAX_CHARS).collect();
    format!("{}...", clipped.trim_end())
}
