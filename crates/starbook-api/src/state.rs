//! Shared application state.

use std::sync::Arc;

use starbook_conversation::assistant::{Assistant, TemplateAssistant};
use starbook_core::clock::{SharedClock, SystemClock};
use starbook_stories::domain::repository::StoryRepository;
use starbook_stories::memory_repository::InMemoryStoryRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for timestamps.
    pub clock: SharedClock,
    /// Story storage.
    pub story_repository: Arc<dyn StoryRepository>,
    /// Wizard assistant.
    pub assistant: Arc<dyn Assistant>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: SharedClock,
        story_repository: Arc<dyn StoryRepository>,
        assistant: Arc<dyn Assistant>,
    ) -> Self {
        Self {
            clock,
            story_repository,
            assistant,
        }
    }

    /// State for a production process: system clock, in-memory store,
    /// scripted assistant.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(SystemClock),
            Arc::new(InMemoryStoryRepository::new()),
            Arc::new(TemplateAssistant),
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
