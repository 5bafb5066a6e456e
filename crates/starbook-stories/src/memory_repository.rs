//! In-process implementation of the `StoryRepository` trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use starbook_core::error::DomainError;
use starbook_core::id::StoryId;
use tokio::sync::RwLock;

use crate::domain::repository::StoryRepository;
use crate::domain::story::Story;

/// Story store held in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryRepository {
    stories: Arc<RwLock<HashMap<StoryId, Story>>>,
}

impl InMemoryStoryRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored stories.
    pub async fn len(&self) -> usize {
        self.stories.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.stories.read().await.is_empty()
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn list(&self) -> Result<Vec<Story>, DomainError> {
        Ok(self.stories.read().await.values().cloned().collect())
    }

    async fn get(&self, id: StoryId) -> Result<Option<Story>, DomainError> {
        Ok(self.stories.read().await.get(&id).cloned())
    }

    async fn save(&self, story: &Story) -> Result<(), DomainError> {
        self.stories.write().await.insert(story.id, story.clone());
        Ok(())
    }

    async fn replace(&self, story: &Story) -> Result<bool, DomainError> {
        let mut stories = self.stories.write().await;
        match stories.get_mut(&story.id) {
            Some(stored) => {
                *stored = story.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: StoryId) -> Result<bool, DomainError> {
        Ok(self.stories.write().await.remove(&id).is_some())
    }
}
