//! Test repositories — mock `StoryRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use starbook_core::error::DomainError;
use starbook_core::id::StoryId;
use starbook_stories::domain::repository::StoryRepository;
use starbook_stories::domain::story::Story;
use starbook_stories::memory_repository::InMemoryStoryRepository;

/// A working in-memory repository that also records every `save`,
/// `replace` and `delete` call, so tests can assert on writes.
#[derive(Debug, Default)]
pub struct RecordingStoryRepository {
    inner: InMemoryStoryRepository,
    saved: Mutex<Vec<Story>>,
    deleted: Mutex<Vec<StoryId>>,
}

impl RecordingStoryRepository {
    /// Creates an empty recording repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every story passed to `save` or `replace`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved(&self) -> Vec<Story> {
        self.saved.lock().unwrap().clone()
    }

    /// Returns every id passed to `delete`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn deleted(&self) -> Vec<StoryId> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryRepository for RecordingStoryRepository {
    async fn list(&self) -> Result<Vec<Story>, DomainError> {
        self.inner.list().await
    }

    async fn get(&self, id: StoryId) -> Result<Option<Story>, DomainError> {
        self.inner.get(id).await
    }

    async fn save(&self, story: &Story) -> Result<(), DomainError> {
        self.saved.lock().unwrap().push(story.clone());
        self.inner.save(story).await
    }

    async fn replace(&self, story: &Story) -> Result<bool, DomainError> {
        self.saved.lock().unwrap().push(story.clone());
        self.inner.replace(story).await
    }

    async fn delete(&self, id: StoryId) -> Result<bool, DomainError> {
        self.deleted.lock().unwrap().push(id);
        self.inner.delete(id).await
    }
}

/// A story repository that always returns an infrastructure error. Useful
/// for testing error-handling paths.
#[derive(Debug)]
pub struct FailingStoryRepository;

#[async_trait]
impl StoryRepository for FailingStoryRepository {
    async fn list(&self) -> Result<Vec<Story>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn get(&self, _id: StoryId) -> Result<Option<Story>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn save(&self, _story: &Story) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn replace(&self, _story: &Story) -> Result<bool, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete(&self, _id: StoryId) -> Result<bool, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
