//! Story repository abstraction.

use async_trait::async_trait;
use starbook_core::error::DomainError;
use starbook_core::id::StoryId;

use super::story::Story;

/// Storage for stories.
///
/// Implementations must be safe to share between request handlers.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Returns every stored story, in no particular order.
    async fn list(&self) -> Result<Vec<Story>, DomainError>;

    /// Loads a story, or `None` if it does not exist.
    async fn get(&self, id: StoryId) -> Result<Option<Story>, DomainError>;

    /// Inserts a new story or replaces the stored story with the same id.
    async fn save(&self, story: &Story) -> Result<(), DomainError>;

    /// Overwrites an existing story, checking and writing atomically.
    /// Returns `false`, and stores nothing, if the id is no longer present.
    async fn replace(&self, story: &Story) -> Result<bool, DomainError>;

    /// Removes a story. Returns `false` if there was nothing to remove.
    async fn delete(&self, id: StoryId) -> Result<bool, DomainError>;
}
