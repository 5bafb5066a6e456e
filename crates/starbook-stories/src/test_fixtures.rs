//! In-crate test doubles.
//!
//! `starbook-test-support` depends on this crate, so unit tests here keep
//! their own copies.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use starbook_core::clock::Clock;
use starbook_core::error::DomainError;
use starbook_core::id::StoryId;

use crate::domain::repository::StoryRepository;
use crate::domain::story::{Story, StoryInput};

#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct FailingRepository;

#[async_trait]
impl StoryRepository for FailingRepository {
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

pub(crate) fn sample_input() -> StoryInput {
    StoryInput {
        title: "Stabilized the payments pipeline".to_owned(),
        situation: "Nightly settlement jobs failed twice a week.".to_owned(),
        task: Some("Own the reliability fix end to end.".to_owned()),
        action: "Added idempotency keys and replayable checkpoints.".to_owned(),
        result: "Zero failed settlements for six months.".to_owned(),
        tags: vec!["reliability".to_owned()],
        role: None,
    }
}
