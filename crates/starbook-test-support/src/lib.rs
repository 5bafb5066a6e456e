//! Shared test doubles and fixtures for the Starbook story service.

mod clock;
mod fixtures;
mod repository;

pub use clock::FixedClock;
pub use fixtures::{fixed_now, story_input, story_request_json};
pub use repository::{FailingStoryRepository, RecordingStoryRepository};
