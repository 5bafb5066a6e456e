//! Canned story content.

use chrono::{DateTime, TimeZone, Utc};
use starbook_stories::domain::story::StoryInput;

/// The timestamp every test clock is pinned to unless a test needs another.
///
/// # Panics
///
/// Never; the literal date is valid.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// A complete, valid STAR story.
#[must_use]
pub fn story_input() -> StoryInput {
    StoryInput {
        title: "Turned around a late migration".to_owned(),
        situation: "A database migration was three months behind.".to_owned(),
        task: Some("Get it live before the licence renewal.".to_owned()),
        action: "Split the cut-over into per-tenant batches.".to_owned(),
        result: "Finished two weeks early with no downtime.".to_owned(),
        tags: vec!["Delivery".to_owned(), "databases".to_owned()],
        role: None,
    }
}

/// The same story as a camelCase JSON request body.
#[must_use]
pub fn story_request_json() -> serde_json::Value {
    serde_json::json!({
        "title": "Turned around a late migration",
        "situation": "A database migration was three months behind.",
        "task": "Get it live before the licence renewal.",
        "action": "Split the cut-over into per-tenant batches.",
        "result": "Finished two weeks early with no downtime.",
        "tags": ["Delivery", "databases"]
    })
}
