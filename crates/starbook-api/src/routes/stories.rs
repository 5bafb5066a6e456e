//! Routes for the Story bounded context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use starbook_core::id::{RoleId, StoryId, UserId};
use starbook_stories::application::query_handlers::{self, StoryQuery, StoryView};
use starbook_stories::application::command_handlers;
use starbook_stories::domain::commands;
use starbook_stories::domain::story::StoryInput;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Story content shared by create and update bodies.
///
/// Text fields default to empty so that absent fields are reported by
/// story validation alongside every other problem.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryFieldsRequest {
    /// Headline.
    #[serde(default)]
    pub title: String,
    /// Situation section.
    #[serde(default)]
    pub situation: String,
    /// Task section; omit for SAR stories.
    #[serde(default)]
    pub task: Option<String>,
    /// Action section.
    #[serde(default)]
    pub action: String,
    /// Result section.
    #[serde(default)]
    pub result: String,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Target job role.
    #[serde(default)]
    pub role_id: Option<RoleId>,
}

impl From<StoryFieldsRequest> for StoryInput {
    fn from(req: StoryFieldsRequest) -> Self {
        Self {
            title: req.title,
            situation: req.situation,
            task: req.task,
            action: req.action,
            result: req.result,
            tags: req.tags,
            role: req.role_id,
        }
    }
}

/// Request body for POST /.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryRequest {
    /// Story content.
    #[serde(flatten)]
    pub fields: StoryFieldsRequest,
    /// Author of the story, if known.
    #[serde(default)]
    pub author_id: Option<UserId>,
}

/// Request body for PUT /{id}.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoryRequest {
    /// Replacement content.
    #[serde(flatten)]
    pub fields: StoryFieldsRequest,
    /// Who is asking, if known.
    #[serde(default)]
    pub requester_id: Option<UserId>,
}

/// Query string for GET /.
#[derive(Debug, Default, Deserialize)]
pub struct ListStoriesParams {
    /// Free-text search.
    pub q: Option<String>,
    /// Tag filter.
    pub tag: Option<String>,
    /// Author filter.
    pub author: Option<UserId>,
    /// Role filter.
    pub role: Option<RoleId>,
}

/// Query string for DELETE /{id}.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequesterParams {
    /// Who is asking, if known.
    pub requester_id: Option<UserId>,
}

/// GET /
#[instrument(skip(state))]
async fn list_stories(
    State(state): State<AppState>,
    Query(params): Query<ListStoriesParams>,
) -> Result<Json<Vec<StoryView>>, ApiError> {
    let query = StoryQuery {
        text: params.q,
        tag: params.tag,
        author: params.author,
        role: params.role,
    };
    let views = query_handlers::get_all_stories(&query, &*state.story_repository).await?;
    Ok(Json(views))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_story(
    State(state): State<AppState>,
    Path(story_id): Path<StoryId>,
) -> Result<Json<StoryView>, ApiError> {
    let view = query_handlers::get_story_by_id(story_id, &*state.story_repository).await?;
    Ok(Json(view))
}

/// POST /
#[instrument(skip(state, request))]
async fn create_story(
    State(state): State<AppState>,
    Json(request): Json<CreateStoryRequest>,
) -> Result<(StatusCode, Json<StoryView>), ApiError> {
    let command = commands::CreateStory {
        correlation_id: Uuid::new_v4(),
        author: request.author_id,
        input: request.fields.into(),
    };

    info!(correlation_id = %command.correlation_id, "handling create_story command");

    let story = command_handlers::handle_create_story(
        &command,
        state.clock.as_ref(),
        &*state.story_repository,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(StoryView::from(&story))))
}

/// PUT /{id}
#[instrument(skip(state, request))]
async fn update_story(
    State(state): State<AppState>,
    Path(story_id): Path<StoryId>,
    Json(request): Json<UpdateStoryRequest>,
) -> Result<Json<StoryView>, ApiError> {
    let command = commands::UpdateStory {
        correlation_id: Uuid::new_v4(),
        story_id,
        requester: request.requester_id,
        input: request.fields.into(),
    };

    info!(correlation_id = %command.correlation_id, "handling update_story command");

    let story = command_handlers::handle_update_story(
        &command,
        state.clock.as_ref(),
        &*state.story_repository,
    )
    .await?;

    Ok(Json(StoryView::from(&story)))
}

/// DELETE /{id}
#[instrument(skip(state))]
async fn delete_story(
    State(state): State<AppState>,
    Path(story_id): Path<StoryId>,
    Query(params): Query<RequesterParams>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteStory {
        correlation_id: Uuid::new_v4(),
        story_id,
        requester: params.requester_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_story command");

    command_handlers::handle_delete_story(&command, &*state.story_repository).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for the story context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stories).post(create_story))
        .route(
            "/{id}",
            get(get_story).put(update_story).delete(delete_story),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use starbook_conversation::assistant::TemplateAssistant;
    use starbook_core::clock::SharedClock;
    use starbook_stories::domain::repository::StoryRepository;
    use starbook_test_support::{
        FailingStoryRepository, FixedClock, RecordingStoryRepository, fixed_now,
        story_request_json,
    };
    use tower::ServiceExt;

    fn app_state_with(story_repository: Arc<dyn StoryRepository>) -> AppState {
        let clock: SharedClock = Arc::new(FixedClock(fixed_now()));
        AppState::new(clock, story_repository, Arc::new(TemplateAssistant))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };
        (status, json)
    }

    fn post(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_story_returns_201_and_saves() {
        // Arrange
        let repo = Arc::new(RecordingStoryRepository::new());
        let app = router().with_state(app_state_with(repo.clone()));

        // Act
        let (status, json) = send(app, post("/", &story_request_json())).await;

        // Assert
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["title"], "Turned around a late migration");
        assert_eq!(json["tags"], serde_json::json!(["delivery", "databases"]));
        assert_eq!(json["createdAt"], json["updatedAt"]);

        let saved = repo.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(json["id"], saved[0].id.to_string());
    }

    #[tokio::test]
    async fn test_create_story_lists_every_missing_field() {
        // Arrange
        let repo = Arc::new(RecordingStoryRepository::new());
        let app = router().with_state(app_state_with(repo.clone()));

        // Act
        let (status, json) = send(app, post("/", &serde_json::json!({ "title": "  " }))).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
        let fields: Vec<&str> = json["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["title", "situation", "action", "result"]);
        assert!(repo.saved().is_empty());
    }

    #[tokio::test]
    async fn test_get_story_returns_404_for_unknown_id() {
        // Arrange
        let app = router().with_state(app_state_with(Arc::new(RecordingStoryRepository::new())));
        let request = Request::builder()
            .uri(format!("/{}", StoryId::new()))
            .body(Body::empty())
            .unwrap();

        // Act
        let (status, json) = send(app, request).await;

        // Assert
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_get_story_rejects_malformed_id() {
        let app = router().with_state(app_state_with(Arc::new(RecordingStoryRepository::new())));
        let request = Request::builder()
            .uri("/not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_stories_returns_500_when_repository_fails() {
        // Arrange
        let app = router().with_state(app_state_with(Arc::new(FailingStoryRepository)));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        // Act
        let (status, json) = send(app, request).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }

    #[tokio::test]
    async fn test_delete_by_other_user_returns_401() {
        // Arrange
        let repo = Arc::new(RecordingStoryRepository::new());
        let author = UserId::new();
        let mut body = story_request_json();
        body["authorId"] = Value::String(author.to_string());
        let (_, created) = send(
            router().with_state(app_state_with(repo.clone())),
            post("/", &body),
        )
        .await;
        let story_id = created["id"].as_str().unwrap().to_owned();

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{story_id}?requesterId={}", UserId::new()))
            .body(Body::empty())
            .unwrap();

        // Act
        let (status, json) = send(router().with_state(app_state_with(repo.clone())), request).await;

        // Assert
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "unauthorized");
        assert!(repo.deleted().is_empty());
    }

    #[tokio::test]
    async fn test_create_story_rejects_malformed_json() {
        let app = router().with_state(app_state_with(Arc::new(RecordingStoryRepository::new())));
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
