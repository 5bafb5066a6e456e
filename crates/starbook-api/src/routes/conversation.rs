//! Routes for the Conversation bounded context.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use starbook_conversation::application::command_handlers;
use starbook_conversation::domain::commands;
use starbook_conversation::domain::state::{ConversationState, StoryDraft};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /clarify.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClarifyRequest {
    /// State as last returned by the server; a fresh state when omitted.
    #[serde(default)]
    pub state: ConversationState,
    /// The user's new message.
    #[serde(default)]
    pub message: String,
}

/// Request body for POST /generate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// State as last returned by the server.
    pub state: ConversationState,
}

/// Response body for POST /start.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    /// The new conversation.
    pub state: ConversationState,
}

/// Response body for POST /clarify.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClarifyResponse {
    /// The updated conversation.
    pub state: ConversationState,
    /// The assistant's reply.
    pub reply: String,
}

/// Response body for POST /generate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// The updated conversation.
    pub state: ConversationState,
    /// The generated draft.
    pub draft: StoryDraft,
}

/// POST /start
#[instrument(skip(state))]
async fn start(State(state): State<AppState>) -> Result<Json<StartResponse>, ApiError> {
    let command = commands::StartConversation {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling start_conversation command");

    let conversation =
        command_handlers::handle_start(&command, state.clock.as_ref(), &*state.assistant).await?;

    Ok(Json(StartResponse {
        state: conversation,
    }))
}

/// POST /clarify
#[instrument(skip(state, request), fields(step = %request.state.current_step))]
async fn clarify(
    State(state): State<AppState>,
    Json(request): Json<ClarifyRequest>,
) -> Result<Json<ClarifyResponse>, ApiError> {
    let command = commands::Clarify {
        correlation_id: Uuid::new_v4(),
        state: request.state,
        message: request.message,
    };

    info!(correlation_id = %command.correlation_id, "handling clarify command");

    let outcome =
        command_handlers::handle_clarify(&command, state.clock.as_ref(), &*state.assistant)
            .await?;

    Ok(Json(ClarifyResponse {
        state: outcome.state,
        reply: outcome.reply,
    }))
}

/// POST /generate
#[instrument(skip(state, request), fields(step = %request.state.current_step))]
async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let command = commands::GenerateDraft {
        correlation_id: Uuid::new_v4(),
        state: request.state,
    };

    info!(correlation_id = %command.correlation_id, "handling generate command");

    let outcome =
        command_handlers::handle_generate(&command, state.clock.as_ref(), &*state.assistant)
            .await?;

    Ok(Json(GenerateResponse {
        state: outcome.state,
        draft: outcome.draft,
    }))
}

/// Returns the router for the conversation context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start))
        .route("/clarify", post(clarify))
        .route("/generate", post(generate))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use starbook_conversation::assistant::TemplateAssistant;
    use starbook_core::clock::SharedClock;
    use starbook_test_support::{FixedClock, RecordingStoryRepository, fixed_now};
    use tower::ServiceExt;

    fn test_app_state() -> AppState {
        let clock: SharedClock = Arc::new(FixedClock(fixed_now()));
        AppState::new(
            clock,
            Arc::new(RecordingStoryRepository::new()),
            Arc::new(TemplateAssistant),
        )
    }

    async fn post_json(uri: &str, body: &Value) -> (StatusCode, Value) {
        let app = router().with_state(test_app_state());
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_start_returns_state_at_initial_capture() {
        // Act
        let (status, json) = post_json("/start", &serde_json::json!({})).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"]["currentStep"], "initialCapture");
        assert_eq!(json["state"]["messages"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clarify_without_state_starts_fresh() {
        // Act
        let (status, json) = post_json(
            "/clarify",
            &serde_json::json!({ "message": "Our release train kept derailing." }),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"]["currentStep"], "clarification");
        assert_eq!(json["state"]["messages"][0]["role"], "user");
        assert_eq!(json["state"]["messages"][1]["content"], json["reply"]);
    }

    #[tokio::test]
    async fn test_clarify_blank_message_returns_400() {
        let (status, json) =
            post_json("/clarify", &serde_json::json!({ "message": "  " })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["details"][0]["field"], "message");
    }

    #[tokio::test]
    async fn test_generate_after_generation_returns_409() {
        let (status, json) = post_json(
            "/generate",
            &serde_json::json!({
                "state": { "currentStep": "generation", "messages": [] }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"], "invalid_transition");
    }

    #[tokio::test]
    async fn test_unknown_step_is_rejected_by_the_extractor() {
        let app = router().with_state(test_app_state());
        let request = Request::builder()
            .method("POST")
            .uri("/generate")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"state":{"currentStep":"publishing"}}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
