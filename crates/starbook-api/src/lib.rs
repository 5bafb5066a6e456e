//! Starbook API — HTTP surface for stories and the authoring wizard.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;

/// Builds the application router with every route mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/stories", routes::stories::router())
        .nest("/api/conversation", routes::conversation::router())
        .with_state(state)
}

/// Builds the CORS layer: permissive when no origins are configured,
/// otherwise restricted to the configured list.
///
/// # Errors
///
/// Returns `AppError::Config` if an origin is not a valid header value.
pub fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    if config.cors_allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }
    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| AppError::Config(format!("invalid CORS origin `{o}`: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any))
}

/// Builds the router with HTTP tracing and CORS applied.
///
/// # Errors
///
/// Returns `AppError::Config` if the CORS configuration is invalid.
pub fn app(state: AppState, config: &Config) -> Result<Router, AppError> {
    Ok(router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config)?))
}
