//! Starbook API server entry point.

use std::error::Error;

use starbook_api::config::Config;
use starbook_api::state::AppState;
use starbook_api::{app, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    let _telemetry = telemetry::init(&config)?;

    tracing::info!("Starting Starbook API server");

    // Stories live in process memory for the lifetime of the server.
    let app = app(AppState::in_memory(), &config)?;

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
