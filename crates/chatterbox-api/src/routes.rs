//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with tracing, compression, a request body
//! limit and all endpoint handlers.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use chatterbox_core::config::ServerConfig;
use chatterbox_core::error::ChatterboxError;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let chat_routes = Router::new()
        .route("/ask", post(handlers::ask))
        .route("/teach", post(handlers::teach))
        .route("/display", get(handlers::display))
        .route("/reset", post(handlers::reset));

    let hangman_routes = Router::new()
        .route("/hangman/start", post(handlers::hangman_start))
        .route("/hangman/guess", post(handlers::hangman_guess))
        .route("/hangman/status", get(handlers::hangman_status));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .merge(chat_routes)
        .merge(hangman_routes)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until the process exits.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), ChatterboxError> {
    let addr = format!("{}:{}", config.host, config.port);
    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ChatterboxError::Api(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| ChatterboxError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
