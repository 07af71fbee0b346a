//! Axum router — maps all URL paths to handlers.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    page::{health, index},
    session::{session_input, session_snapshot},
    upload::session_upload,
};
use crate::sse::session_events;
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let max_upload_bytes = state.config.server.max_upload_bytes;
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Page
        .route("/",       get(index))
        .route("/health", get(health))

        // Session transport
        .route("/session/events",               get(session_events))
        .route("/session/{id}",                 get(session_snapshot))
        .route("/session/{id}/input",           post(session_input))
        .route("/session/{id}/upload/{input}",  post(session_upload))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
