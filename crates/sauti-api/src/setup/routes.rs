//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// API path prefix.
pub const API_PREFIX: &str = "/api/v0";

/// Assemble the application router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Headroom over the audio ceiling lets the validator report the exact
    // size for near-limit payloads; anything beyond the transport limit is
    // mapped back to file_too_large by the upload handler.
    let body_limit = state.config.max_audio_bytes + 1024 * 1024;

    Router::new()
        .route("/health", get(health_check))
        .route(
            &format!("{}/audio/process", API_PREFIX),
            post(handlers::process_audio),
        )
        .route(
            &format!("{}/financial-records", API_PREFIX),
            get(handlers::list_financial_records),
        )
        .route(
            &format!("{}/voice-texts", API_PREFIX),
            post(handlers::create_voice_text),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}
