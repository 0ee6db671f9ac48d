use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Upload triggers
        .route("/models/upload", post(handlers::upload_model))
        .route("/audio/transcribe", post(handlers::transcribe_audio))
        // Dashboard queries
        .route("/dashboard/:domain", get(handlers::dashboard_view))
        .route("/transcripts/latest", get(handlers::latest_transcript))
        .route("/nlu/intent-test", post(handlers::intent_test))
        // The dashboard frontend is served separately
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
