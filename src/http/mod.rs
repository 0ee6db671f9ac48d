//! HTTP API for the dashboard frontend
//!
//! This module provides the REST surface the dashboard UI talks to:
//! - POST /models/upload - Upload a model artifact and run evaluation
//! - POST /audio/transcribe - Upload audio, normalize it, store a transcript
//! - GET /dashboard/:domain - Comparison view for stt / nlu / auth
//! - GET /transcripts/latest - Most recent transcript
//! - POST /nlu/intent-test - Stub intent classification
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
