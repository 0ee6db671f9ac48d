use super::state::AppState;
use crate::dashboard;
use crate::model::{Domain, ResultRecord};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UploadModelRequest {
    /// Original file name of the artifact (e.g. "asr_v2.onnx"); also the
    /// record key within the domain
    pub file_name: String,

    /// Target domain: "stt", "nlu", or "auth"
    pub model_type: String,

    /// Base64-encoded artifact bytes
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct UploadModelResponse {
    pub model_name: String,
    pub domain: String,
    pub status: String,
    pub message: String,
    /// The freshly stored record, read back from the store
    pub record: Option<ResultRecord>,
}

#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    /// Original audio file name (.mp3)
    pub file_name: String,

    /// Base64-encoded audio bytes
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub file_name: String,
    pub text: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct IntentTestRequest {
    /// Utterance to classify; defaults to the latest stored transcript
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IntentTestResponse {
    pub text: String,
    pub intent: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /models/upload
/// Upload a model artifact and run the out-of-process evaluation
pub async fn upload_model(
    State(state): State<AppState>,
    Json(req): Json<UploadModelRequest>,
) -> impl IntoResponse {
    let domain: Domain = match req.model_type.parse() {
        Ok(domain) => domain,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let artifact = match BASE64.decode(&req.data) {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid base64 artifact data: {}", e),
                }),
            )
                .into_response();
        }
    };

    info!(
        "Received model upload: {} ({}, {} bytes)",
        req.file_name,
        domain,
        artifact.len()
    );

    if let Err(e) = state.evaluation.run(&artifact, &req.file_name, domain).await {
        error!("Evaluation of {} failed: {}", req.file_name, e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Evaluation failed: {}", e),
            }),
        )
            .into_response();
    }

    // Read the record back so the caller sees what the worker stored
    let record = match state.results.get(domain, &req.file_name) {
        Ok(record) => record,
        Err(e) => {
            error!("Failed to read back result for {}: {}", req.file_name, e);
            None
        }
    };

    (
        StatusCode::OK,
        Json(UploadModelResponse {
            model_name: req.file_name.clone(),
            domain: domain.label().to_string(),
            status: "evaluated".to_string(),
            message: format!(
                "Model {} evaluated; the artifact itself was not kept",
                req.file_name
            ),
            record,
        }),
    )
        .into_response()
}

/// POST /audio/transcribe
/// Upload an audio file, normalize it, and store a transcript
pub async fn transcribe_audio(
    State(state): State<AppState>,
    Json(req): Json<TranscribeRequest>,
) -> impl IntoResponse {
    if !req.file_name.to_ascii_lowercase().ends_with(".mp3") {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Unsupported audio upload: {} (expected .mp3)", req.file_name),
            }),
        )
            .into_response();
    }

    let audio = match BASE64.decode(&req.data) {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid base64 audio data: {}", e),
                }),
            )
                .into_response();
        }
    };

    match state.transcription.run(&audio, &req.file_name) {
        Ok(record) => (
            StatusCode::OK,
            Json(TranscribeResponse {
                file_name: record.file_name,
                text: record.text,
                message: "Transcription complete. Try it in the NLU intent test.".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Transcription of {} failed: {}", req.file_name, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Transcription failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /dashboard/:domain
/// Comparison view for one domain; an empty domain is a valid view
pub async fn dashboard_view(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> impl IntoResponse {
    let domain: Domain = match domain.parse() {
        Ok(domain) => domain,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    match dashboard::domain_view(state.results.as_ref(), domain) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => {
            error!("Failed to build {} view: {}", domain, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to load {} results: {}", domain, e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /transcripts/latest
/// The most recent stored transcript
pub async fn latest_transcript(State(state): State<AppState>) -> impl IntoResponse {
    match state.transcripts.latest() {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No transcript available yet. Upload an audio file first.".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to load latest transcript: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to load latest transcript: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /nlu/intent-test
/// Classify an utterance (or the latest transcript) with the stub classifier
pub async fn intent_test(
    State(state): State<AppState>,
    Json(req): Json<IntentTestRequest>,
) -> impl IntoResponse {
    let text = match req.text {
        Some(text) => text,
        None => match state.transcripts.latest() {
            Ok(Some(record)) => record.text,
            Ok(None) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: "No transcript available to classify. \
                                Upload an audio file or pass a text field."
                            .to_string(),
                    }),
                )
                    .into_response();
            }
            Err(e) => {
                error!("Failed to load latest transcript: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to load latest transcript: {}", e),
                    }),
                )
                    .into_response();
            }
        },
    };

    match state.intents.classify(&text) {
        Ok(intent) => (StatusCode::OK, Json(IntentTestResponse { text, intent })).into_response(),
        Err(e) => {
            error!("Intent classification failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Intent classification failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
