use super::state::AppState;
use crate::error::Error;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Resume plaintext bounds, enforced before a session is created
const MIN_RESUME_CHARS: usize = 100;
const MAX_RESUME_CHARS: usize = 4000;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UploadResumeRequest {
    /// Resume plaintext pasted by the candidate
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub session_id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /interview/resume
/// Validate the pasted resume and open a new session
pub async fn upload_resume(
    State(state): State<AppState>,
    Json(req): Json<UploadResumeRequest>,
) -> impl IntoResponse {
    let content = req.content.trim();
    let chars = content.chars().count();

    if !(MIN_RESUME_CHARS..=MAX_RESUME_CHARS).contains(&chars) {
        let err = Error::InvalidResume(format!(
            "resume must be {} to {} characters, got {}",
            MIN_RESUME_CHARS, MAX_RESUME_CHARS, chars
        ));
        warn!("{}", err);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response();
    }

    let session_id = state.registry.create(content).await;
    info!("resume accepted, session {} created", session_id);

    (
        StatusCode::OK,
        Json(UploadResumeResponse {
            session_id,
            status: "success".to_string(),
        }),
    )
        .into_response()
}

/// POST /interview/:session_id/answer
/// Answer one finalized spoken question against a session
pub async fn answer_question(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> impl IntoResponse {
    let question = req.question.trim();
    if question.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "question must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    match state.interview.answer(&session_id, question).await {
        Ok(answer) => (
            StatusCode::OK,
            Json(AnswerResponse {
                answer,
                status: "success".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            warn!("answer round failed for session {}: {}", session_id, e);
            (
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /interview/:session_id/history
/// Completed turns for a session, oldest first
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.interview.history(&session_id).await {
        Ok(turns) => (StatusCode::OK, Json(turns)).into_response(),
        Err(e) => (
            error_status(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// DELETE /interview/:session_id
/// Clear a session; removing an unknown id is still a success
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    state.registry.remove(&session_id).await;
    StatusCode::NO_CONTENT
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Map a core error onto the HTTP status it surfaces as
fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::SessionNotFound(_) => StatusCode::NOT_FOUND,
        Error::SessionBusy(_) => StatusCode::CONFLICT,
        Error::GenerationTimeout => StatusCode::GATEWAY_TIMEOUT,
        Error::Generation(_) => StatusCode::BAD_GATEWAY,
        Error::InvalidResume(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
