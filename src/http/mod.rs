//! HTTP API server for the interview client
//!
//! This module provides the REST surface the browser client talks to:
//! - POST /interview/resume - Validate a pasted resume, open a session
//! - POST /interview/:session_id/answer - Answer one question
//! - GET /interview/:session_id/history - Completed turns so far
//! - DELETE /interview/:session_id - Clear a session
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
