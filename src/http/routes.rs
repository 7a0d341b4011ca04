use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/interview/resume", post(handlers::upload_resume))
        .route("/interview/:session_id", delete(handlers::clear_session))
        // Question answering
        .route(
            "/interview/:session_id/answer",
            post(handlers::answer_question),
        )
        .route(
            "/interview/:session_id/history",
            get(handlers::get_history),
        )
        // The browser client calls from another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
