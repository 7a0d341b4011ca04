use crate::conversation::SessionRegistry;
use crate::interview::InterviewService;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Owner of every live interview session
    pub registry: Arc<SessionRegistry>,

    /// Answer-round driver (session resolution, generation, turn recording)
    pub interview: Arc<InterviewService>,
}

impl AppState {
    pub fn new(registry: Arc<SessionRegistry>, interview: Arc<InterviewService>) -> Self {
        Self {
            registry,
            interview,
        }
    }
}
