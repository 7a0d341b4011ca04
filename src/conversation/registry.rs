use super::session::ConversationSession;
use crate::config::InterviewConfig;
use crate::error::Error;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// Exclusive owner of every live `ConversationSession`, keyed by session id
///
/// Callers never hold a session directly; they pass the id and lock the
/// session for the duration of one answer round.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<ConversationSession>>>>,
    config: InterviewConfig,
}

impl SessionRegistry {
    pub fn new(config: InterviewConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Create a session seeded with the uploaded resume; returns its id
    pub async fn create(&self, resume_context: impl Into<String>) -> String {
        let id = format!("session-{}", uuid::Uuid::new_v4());
        let session =
            ConversationSession::new(id.clone(), resume_context, self.config.max_history_turns);

        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(session)));

        info!("created interview session {}", id);
        id
    }

    /// Look up a session, lazily expiring it when a TTL is configured
    ///
    /// A session whose lock is held by an in-flight answer round is active
    /// by definition and is never expired here.
    pub async fn get(&self, id: &str) -> Result<Arc<Mutex<ConversationSession>>, Error> {
        let session = {
            let sessions = self.sessions.read().await;
            sessions.get(id).cloned()
        }
        .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

        if let Some(ttl) = self.config.session_ttl() {
            if let Ok(guard) = session.try_lock() {
                let idle = Utc::now().signed_duration_since(guard.last_active_at());
                if idle.to_std().map_or(false, |idle| idle > ttl) {
                    drop(guard);
                    self.sessions.write().await.remove(id);
                    info!("expired idle interview session {}", id);
                    return Err(Error::SessionNotFound(id.to_string()));
                }
            }
        }

        Ok(session)
    }

    /// Drop a session; removing an unknown id is a no-op
    pub async fn remove(&self, id: &str) {
        if self.sessions.write().await.remove(id).is_some() {
            info!("cleared interview session {}", id);
        }
    }
}
