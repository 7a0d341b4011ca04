//! One answer round: resolve the session, build the prompt, call the
//! generator under a timeout, record the turn.

use crate::config::InterviewConfig;
use crate::conversation::{SessionRegistry, Turn};
use crate::error::Error;
use crate::llm::AnswerGenerator;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Drives answer rounds against the registry and the generator
///
/// A session accepts one outstanding round at a time: the per-session lock
/// is held from prompt build through turn record, so concurrent questions
/// for the same session serialize. A round that cannot take the lock within
/// the busy-wait bound is rejected with `Error::SessionBusy`.
pub struct InterviewService {
    registry: Arc<SessionRegistry>,
    generator: Arc<dyn AnswerGenerator>,
    busy_wait: Duration,
    generation_timeout: Duration,
}

impl InterviewService {
    pub fn new(
        registry: Arc<SessionRegistry>,
        generator: Arc<dyn AnswerGenerator>,
        config: &InterviewConfig,
    ) -> Self {
        Self {
            registry,
            generator,
            busy_wait: config.busy_wait(),
            generation_timeout: config.generation_timeout(),
        }
    }

    /// Answer one question against a session
    ///
    /// A failed or timed-out generation leaves the turn log untouched, so
    /// the history only ever contains matched question/answer pairs.
    pub async fn answer(&self, session_id: &str, question: &str) -> Result<String, Error> {
        let session = self.registry.get(session_id).await?;

        let mut session = timeout(self.busy_wait, session.lock())
            .await
            .map_err(|_| Error::SessionBusy(session_id.to_string()))?;

        let messages = session.build_prompt(question);
        info!(
            "generating answer for session {} ({} prompt entries)",
            session_id,
            messages.len()
        );

        let answer = match timeout(self.generation_timeout, self.generator.complete(&messages)).await
        {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                warn!("generation failed for session {}: {}", session_id, e);
                return Err(e);
            }
            Err(_) => {
                warn!("generation timed out for session {}", session_id);
                return Err(Error::GenerationTimeout);
            }
        };

        session.record_turn(question, answer.clone());
        Ok(answer)
    }

    /// Completed turns for a session, oldest first
    pub async fn history(&self, session_id: &str) -> Result<Vec<Turn>, Error> {
        let session = self.registry.get(session_id).await?;
        let session = session.lock().await;
        Ok(session.turns().to_vec())
    }
}
