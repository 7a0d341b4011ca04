use crate::conversation::ChatMessage;
use crate::error::Error;

/// Answer generation backend trait
///
/// `complete` is one opaque round trip. Transport and provider failures
/// surface as `Error::Generation`; the caller owns retry policy and the
/// timeout around the call.
#[async_trait::async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Error>;
}
