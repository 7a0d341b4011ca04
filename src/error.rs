use thiserror::Error;

/// Errors surfaced by the interview core
#[derive(Debug, Error)]
pub enum Error {
    /// The platform offers no speech-recognition capability
    #[error("speech recognition is not supported on this platform")]
    Unsupported,

    /// The device refused to begin a listening span
    #[error("speech device failed to start: {0}")]
    DeviceStart(String),

    /// Continuous-mode auto-restart failed; listening fell back to idle
    #[error("failed to restart speech recognition: {0}")]
    RestartFailed(String),

    #[error("session {0} not found or expired")]
    SessionNotFound(String),

    /// The session already has an answer round in flight
    #[error("session {0} is busy with another question")]
    SessionBusy(String),

    #[error("answer generation failed: {0}")]
    Generation(String),

    #[error("answer generation timed out")]
    GenerationTimeout,

    /// Resume text rejected at the ingestion boundary
    #[error("invalid resume: {0}")]
    InvalidResume(String),
}
