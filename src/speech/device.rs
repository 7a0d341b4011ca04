use anyhow::Result;
use tokio::sync::mpsc;

/// One candidate transcription for a recognition result
#[derive(Debug, Clone)]
pub struct RecognitionAlternative {
    pub transcript: String,
    /// Confidence score (0.0 to 1.0), if the engine reports one
    pub confidence: Option<f32>,
}

/// One entry in the engine's results buffer
#[derive(Debug, Clone)]
pub struct RecognitionResult {
    /// Candidate transcriptions, best first (only the first is consumed)
    pub alternatives: Vec<RecognitionAlternative>,
    /// Whether the engine may still revise this result
    pub is_final: bool,
}

/// A batch of recognition results delivered by the engine
///
/// Engines re-deliver their whole growing results buffer on every callback;
/// `result_index` marks the first entry that is new for this event.
#[derive(Debug, Clone)]
pub struct RecognitionEvent {
    pub results: Vec<RecognitionResult>,
    pub result_index: usize,
}

/// Events emitted by a speech device, mirroring the platform callbacks
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// The device began listening
    Started,
    /// A batch of recognition results
    Result(RecognitionEvent),
    /// Hard device error (e.g. permission revoked); listening will not resume
    Error(String),
    /// The device stopped on its own (ordinary end of utterance)
    Ended,
}

/// Speech recognition device trait
///
/// The platform engine is wrapped behind this fixed capability set so the
/// controller never touches a loosely-typed native handle, and a scripted
/// implementation can stand in during tests.
#[async_trait::async_trait]
pub trait SpeechDevice: Send + Sync {
    /// Whether the platform offers speech recognition at all
    fn is_supported(&self) -> bool;

    /// Begin listening
    ///
    /// Returns a channel receiver for the device's events. The channel
    /// closes when the device stops, for any reason.
    async fn start(&mut self) -> Result<mpsc::Receiver<DeviceEvent>>;

    /// Stop listening; idempotent
    async fn stop(&mut self) -> Result<()>;

    /// Device name for logging
    fn name(&self) -> &str;
}
