pub mod config;
pub mod conversation;
pub mod error;
pub mod http;
pub mod interview;
pub mod llm;
pub mod speech;

pub use config::{Config, InterviewConfig, LlmConfig};
pub use conversation::{ChatMessage, ConversationSession, Role, SessionRegistry, Turn};
pub use error::Error;
pub use http::{create_router, AppState};
pub use interview::InterviewService;
pub use llm::{AnswerGenerator, OpenAiGenerator};
pub use speech::{
    DeviceEvent, ListeningState, RecognitionController, RecognitionEvent, RecognitionNotice,
    SpeechDevice, TranscriptAggregator,
};
