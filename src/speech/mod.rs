//! Live speech transcription
//!
//! This module is the speech half of the interview core:
//! - `SpeechDevice`: fixed-capability trait over a platform recognition engine
//! - `TranscriptAggregator`: merges interim/final recognition events into one
//!   stable, append-only transcript
//! - `RecognitionController`: owns the device lifecycle, restarting it
//!   transparently when continuous listening ends early

mod aggregator;
mod controller;
mod device;

pub use aggregator::{TranscriptAggregator, TranscriptUpdate};
pub use controller::{ListeningState, RecognitionController, RecognitionNotice};
pub use device::{
    DeviceEvent, RecognitionAlternative, RecognitionEvent, RecognitionResult, SpeechDevice,
};
