//! Answer generation
//!
//! The language-model provider is a black box behind the `AnswerGenerator`
//! trait: the whole prompt goes in, the answer text comes out. The shipped
//! implementation speaks the OpenAI-compatible chat-completions API.

mod generator;
mod openai;

pub use generator::AnswerGenerator;
pub use openai::OpenAiGenerator;
