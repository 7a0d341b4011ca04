use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of one prompt entry, in the chat-completions wire shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One prompt entry sent to the answer generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One completed question/answer exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

/// Persona and style instructions; the resume is appended below them
const PERSONA_PROMPT: &str = "You are the candidate in a live mock interview, answering a \
recruiter's questions in the first person. Ground every answer in the resume below. Keep \
answers short and conversational, as if speaking face to face. Prefer concrete examples \
from your own experience over textbook definitions, and avoid heavy vocabulary and \
dramatic phrasing.";

/// Conversational state for one interview session
///
/// Owned exclusively by the `SessionRegistry`; callers hold only the id.
/// `turns` contains matched question/answer pairs and nothing else: a pair
/// is appended only after a generation round succeeds.
#[derive(Debug)]
pub struct ConversationSession {
    id: String,
    resume_context: String,
    turns: Vec<Turn>,
    last_active_at: DateTime<Utc>,
    max_history_turns: usize,
}

impl ConversationSession {
    pub fn new(
        id: impl Into<String>,
        resume_context: impl Into<String>,
        max_history_turns: usize,
    ) -> Self {
        Self {
            id: id.into(),
            resume_context: resume_context.into(),
            turns: Vec::new(),
            last_active_at: Utc::now(),
            max_history_turns,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn resume_context(&self) -> &str {
        &self.resume_context
    }

    /// Completed turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }

    /// Build the prompt for one question
    ///
    /// The generator must see the resume first, then the turn history in
    /// chronological order, then the new question; answers drift between
    /// turns otherwise. History sent to the generator is windowed to the
    /// most recent `max_history_turns` turns; the stored log is not
    /// truncated.
    pub fn build_prompt(&self, question: &str) -> Vec<ChatMessage> {
        let window_start = self.turns.len().saturating_sub(self.max_history_turns);
        let window = &self.turns[window_start..];

        let mut messages = Vec::with_capacity(2 + 2 * window.len());
        messages.push(ChatMessage::system(format!(
            "{}\n\nResume:\n{}",
            PERSONA_PROMPT, self.resume_context
        )));
        for turn in window {
            messages.push(ChatMessage::user(turn.question.clone()));
            messages.push(ChatMessage::assistant(turn.answer.clone()));
        }
        messages.push(ChatMessage::user(question));

        messages
    }

    /// Record one completed exchange; call only after generation succeeded
    pub fn record_turn(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(Turn {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        });
        self.last_active_at = Utc::now();
    }
}
