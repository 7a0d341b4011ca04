// Integration tests for the answer-round driver
//
// A scripted generator stands in for the language-model provider so
// failure, timeout and concurrency behavior can be driven deterministically.

use async_trait::async_trait;
use interview_coach::conversation::{ChatMessage, Role, SessionRegistry};
use interview_coach::llm::AnswerGenerator;
use interview_coach::{Error, InterviewConfig, InterviewService};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const RESUME: &str = "Backend engineer, six years of Go and Rust services.";

/// Echoes the last user message after an optional delay; can be told to fail
struct ScriptedGenerator {
    delay: Duration,
    fail: bool,
    /// Every prompt this generator was called with
    prompts: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl ScriptedGenerator {
    fn answering() -> Self {
        Self {
            delay: Duration::ZERO,
            fail: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::answering()
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::answering()
        }
    }
}

#[async_trait]
impl AnswerGenerator for ScriptedGenerator {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Error> {
        self.prompts.lock().await.push(messages.to_vec());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(Error::Generation("provider unavailable".to_string()));
        }

        let question = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(format!("answer to {}", question))
    }
}

fn service(
    generator: ScriptedGenerator,
    config: InterviewConfig,
) -> (Arc<SessionRegistry>, Arc<InterviewService>) {
    let registry = Arc::new(SessionRegistry::new(config.clone()));
    let interview = Arc::new(InterviewService::new(
        Arc::clone(&registry),
        Arc::new(generator),
        &config,
    ));
    (registry, interview)
}

#[tokio::test]
async fn test_successful_round_records_matched_turn() {
    let (registry, interview) = service(ScriptedGenerator::answering(), InterviewConfig::default());
    let id = registry.create(RESUME).await;

    let answer = interview.answer(&id, "tell me about yourself").await.unwrap();
    assert_eq!(answer, "answer to tell me about yourself");

    let history = interview.history(&id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].question, "tell me about yourself");
    assert_eq!(history[0].answer, answer);
}

#[tokio::test]
async fn test_generator_sees_resume_first_then_question_last() {
    let generator = ScriptedGenerator::answering();
    let prompts = Arc::clone(&generator.prompts);
    let (registry, interview) = service(generator, InterviewConfig::default());
    let id = registry.create(RESUME).await;

    interview.answer(&id, "why Rust").await.unwrap();
    interview.answer(&id, "why not Go").await.unwrap();

    let prompts = prompts.lock().await;
    assert_eq!(prompts.len(), 2);

    let second = &prompts[1];
    assert_eq!(second.len(), 4, "system + first turn pair + new question");
    assert_eq!(second[0].role, Role::System);
    assert!(second[0].content.contains(RESUME));
    assert_eq!(second[1].content, "why Rust");
    assert_eq!(second[2].content, "answer to why Rust");
    assert_eq!(second[3].content, "why not Go");
}

#[tokio::test]
async fn test_failed_generation_leaves_turns_untouched() {
    let (registry, interview) = service(ScriptedGenerator::failing(), InterviewConfig::default());
    let id = registry.create(RESUME).await;

    let err = interview.answer(&id, "anything").await.unwrap_err();
    assert!(matches!(err, Error::Generation(_)));

    let history = interview.history(&id).await.unwrap();
    assert!(history.is_empty(), "a failed round must not append a turn");
}

#[tokio::test]
async fn test_generation_timeout_leaves_turns_untouched() {
    let config = InterviewConfig {
        generation_timeout_ms: 20,
        ..InterviewConfig::default()
    };
    let (registry, interview) = service(
        ScriptedGenerator::slow(Duration::from_millis(500)),
        config,
    );
    let id = registry.create(RESUME).await;

    let err = interview.answer(&id, "anything").await.unwrap_err();
    assert!(matches!(err, Error::GenerationTimeout));

    let history = interview.history(&id).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_unknown_session_fails() {
    let (_registry, interview) = service(ScriptedGenerator::answering(), InterviewConfig::default());

    let err = interview.answer("session-unknown", "anything").await.unwrap_err();
    assert!(matches!(err, Error::SessionNotFound(_)));
}

#[tokio::test]
async fn test_second_round_is_rejected_busy_past_the_wait_bound() {
    let config = InterviewConfig {
        busy_wait_ms: 20,
        ..InterviewConfig::default()
    };
    let (registry, interview) = service(
        ScriptedGenerator::slow(Duration::from_millis(300)),
        config,
    );
    let id = registry.create(RESUME).await;

    let first = {
        let interview = Arc::clone(&interview);
        let id = id.clone();
        tokio::spawn(async move { interview.answer(&id, "first").await })
    };
    // Give the first round time to take the session lock
    tokio::time::sleep(Duration::from_millis(50)).await;

    let err = interview.answer(&id, "second").await.unwrap_err();
    assert!(matches!(err, Error::SessionBusy(_)));

    first.await.unwrap().unwrap();

    let history = interview.history(&id).await.unwrap();
    assert_eq!(history.len(), 1, "the rejected round must not append");
    assert_eq!(history[0].question, "first");
}

#[tokio::test]
async fn test_concurrent_rounds_serialize_into_matched_pairs() {
    let (registry, interview) = service(
        ScriptedGenerator::slow(Duration::from_millis(50)),
        InterviewConfig::default(),
    );
    let id = registry.create(RESUME).await;

    let a = {
        let interview = Arc::clone(&interview);
        let id = id.clone();
        tokio::spawn(async move { interview.answer(&id, "question a").await })
    };
    let b = {
        let interview = Arc::clone(&interview);
        let id = id.clone();
        tokio::spawn(async move { interview.answer(&id, "question b").await })
    };

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    let history = interview.history(&id).await.unwrap();
    assert_eq!(history.len(), 2, "both rounds must commit");
    for turn in &history {
        assert_eq!(
            turn.answer,
            format!("answer to {}", turn.question),
            "turns must stay matched pairs, never interleaved"
        );
    }
}
