// Tests for conversation sessions and the session registry

use interview_coach::conversation::{ConversationSession, Role, SessionRegistry};
use interview_coach::{Error, InterviewConfig};
use std::time::Duration;

const RESUME: &str = "Senior platform engineer, eight years of Rust and distributed systems.";

#[test]
fn test_build_prompt_orders_resume_history_question() {
    let mut session = ConversationSession::new("session-1", RESUME, 20);
    session.record_turn("q1", "a1");
    session.record_turn("q2", "a2");

    let prompt = session.build_prompt("q3");

    assert_eq!(prompt.len(), 6, "1 system + 2 turns * 2 + 1 question");

    assert_eq!(prompt[0].role, Role::System);
    assert!(prompt[0].content.contains(RESUME), "resume must lead the prompt");

    assert_eq!(prompt[1].role, Role::User);
    assert_eq!(prompt[1].content, "q1");
    assert_eq!(prompt[2].role, Role::Assistant);
    assert_eq!(prompt[2].content, "a1");
    assert_eq!(prompt[3].role, Role::User);
    assert_eq!(prompt[3].content, "q2");
    assert_eq!(prompt[4].role, Role::Assistant);
    assert_eq!(prompt[4].content, "a2");

    assert_eq!(prompt[5].role, Role::User);
    assert_eq!(prompt[5].content, "q3");
}

#[test]
fn test_build_prompt_windows_oldest_turns_out() {
    let mut session = ConversationSession::new("session-1", RESUME, 2);
    session.record_turn("q1", "a1");
    session.record_turn("q2", "a2");
    session.record_turn("q3", "a3");

    let prompt = session.build_prompt("q4");

    assert_eq!(prompt.len(), 6, "1 system + windowed 2 turns * 2 + 1 question");
    assert_eq!(prompt[1].content, "q2", "oldest turn must be dropped first");
    assert_eq!(prompt[3].content, "q3");
    assert_eq!(prompt[5].content, "q4");

    // The stored log itself is not truncated
    assert_eq!(session.turns().len(), 3);
}

#[test]
fn test_record_turn_appends_matched_pair() {
    let mut session = ConversationSession::new("session-1", RESUME, 20);
    let before = session.last_active_at();

    session.record_turn("what is ownership", "it is how Rust tracks who frees what");

    assert_eq!(session.turns().len(), 1);
    let turn = &session.turns()[0];
    assert_eq!(turn.question, "what is ownership");
    assert_eq!(turn.answer, "it is how Rust tracks who frees what");
    assert!(session.last_active_at() >= before);
}

#[tokio::test]
async fn test_registry_create_and_get() {
    let registry = SessionRegistry::new(InterviewConfig::default());

    let id = registry.create(RESUME).await;
    assert!(id.starts_with("session-"));

    let session = registry.get(&id).await.unwrap();
    let session = session.lock().await;
    assert_eq!(session.id(), id);
    assert_eq!(session.resume_context(), RESUME);
    assert!(session.turns().is_empty());
}

#[tokio::test]
async fn test_session_ids_are_unique() {
    let registry = SessionRegistry::new(InterviewConfig::default());

    let first = registry.create(RESUME).await;
    let second = registry.create(RESUME).await;

    assert_ne!(first, second);
    assert!(registry.get(&first).await.is_ok());
    assert!(registry.get(&second).await.is_ok());
}

#[tokio::test]
async fn test_get_unknown_session_fails_every_time() {
    let registry = SessionRegistry::new(InterviewConfig::default());

    for _ in 0..2 {
        let err = registry.get("session-never-created").await.unwrap_err();
        assert!(matches!(err, Error::SessionNotFound(_)));
    }
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let registry = SessionRegistry::new(InterviewConfig::default());
    let id = registry.create(RESUME).await;

    registry.remove(&id).await;
    registry.remove(&id).await;

    let err = registry.get(&id).await.unwrap_err();
    assert!(matches!(err, Error::SessionNotFound(_)));
}

#[tokio::test]
async fn test_idle_session_expires_lazily_on_get() {
    let config = InterviewConfig {
        session_ttl_secs: Some(0),
        ..InterviewConfig::default()
    };
    let registry = SessionRegistry::new(config);
    let id = registry.create(RESUME).await;

    tokio::time::sleep(Duration::from_millis(20)).await;

    let err = registry.get(&id).await.unwrap_err();
    assert!(matches!(err, Error::SessionNotFound(_)));

    // The entry is gone, not just hidden
    let err = registry.get(&id).await.unwrap_err();
    assert!(matches!(err, Error::SessionNotFound(_)));
}

#[tokio::test]
async fn test_fresh_session_survives_ttl_check() {
    let config = InterviewConfig {
        session_ttl_secs: Some(3600),
        ..InterviewConfig::default()
    };
    let registry = SessionRegistry::new(config);
    let id = registry.create(RESUME).await;

    assert!(registry.get(&id).await.is_ok());
}

#[tokio::test]
async fn test_locked_session_is_never_expired() {
    let config = InterviewConfig {
        session_ttl_secs: Some(1),
        ..InterviewConfig::default()
    };
    let registry = SessionRegistry::new(config);
    let id = registry.create(RESUME).await;

    // An in-flight answer round holds the session lock
    let session = registry.get(&id).await.unwrap();
    let _guard = session.lock().await;

    tokio::time::sleep(Duration::from_millis(1100)).await;

    // Idle time exceeds the TTL, but the round in flight keeps it alive
    assert!(registry.get(&id).await.is_ok());
}
