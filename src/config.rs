use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub interview: InterviewConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Runtime knobs for session bookkeeping and answer rounds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterviewConfig {
    /// Most recent turns included when building a prompt (older turns stay
    /// in the stored history but are not sent to the generator)
    pub max_history_turns: usize,

    /// Idle seconds before a session is lazily expired on lookup
    /// (absent = sessions never expire)
    pub session_ttl_secs: Option<u64>,

    /// How long a question may wait for an in-flight round on the same
    /// session before being rejected as busy
    pub busy_wait_ms: u64,

    /// Upper bound on one answer-generation call
    pub generation_timeout_ms: u64,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            max_history_turns: 20,
            session_ttl_secs: None,
            busy_wait_ms: 5000,
            generation_timeout_ms: 30_000,
        }
    }
}

impl InterviewConfig {
    pub fn session_ttl(&self) -> Option<Duration> {
        self.session_ttl_secs.map(Duration::from_secs)
    }

    pub fn busy_wait(&self) -> Duration {
        Duration::from_millis(self.busy_wait_ms)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }
}

/// Provider and sampling parameters for the answer generator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.8,
            max_tokens: 500,
            presence_penalty: 0.6,
            frequency_penalty: 0.4,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
