use anyhow::{Context, Result};
use clap::Parser;
use interview_coach::{AppState, Config, InterviewService, OpenAiGenerator, SessionRegistry};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "interview-coach",
    about = "Mock interview backend: live transcription and resume-grounded answers"
)]
struct Args {
    /// Config file path (without extension)
    #[arg(long, default_value = "config/interview-coach")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Interview Coach v0.1.0");
    info!("Loaded config: {}", cfg.service.name);

    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
    let generator = Arc::new(OpenAiGenerator::new(api_key, cfg.llm.clone()));

    let registry = Arc::new(SessionRegistry::new(cfg.interview.clone()));
    let interview = Arc::new(InterviewService::new(
        Arc::clone(&registry),
        generator,
        &cfg.interview,
    ));

    let app = interview_coach::create_router(AppState::new(registry, interview));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
