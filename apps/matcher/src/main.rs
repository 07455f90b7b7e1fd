mod config;
mod errors;
mod experience;
mod filtering;
mod ingest;
mod llm_client;
mod matching;
mod models;
mod pipeline;
mod state;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, MatcherBackend};
use crate::errors::AppError;
use crate::experience::ExperienceExtractor;
use crate::ingest::ingest_jobs;
use crate::llm_client::LlmClient;
use crate::matching::embedding::OllamaEmbedder;
use crate::matching::llm::LlmMatcher;
use crate::matching::semantic::SemanticMatcher;
use crate::matching::JobMatcher;
use crate::models::user::UserProfile;
use crate::pipeline::run_matching;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging. Logs go to stderr; stdout carries results.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting JobGenie matcher v{}", env!("CARGO_PKG_VERSION"));

    let state = build_state(config)?;

    let profile_path = &state.config.profile_path;
    let profile = load_profile(profile_path)
        .with_context(|| format!("Failed to load profile from {}", profile_path.display()))?;

    let jobs_path = &state.config.jobs_path;
    let rows = load_job_rows(jobs_path)
        .with_context(|| format!("Failed to load jobs from {}", jobs_path.display()))?;

    let jobs = ingest_jobs(&rows, &state.extractor);

    let (matches, summary) = run_matching(
        state.matcher.as_ref(),
        state.config.unknown_experience_policy,
        &profile,
        &jobs,
    )
    .await?;

    info!("Run summary: {summary:?}");
    println!("{}", serde_json::to_string_pretty(&matches)?);

    Ok(())
}

/// Builds every shared resource once. Matchers receive their dependencies
/// here instead of reaching for globals.
fn build_state(config: Config) -> Result<AppState> {
    let extractor = Arc::new(ExperienceExtractor::default());

    let matcher: Arc<dyn JobMatcher> = match config.matcher_backend {
        MatcherBackend::Semantic => {
            let embedder = OllamaEmbedder::new(
                &config.embedding_url,
                config.embedding_model.clone(),
                Duration::from_secs(config.embedding_timeout_secs),
            )
            .map_err(AppError::from)?;
            info!("Embedding client initialized (model: {})", config.embedding_model);
            Arc::new(SemanticMatcher::new(Arc::new(embedder), config.match_threshold)?)
        }
        MatcherBackend::Llm => {
            let llm = LlmClient::new(&config.llm_url, config.llm_model.clone())
                .map_err(AppError::from)?;
            info!("LLM client initialized (model: {})", config.llm_model);
            Arc::new(LlmMatcher::new(llm, config.match_threshold)?)
        }
    };

    info!(
        "Matcher: {} (threshold {:.2}, unknown experience: {:?})",
        matcher.backend(),
        config.match_threshold,
        config.unknown_experience_policy
    );

    Ok(AppState {
        config,
        extractor,
        matcher,
    })
}

fn load_profile(path: &Path) -> Result<UserProfile, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn load_job_rows(path: &Path) -> Result<Value, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let rows: Value = serde_json::from_str(&raw)?;
    if !rows.is_array() {
        return Err(AppError::Validation(format!(
            "{} must contain a JSON array of job rows",
            path.display()
        )));
    }
    Ok(rows)
}
