use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::filtering::UnknownExperiencePolicy;

pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.6;

/// Which matcher backend scores (job, resume) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherBackend {
    Semantic,
    Llm,
}

impl FromStr for MatcherBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "semantic" | "embedding" => Ok(MatcherBackend::Semantic),
            "llm" => Ok(MatcherBackend::Llm),
            other => bail!("MATCHER_BACKEND must be 'semantic' or 'llm', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub profile_path: PathBuf,
    pub jobs_path: PathBuf,
    pub embedding_url: String,
    pub embedding_model: String,
    pub embedding_timeout_secs: u64,
    pub llm_url: String,
    pub llm_model: String,
    pub matcher_backend: MatcherBackend,
    pub match_threshold: f32,
    pub unknown_experience_policy: UnknownExperiencePolicy,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let match_threshold = optional_env("MATCH_THRESHOLD")
            .map(|v| {
                v.parse::<f32>()
                    .context("MATCH_THRESHOLD must be a number")
            })
            .transpose()?
            .unwrap_or(DEFAULT_MATCH_THRESHOLD);
        validate_threshold(match_threshold)?;

        Ok(Config {
            profile_path: require_env("PROFILE_PATH")?.into(),
            jobs_path: require_env("JOBS_PATH")?.into(),
            embedding_url: optional_env("EMBEDDING_URL")
                .unwrap_or_else(|| "http://localhost:11434".to_string()),
            embedding_model: optional_env("EMBEDDING_MODEL")
                .unwrap_or_else(|| "nomic-embed-text".to_string()),
            embedding_timeout_secs: optional_env("EMBEDDING_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse::<u64>()
                .context("EMBEDDING_TIMEOUT_SECS must be a whole number of seconds")?,
            llm_url: optional_env("LLM_URL")
                .unwrap_or_else(|| "http://localhost:11434".to_string()),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| "llama3.2".to_string()),
            matcher_backend: optional_env("MATCHER_BACKEND")
                .unwrap_or_else(|| "semantic".to_string())
                .parse()?,
            match_threshold,
            unknown_experience_policy: optional_env("UNKNOWN_EXPERIENCE_POLICY")
                .unwrap_or_else(|| "exclude".to_string())
                .parse()?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// The fit threshold is compared against a score clamped to [0, 1]. Zero is
/// rejected too: an empty-input result scores 0 and must not count as a fit.
pub fn validate_threshold(threshold: f32) -> Result<()> {
    if !(threshold > 0.0 && threshold <= 1.0) {
        bail!("MATCH_THRESHOLD must lie in (0, 1], got {threshold}");
    }
    Ok(())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
