//! LlmMatcher: asks a chat model for a fit verdict.
//!
//! Non-deterministic and dependent on an external generative model, so it is
//! a separate backend, never blended with `SemanticMatcher`. The model's
//! score is clamped and `fit` re-derived from the configured threshold.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::validate_threshold;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::projection::resume_projection;
use crate::matching::prompts::{build_match_prompt, match_system};
use crate::matching::{JobMatcher, MatchResult};
use crate::models::resume::Resume;

/// Raw reply shape requested from the model.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmVerdict {
    pub fit: VerdictFit,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub score: f32,
}

/// Models answer "Yes"/"No" as asked, or sometimes a bare boolean.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VerdictFit {
    Flag(bool),
    Word(String),
}

impl VerdictFit {
    pub fn is_yes(&self) -> bool {
        match self {
            VerdictFit::Flag(flag) => *flag,
            VerdictFit::Word(word) => {
                matches!(word.trim().to_ascii_lowercase().as_str(), "yes" | "true")
            }
        }
    }
}

pub struct LlmMatcher {
    llm: LlmClient,
    threshold: f32,
}

impl LlmMatcher {
    pub fn new(llm: LlmClient, threshold: f32) -> Result<Self, AppError> {
        validate_threshold(threshold).map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(Self { llm, threshold })
    }
}

#[async_trait]
impl JobMatcher for LlmMatcher {
    async fn match_job(
        &self,
        job_description: &str,
        resume: &Resume,
    ) -> Result<MatchResult, AppError> {
        if job_description.trim().is_empty() || resume_projection(resume).trim().is_empty() {
            return Ok(MatchResult::insufficient_data());
        }

        let resume_json = serde_json::to_string(resume)?;
        let prompt = build_match_prompt(job_description.trim(), &resume_json);

        let verdict: LlmVerdict = self.llm.call_json(&prompt, &match_system()).await?;
        debug!(
            "LLM verdict from {}: fit={}, score={}",
            self.llm.model(),
            verdict.fit.is_yes(),
            verdict.score
        );

        Ok(verdict_to_result(verdict, self.threshold))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Normalizes a model verdict into a `MatchResult`. A "Yes" below the
/// threshold (or a "No" above it) keeps the model's reasons and gets a note.
pub fn verdict_to_result(verdict: LlmVerdict, threshold: f32) -> MatchResult {
    let model_says_fit = verdict.fit.is_yes();
    let mut reasons: Vec<String> = verdict
        .reasons
        .into_iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();

    let result = MatchResult::new(verdict.score, threshold, Vec::new());
    if result.fit() != model_says_fit {
        let said = if model_says_fit { "Yes" } else { "No" };
        reasons.push(format!(
            "Model verdict '{said}' overridden: score {:.2} vs threshold {threshold:.2}.",
            result.score()
        ));
    }

    MatchResult::new(verdict.score, threshold, reasons)
}
