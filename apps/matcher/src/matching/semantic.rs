//! SemanticMatcher: embedding cosine similarity thresholded into a fit.
//!
//! Algorithm:
//! 1. Project the resume to text; empty job or projection → insufficient data
//!    (no embedding call).
//! 2. Embed job, then resume, with the same embedder.
//! 3. score = clamp(cosine(job, resume), 0, 1); fit = score ≥ threshold.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::validate_threshold;
use crate::errors::AppError;
use crate::matching::embedding::{cosine_similarity, Embedder};
use crate::matching::projection::resume_projection;
use crate::matching::{clamp_score, JobMatcher, MatchResult};
use crate::models::resume::Resume;

pub struct SemanticMatcher {
    embedder: Arc<dyn Embedder>,
    threshold: f32,
}

impl SemanticMatcher {
    pub fn new(embedder: Arc<dyn Embedder>, threshold: f32) -> Result<Self, AppError> {
        validate_threshold(threshold).map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(Self {
            embedder,
            threshold,
        })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Scores a job description against already-projected resume text.
    pub async fn match_text(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<MatchResult, AppError> {
        let job_description = job_description.trim();
        let resume_text = resume_text.trim();

        if job_description.is_empty() || resume_text.is_empty() {
            debug!("Skipping embedding: empty job description or resume text");
            return Ok(MatchResult::insufficient_data());
        }

        let job_vector = self.embedder.embed(job_description).await?;
        let resume_vector = self.embedder.embed(resume_text).await?;
        let raw = cosine_similarity(&job_vector, &resume_vector)?;
        debug!("Cosine similarity {raw:.4} with {}", self.embedder.model());

        Ok(build_result(raw, self.threshold))
    }
}

#[async_trait]
impl JobMatcher for SemanticMatcher {
    async fn match_job(
        &self,
        job_description: &str,
        resume: &Resume,
    ) -> Result<MatchResult, AppError> {
        self.match_text(job_description, &resume_projection(resume)).await
    }

    fn backend(&self) -> &'static str {
        "semantic"
    }
}

fn build_result(raw: f32, threshold: f32) -> MatchResult {
    let mut reasons = vec![format!("Semantic similarity: {raw:.2}")];
    if clamp_score(raw) < threshold {
        reasons.push(format!(
            "Similarity is below the fit threshold of {threshold:.2}."
        ));
    }
    MatchResult::new(raw, threshold, reasons)
}
