//! Job matching: pluggable, trait-based matchers that decide whether a job
//! fits a resume.
//!
//! Default: `SemanticMatcher` (embedding cosine similarity, deterministic).
//! Alternative: `LlmMatcher` (prompted chat model), chosen via MATCHER_BACKEND.
//! The two are never blended.
//!
//! `AppState` holds an `Arc<dyn JobMatcher>`, chosen at startup via config.

pub mod embedding;
pub mod llm;
pub mod projection;
pub mod prompts;
pub mod semantic;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::resume::Resume;

pub const INSUFFICIENT_DATA: &str = "insufficient data";

// ────────────────────────────────────────────────────────────────────────────
// Output data model (shared across all matcher backends)
// ────────────────────────────────────────────────────────────────────────────

/// Verdict for one (job, resume) pair.
///
/// Fields are private: `score` is always within [0, 1] and `fit` always
/// equals `score >= threshold` for the threshold it was built with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    fit: bool,
    reasons: Vec<String>,
    score: f32,
}

impl MatchResult {
    /// Clamps `score` into [0, 1] (non-finite becomes 0) and derives `fit`.
    pub fn new(score: f32, threshold: f32, reasons: Vec<String>) -> Self {
        let score = clamp_score(score);
        Self {
            fit: score >= threshold,
            reasons,
            score,
        }
    }

    /// The low-confidence result for empty inputs.
    pub fn insufficient_data() -> Self {
        Self {
            fit: false,
            reasons: vec![INSUFFICIENT_DATA.to_string()],
            score: 0.0,
        }
    }

    pub fn fit(&self) -> bool {
        self.fit
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn score(&self) -> f32 {
        self.score
    }
}

/// `max(0, min(raw, 1))`, with NaN and infinities mapped to 0.
pub fn clamp_score(raw: f32) -> f32 {
    if raw.is_finite() {
        raw.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The matcher trait. Implement this to swap backends without touching the
/// pipeline or its callers.
///
/// Carried in `AppState` as `Arc<dyn JobMatcher>`.
#[async_trait]
pub trait JobMatcher: Send + Sync {
    async fn match_job(&self, job_description: &str, resume: &Resume)
        -> Result<MatchResult, AppError>;

    /// Short label recorded on every match, e.g. "semantic" or "llm".
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_clamped_into_unit_interval() {
        assert_eq!(MatchResult::new(1.0000001, 0.6, vec![]).score(), 1.0);
        assert_eq!(MatchResult::new(-0.3, 0.6, vec![]).score(), 0.0);
        assert_eq!(MatchResult::new(f32::NAN, 0.6, vec![]).score(), 0.0);
        assert_eq!(MatchResult::new(f32::INFINITY, 0.6, vec![]).score(), 0.0);
    }

    #[test]
    fn test_fit_iff_score_at_or_above_threshold() {
        for raw in [-1.0_f32, 0.0, 0.1, 0.59, 0.6, 0.61, 0.99, 1.0, 1.5] {
            let result = MatchResult::new(raw, 0.6, vec![]);
            assert!((0.0..=1.0).contains(&result.score()));
            assert_eq!(result.fit(), result.score() >= 0.6, "raw {raw}");
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(MatchResult::new(0.6, 0.6, vec![]).fit());
        assert!(!MatchResult::new(0.5999, 0.6, vec![]).fit());
    }

    #[test]
    fn test_insufficient_data_result() {
        let result = MatchResult::insufficient_data();
        assert!(!result.fit());
        assert_eq!(result.score(), 0.0);
        assert_eq!(result.reasons(), &[INSUFFICIENT_DATA.to_string()]);
    }

    #[test]
    fn test_match_result_serializes_all_fields() {
        let result = MatchResult::new(0.75, 0.6, vec!["Semantic similarity: 0.75".to_string()]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["fit"], true);
        assert_eq!(json["reasons"][0], "Semantic similarity: 0.75");
        assert!((json["score"].as_f64().unwrap() - 0.75).abs() < 1e-6);
    }
}
