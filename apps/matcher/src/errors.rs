use thiserror::Error;

use crate::llm_client::LlmError;
use crate::matching::embedding::EmbeddingError;

/// Application-level error type.
///
/// Experience extraction never produces one of these, and matching only does
/// when a dependency (embedding backend, LLM) fails.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Embedding backend unavailable: {0}")]
    EmbeddingUnavailable(#[from] EmbeddingError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the failure came from an external model dependency. The
    /// pipeline skips the job on these and keeps going.
    pub fn is_dependency_failure(&self) -> bool {
        matches!(self, AppError::EmbeddingUnavailable(_) | AppError::Llm(_))
    }
}
