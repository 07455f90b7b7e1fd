use std::sync::Arc;

use crate::config::Config;
use crate::experience::ExperienceExtractor;
use crate::matching::JobMatcher;

/// Shared resources built once in `main` and passed into the pipeline.
/// Nothing in here is mutated after construction.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: Arc<ExperienceExtractor>,
    /// Pluggable matcher. Default: SemanticMatcher. Swap via MATCHER_BACKEND.
    pub matcher: Arc<dyn JobMatcher>,
}
