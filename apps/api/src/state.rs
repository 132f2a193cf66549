use std::sync::Arc;

use crate::matching::extractor::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable extractor. Default: EmsiSkillExtractor, which owns the cached API token.
    pub extractor: Arc<dyn SkillExtractor>,
}
