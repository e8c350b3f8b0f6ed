use std::sync::Arc;

use crate::matching::engine::MatchConfig;
use crate::matching::repository::MatchRepository;
use crate::matching::taxonomy::SkillTaxonomy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Résumé/job storage. Default: `PgMatchRepository`.
    pub repository: Arc<dyn MatchRepository>,
    /// Built once at startup, never mutated.
    pub taxonomy: Arc<SkillTaxonomy>,
    pub match_config: MatchConfig,
}
