use std::sync::Arc;

use crate::config::Config;
use crate::matching::MatchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once from the configured vocabulary; read-only afterwards.
    pub engine: Arc<MatchEngine>,
}
