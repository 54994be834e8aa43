use std::sync::Arc;
use kondate_core::{Config, QuotaGovernor, RecommendationEngine, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    engine: Arc<RecommendationEngine>,
    quota: Arc<QuotaGovernor>,
}

impl AppState {
    pub fn new(
        config: Config,
        engine: Arc<RecommendationEngine>,
        quota: Arc<QuotaGovernor>,
    ) -> Self {
        Self {
            config,
            engine,
            quota,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn engine(&self) -> &RecommendationEngine {
        self.engine.as_ref()
    }

    pub fn quota(&self) -> &QuotaGovernor {
        self.quota.as_ref()
    }
}
