pub mod config;
pub mod cuisine;
pub mod engine;
pub mod fallback;
pub mod inventory;
pub mod localize;
pub mod metrics;
pub mod provider;
pub mod quota;
pub mod scoring;
pub mod search;
pub mod testing;
pub mod translator;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use engine::{
    Difficulty, EngineError, RecipeCandidate, RecommendationEngine, RecommendRequest,
    RecommendResponse,
};
pub use quota::{BudgetKind, QuotaGovernor, UsageSummary};
