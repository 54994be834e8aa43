use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::cuisine;
use crate::metrics;
use crate::provider::{ProviderError, RawCandidate, RecipeProvider};
use crate::quota::{BudgetKind, QuotaGovernor};

use super::strategy::{ProviderCall, SearchStrategy};

/// Why orchestration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every strategy ran to completion.
    StrategiesExhausted,
    /// Enough raw candidates were collected.
    TargetReached,
    /// The search budget denied the next call.
    QuotaExhausted,
}

/// One failed strategy call, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct StrategyError {
    pub strategy: &'static str,
    pub call: String,
    pub message: String,
}

/// Everything the strategies produced for one ingredient.
#[derive(Debug)]
pub struct SearchOutcome {
    pub candidates: Vec<RawCandidate>,
    pub stop: StopReason,
    pub errors: Vec<StrategyError>,
}

/// Runs the strategy ladder against the provider for one ingredient.
///
/// Calls are sequential with a fixed delay between them. Every call is
/// budget-checked up front and billed only after it succeeds. Provider
/// errors are soft: the failing call contributes zero candidates and
/// the ladder continues.
pub struct SearchOrchestrator {
    provider: Arc<dyn RecipeProvider>,
    quota: Arc<QuotaGovernor>,
    inter_call_delay: Duration,
    safety_multiplier: u32,
}

impl SearchOrchestrator {
    pub fn new(
        provider: Arc<dyn RecipeProvider>,
        quota: Arc<QuotaGovernor>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            provider,
            quota,
            inter_call_delay: Duration::from_millis(config.inter_call_delay_ms),
            safety_multiplier: config.safety_multiplier.max(1),
        }
    }

    /// Run the escalation ladder for one ingredient.
    pub async fn search(
        &self,
        ingredient: &str,
        cuisine: Option<&str>,
        target: usize,
    ) -> SearchOutcome {
        let profile = cuisine::profile_for(cuisine);
        let goal = target.saturating_mul(self.safety_multiplier as usize);
        let mut outcome = SearchOutcome {
            candidates: Vec::new(),
            stop: StopReason::StrategiesExhausted,
            errors: Vec::new(),
        };
        let mut calls_made = 0u32;

        info!(
            ingredient = ingredient,
            cuisine = profile.name,
            goal = goal,
            "Starting recipe search"
        );

        'strategies: for strategy in SearchStrategy::ALL {
            let calls = strategy.build_calls(ingredient, profile);
            if calls.is_empty() {
                debug!(strategy = %strategy, "Strategy has no queries, skipping");
                continue;
            }

            for call in calls {
                if outcome.candidates.len() >= goal {
                    debug!(
                        collected = outcome.candidates.len(),
                        goal = goal,
                        "Collected enough raw candidates, stopping early"
                    );
                    outcome.stop = StopReason::TargetReached;
                    break 'strategies;
                }
                if !self.quota.can_consume(BudgetKind::Search, 1) {
                    warn!(strategy = %strategy, "Search budget exhausted, stopping orchestration");
                    outcome.stop = StopReason::QuotaExhausted;
                    break 'strategies;
                }

                if calls_made > 0 && !self.inter_call_delay.is_zero() {
                    sleep(self.inter_call_delay).await;
                }
                calls_made += 1;

                match self.execute(&call).await {
                    Ok(mut found) => {
                        self.quota.consume(BudgetKind::Search, 1);
                        metrics::SEARCH_CALLS
                            .with_label_values(&[strategy.name(), "success"])
                            .inc();

                        if matches!(call, ProviderCall::ByIngredients { .. }) {
                            found.retain(|c| c.used_ingredient_count >= 1);
                        }
                        for candidate in &mut found {
                            candidate.layer_priority = strategy.layer_priority();
                        }

                        metrics::STRATEGY_RESULTS
                            .with_label_values(&[strategy.name()])
                            .observe(found.len() as f64);
                        debug!(
                            strategy = %strategy,
                            call = %call.describe(),
                            results = found.len(),
                            "Strategy call finished"
                        );
                        outcome.candidates.extend(found);
                    }
                    Err(e) => {
                        metrics::SEARCH_CALLS
                            .with_label_values(&[strategy.name(), "error"])
                            .inc();
                        warn!(
                            strategy = %strategy,
                            call = %call.describe(),
                            error = %e,
                            "Strategy call failed, continuing"
                        );
                        outcome.errors.push(StrategyError {
                            strategy: strategy.name(),
                            call: call.describe(),
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            ingredient = ingredient,
            candidates = outcome.candidates.len(),
            errors = outcome.errors.len(),
            stop = ?outcome.stop,
            "Recipe search finished"
        );
        outcome
    }

    async fn execute(&self, call: &ProviderCall) -> Result<Vec<RawCandidate>, ProviderError> {
        match call {
            ProviderCall::ByIngredients { ingredient } => {
                self.provider.search_by_ingredients(ingredient).await
            }
            ProviderCall::ByQuery { text, cuisine } => {
                self.provider.search_by_query(text, cuisine.as_deref()).await
            }
        }
    }
}
