//! The recommendation pipeline.
//!
//! Wires the selector, search orchestrator, merger, scorer, and localizer
//! together behind a single entry point. A request always produces a
//! response: whenever any stage comes up empty the pipeline short-circuits
//! to synthesized fallback recipes instead of failing.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::fallback::{FallbackGenerator, FallbackReason};
use crate::inventory::{IngredientSelector, SelectorOptions};
use crate::localize::{excerpt, Localizer, TranslationCache};
use crate::metrics;
use crate::provider::{RecipeDetail, RecipeProvider};
use crate::quota::{BudgetKind, QuotaGovernor, UsageSummary};
use crate::scoring::{RelevanceScorer, ScoredCandidate};
use crate::search::{merge_candidates, SearchOrchestrator, SearchStrategy, StopReason};
use crate::translator::Translator;

use super::types::{
    Difficulty, EngineError, RecipeCandidate, RecommendRequest, RecommendResponse,
};

/// Display length of the localized instructions excerpt.
const INSTRUCTIONS_EXCERPT_CHARS: usize = 240;

/// The recommendation engine.
///
/// Shared across requests; all interior state (budgets, translation cache)
/// is synchronized, so concurrent `recommend` calls observe one process-wide
/// spend.
pub struct RecommendationEngine {
    provider: Arc<dyn RecipeProvider>,
    quota: Arc<QuotaGovernor>,
    selector: IngredientSelector,
    orchestrator: SearchOrchestrator,
    scorer: RelevanceScorer,
    localizer: Localizer,
    fallback: FallbackGenerator,
    max_results: usize,
    max_ingredients: usize,
    days_left_threshold: i32,
}

impl RecommendationEngine {
    /// Create a new engine from the loaded configuration.
    ///
    /// `translator` may be absent; localization then degrades to the
    /// built-in dictionary without ever spending translation budget.
    pub fn new(
        provider: Arc<dyn RecipeProvider>,
        translator: Option<Arc<dyn Translator>>,
        quota: Arc<QuotaGovernor>,
        config: &Config,
    ) -> Self {
        let cache = Arc::new(TranslationCache::new(
            config.engine.translation_cache_capacity,
        ));
        let localizer = Localizer::new(
            translator,
            cache,
            Arc::clone(&quota),
            config.translator.as_ref(),
        );
        let orchestrator =
            SearchOrchestrator::new(Arc::clone(&provider), Arc::clone(&quota), &config.engine);

        Self {
            provider,
            quota,
            selector: IngredientSelector::new(),
            orchestrator,
            scorer: RelevanceScorer::new(),
            localizer,
            fallback: FallbackGenerator::new(),
            max_results: config.engine.max_results,
            max_ingredients: config.engine.max_ingredients,
            days_left_threshold: config.engine.days_left_threshold,
        }
    }

    /// Serve one recommendation request.
    ///
    /// Never fails: empty selection, an exhausted search budget, and
    /// zero upstream results all degrade to fallback recipes.
    pub async fn recommend(&self, request: RecommendRequest) -> RecommendResponse {
        let started = Instant::now();
        let request_id = Uuid::new_v4().to_string();
        let cuisine = request.cuisine.as_deref();

        info!(
            request_id = %request_id,
            ingredients = request.ingredients.len(),
            cuisine = ?cuisine,
            "recommendation request"
        );

        let options = SelectorOptions {
            exclude_list: request.exclude_list.clone(),
            priority_list: request.priority_list.clone(),
            max_ingredients: self.max_ingredients,
            days_left_threshold: self.days_left_threshold,
        };
        let shortlist = self.selector.select(&request.ingredients, &options);
        let Some(best) = shortlist.first() else {
            return self.fallback_response(
                request_id,
                None,
                cuisine,
                FallbackReason::NoIngredientSelected,
                started,
            );
        };

        let max_results = request.max_results.unwrap_or(self.max_results).max(1);
        let outcome = self
            .orchestrator
            .search(best.name(), cuisine, max_results)
            .await;

        if outcome.candidates.is_empty() {
            let reason = match outcome.stop {
                StopReason::QuotaExhausted => FallbackReason::QuotaExhausted,
                _ => FallbackReason::NoUpstreamResults,
            };
            return self.fallback_response(request_id, Some(best.name()), cuisine, reason, started);
        }

        let merged = merge_candidates(outcome.candidates);
        let pantry: Vec<String> = request.ingredients.iter().map(|i| i.name.clone()).collect();
        let profile = crate::cuisine::profile_for(cuisine);
        let mut ranked = self.scorer.score_and_rank(merged, best.name(), &pantry, profile);
        ranked.truncate(max_results);

        let mut candidates = Vec::with_capacity(ranked.len());
        for scored in ranked {
            debug!(
                request_id = %request_id,
                recipe_id = scored.candidate.id,
                score = scored.score,
                reason = %scored.reason,
                "ranked candidate"
            );
            candidates.push(self.build_candidate(scored).await);
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        metrics::RECOMMENDATIONS.with_label_values(&["ok"]).inc();
        metrics::RECOMMENDATION_DURATION
            .with_label_values(&["ok"])
            .observe(started.elapsed().as_secs_f64());
        metrics::CANDIDATES_RETURNED.observe(candidates.len() as f64);
        info!(
            request_id = %request_id,
            candidates = candidates.len(),
            duration_ms = duration_ms,
            "recommendation finished"
        );

        RecommendResponse {
            request_id,
            candidates,
            usage: self.quota.usage(),
            fallback_reason: None,
            duration_ms,
            generated_at: Utc::now(),
        }
    }

    /// Look up one recipe by its textual id and localize it for display.
    ///
    /// Unlike the per-candidate enrichment inside `recommend`, a failure
    /// here is surfaced to the caller: a direct lookup has no fallback.
    pub async fn recipe_detail(&self, id: &str) -> Result<RecipeCandidate, EngineError> {
        let numeric: u64 = id
            .trim()
            .parse()
            .map_err(|_| EngineError::InvalidIdentifier(id.to_string()))?;

        if !self.quota.can_consume(BudgetKind::Search, 1) {
            return Err(EngineError::QuotaExhausted);
        }

        match self.provider.recipe_detail(numeric).await {
            Ok(detail) => {
                self.quota.consume(BudgetKind::Search, 1);
                metrics::DETAIL_LOOKUPS.with_label_values(&["success"]).inc();
                Ok(self.candidate_from_detail(detail).await)
            }
            Err(e) => {
                metrics::DETAIL_LOOKUPS.with_label_values(&["error"]).inc();
                Err(EngineError::Provider(e))
            }
        }
    }

    /// Current spend on both budgets.
    pub fn usage(&self) -> UsageSummary {
        self.quota.usage()
    }

    /// Enrich one ranked candidate with provider detail and localize its
    /// display text.
    async fn build_candidate(&self, scored: ScoredCandidate) -> RecipeCandidate {
        let detail = self.fetch_detail(scored.candidate.id).await;
        let raw = scored.candidate;

        let original_title = match &detail {
            Some(d) if !d.title.trim().is_empty() => d.title.clone(),
            _ => raw.title.clone(),
        };
        let ingredient_lines: Vec<String> = match &detail {
            Some(d) if !d.extended_ingredients.is_empty() => d.extended_ingredients.clone(),
            _ => raw.ingredients.clone(),
        };
        let instructions: Option<String> = detail
            .as_ref()
            .and_then(|d| d.instructions.clone())
            .or_else(|| raw.instructions.clone())
            .filter(|text| !text.trim().is_empty());

        let estimated_time = detail.as_ref().and_then(|d| d.ready_in_minutes);
        let category = detail.as_ref().and_then(|d| d.dish_types.first().cloned());
        let difficulty = estimate_difficulty(&ingredient_lines, instructions.as_deref());

        let display = self
            .localize_display(&original_title, &ingredient_lines, instructions.as_deref())
            .await;

        RecipeCandidate {
            id: raw.id,
            localized_title: display.localized_title,
            original_title,
            ingredient_list: display.ingredient_list,
            estimated_time,
            estimated_difficulty: difficulty,
            category,
            instructions_excerpt: display.instructions_excerpt,
            relevance_score: scored.score,
            source_strategy: strategy_name(raw.layer_priority).to_string(),
            is_fallback: false,
            fully_translated: display.fully_translated,
        }
    }

    /// Shape one provider detail record for display, outside any ranking.
    async fn candidate_from_detail(&self, detail: RecipeDetail) -> RecipeCandidate {
        let instructions = detail.instructions.filter(|text| !text.trim().is_empty());
        let difficulty = estimate_difficulty(&detail.extended_ingredients, instructions.as_deref());

        let display = self
            .localize_display(&detail.title, &detail.extended_ingredients, instructions.as_deref())
            .await;

        RecipeCandidate {
            id: detail.id,
            localized_title: display.localized_title,
            original_title: detail.title,
            ingredient_list: display.ingredient_list,
            estimated_time: detail.ready_in_minutes,
            estimated_difficulty: difficulty,
            category: detail.dish_types.first().cloned(),
            instructions_excerpt: display.instructions_excerpt,
            relevance_score: 0.0,
            source_strategy: "lookup".to_string(),
            is_fallback: false,
            fully_translated: display.fully_translated,
        }
    }

    /// Localize the three display fields, tracking whether any of them
    /// had to degrade to word-by-word substitution.
    async fn localize_display(
        &self,
        title: &str,
        ingredient_lines: &[String],
        instructions: Option<&str>,
    ) -> DisplayText {
        let localized_title = self.localizer.localize(title).await;
        let mut fully_translated = localized_title.fully_translated;

        let mut ingredient_list = Vec::with_capacity(ingredient_lines.len());
        for line in ingredient_lines {
            let localized = self.localizer.localize(line).await;
            fully_translated &= localized.fully_translated;
            ingredient_list.push(localized.text);
        }

        let instructions_excerpt = match instructions {
            Some(text) => {
                let localized = self
                    .localizer
                    .localize(&excerpt(text, INSTRUCTIONS_EXCERPT_CHARS))
                    .await;
                fully_translated &= localized.fully_translated;
                Some(localized.text)
            }
            None => None,
        };

        DisplayText {
            localized_title: localized_title.text,
            ingredient_list,
            instructions_excerpt,
            fully_translated,
        }
    }

    /// Budget-gated detail lookup; failures degrade to the raw record.
    async fn fetch_detail(&self, id: u64) -> Option<RecipeDetail> {
        if !self.quota.can_consume(BudgetKind::Search, 1) {
            metrics::DETAIL_LOOKUPS.with_label_values(&["skipped"]).inc();
            debug!(id = id, "skipping detail lookup, search budget too low");
            return None;
        }

        match self.provider.recipe_detail(id).await {
            Ok(detail) => {
                self.quota.consume(BudgetKind::Search, 1);
                metrics::DETAIL_LOOKUPS.with_label_values(&["success"]).inc();
                Some(detail)
            }
            Err(e) => {
                metrics::DETAIL_LOOKUPS.with_label_values(&["error"]).inc();
                warn!(id = id, error = %e, "detail lookup failed, keeping raw record");
                None
            }
        }
    }

    fn fallback_response(
        &self,
        request_id: String,
        ingredient: Option<&str>,
        cuisine: Option<&str>,
        reason: FallbackReason,
        started: Instant,
    ) -> RecommendResponse {
        let candidates = self.fallback.generate(ingredient, cuisine, reason);

        let duration_ms = started.elapsed().as_millis() as u64;
        metrics::RECOMMENDATIONS
            .with_label_values(&["fallback"])
            .inc();
        metrics::RECOMMENDATION_DURATION
            .with_label_values(&["fallback"])
            .observe(started.elapsed().as_secs_f64());
        metrics::CANDIDATES_RETURNED.observe(candidates.len() as f64);
        warn!(
            request_id = %request_id,
            reason = %reason,
            "falling back to synthesized recipes"
        );

        RecommendResponse {
            request_id,
            candidates,
            usage: self.quota.usage(),
            fallback_reason: Some(reason.to_string()),
            duration_ms,
            generated_at: Utc::now(),
        }
    }
}

/// Localized display fields shared by ranked candidates and direct lookups.
struct DisplayText {
    localized_title: String,
    ingredient_list: Vec<String>,
    instructions_excerpt: Option<String>,
    fully_translated: bool,
}

/// Name of the search layer a candidate came from.
fn strategy_name(layer_priority: u8) -> &'static str {
    SearchStrategy::ALL
        .iter()
        .find(|s| s.layer_priority() == layer_priority)
        .map(|s| s.name())
        .unwrap_or("unknown")
}

/// Difficulty from whatever recipe text is on hand. With neither an
/// ingredient list nor instructions there is nothing to estimate from,
/// so the middle bucket is reported.
fn estimate_difficulty(ingredient_lines: &[String], instructions: Option<&str>) -> Difficulty {
    if ingredient_lines.is_empty() && instructions.is_none() {
        return Difficulty::Medium;
    }
    Difficulty::estimate(
        ingredient_lines.len(),
        instructions.map(count_steps).unwrap_or(0),
    )
}

/// Rough step count for the difficulty estimate.
fn count_steps(instructions: &str) -> usize {
    instructions
        .split(['.', '!', '?', '。', '\n'])
        .filter(|part| !part.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;
    use crate::provider::ProviderError;
    use crate::testing::{fixtures, MockProvider, MockTranslator};

    fn test_config() -> Config {
        load_config_from_str(
            r#"
            [provider]
            api_key = "test-key"

            [translator]
            api_key = "test-key"

            [engine]
            inter_call_delay_ms = 0
            "#,
        )
        .unwrap()
    }

    fn make_engine(
        provider: &Arc<MockProvider>,
        translator: Option<&Arc<MockTranslator>>,
        search_limit: u64,
        translation_limit: u64,
    ) -> (RecommendationEngine, Arc<QuotaGovernor>) {
        let quota = Arc::new(QuotaGovernor::new(search_limit, translation_limit));
        let translator =
            translator.map(|t| Arc::clone(t) as Arc<dyn Translator>);
        let engine = RecommendationEngine::new(
            Arc::clone(provider) as Arc<dyn RecipeProvider>,
            translator,
            Arc::clone(&quota),
            &test_config(),
        );
        (engine, quota)
    }

    fn pantry_request(names: &[&str]) -> RecommendRequest {
        RecommendRequest {
            ingredients: names.iter().map(|n| fixtures::ingredient(n)).collect(),
            cuisine: None,
            exclude_list: Vec::new(),
            priority_list: Vec::new(),
            max_results: None,
        }
    }

    #[tokio::test]
    async fn test_recommend_happy_path() {
        let provider = Arc::new(MockProvider::new());
        provider
            .set_results(vec![
                fixtures::raw_candidate(1, "Cabbage Stir Fry"),
                fixtures::raw_candidate(2, "Cabbage Soup"),
                fixtures::raw_candidate(3, "Cabbage Salad"),
            ])
            .await;
        provider
            .set_detail(fixtures::recipe_detail(1, "Cabbage Stir Fry Supreme"))
            .await;
        let translator = Arc::new(MockTranslator::new());
        let (engine, _quota) = make_engine(&provider, Some(&translator), 100, 500_000);

        let mut request = pantry_request(&["cabbage"]);
        request.max_results = Some(1);
        let response = engine.recommend(request).await;

        assert_eq!(response.candidates.len(), 1);
        assert!(response.fallback_reason.is_none());

        let candidate = &response.candidates[0];
        assert_eq!(candidate.id, 1);
        assert!(!candidate.is_fallback);
        assert!(candidate.fully_translated);
        assert_eq!(candidate.original_title, "Cabbage Stir Fry Supreme");
        assert_eq!(candidate.localized_title, "訳:Cabbage Stir Fry Supreme");
        assert_eq!(candidate.estimated_time, Some(25));
        assert_eq!(candidate.category.as_deref(), Some("main course"));
        assert_eq!(candidate.source_strategy, "direct");
        assert!(candidate.relevance_score > 0.0);
        assert!(candidate.instructions_excerpt.is_some());

        // One search call plus one successful detail lookup
        assert_eq!(response.usage.search_used, 2);
        assert!(response.usage.translation_used > 0);
    }

    #[tokio::test]
    async fn test_recommend_empty_pantry_falls_back() {
        let provider = Arc::new(MockProvider::new());
        let (engine, _quota) = make_engine(&provider, None, 100, 500_000);

        let response = engine.recommend(pantry_request(&[])).await;

        assert_eq!(response.candidates.len(), 3);
        assert!(response.candidates.iter().all(|c| c.is_fallback));
        assert_eq!(
            response.fallback_reason.as_deref(),
            Some("no ingredient selected")
        );
        assert_eq!(response.usage.search_used, 0);
        assert_eq!(provider.search_call_count().await, 0);
    }

    #[tokio::test]
    async fn test_recommend_quota_exhausted_falls_back() {
        let provider = Arc::new(MockProvider::new());
        provider
            .set_results(vec![fixtures::raw_candidate(1, "Cabbage Stir Fry")])
            .await;
        let (engine, _quota) = make_engine(&provider, None, 0, 500_000);

        let response = engine.recommend(pantry_request(&["cabbage"])).await;

        assert!(response.candidates.iter().all(|c| c.is_fallback));
        assert_eq!(response.fallback_reason.as_deref(), Some("quota exhausted"));
        assert!(response.candidates[0]
            .original_title
            .to_lowercase()
            .contains("cabbage"));
        assert_eq!(response.usage.search_used, 0);
        assert!(
            provider.recorded_calls().await.is_empty(),
            "Expected no provider calls with an exhausted budget, got {:?}",
            provider.recorded_calls().await
        );
    }

    #[tokio::test]
    async fn test_recommend_no_results_falls_back() {
        let provider = Arc::new(MockProvider::new());
        let (engine, _quota) = make_engine(&provider, None, 100, 500_000);

        let mut request = pantry_request(&["cabbage"]);
        request.cuisine = Some("korean".to_string());
        let response = engine.recommend(request).await;

        assert!(response.candidates.iter().all(|c| c.is_fallback));
        assert_eq!(
            response.fallback_reason.as_deref(),
            Some("no upstream results")
        );
        // Every layer ran dry: 1 direct + 2 method + 2 pairing + 2 category
        // + 2 similar
        assert_eq!(response.usage.search_used, 9);
    }

    #[tokio::test]
    async fn test_recommend_detail_failure_keeps_candidate() {
        let provider = Arc::new(MockProvider::new());
        provider
            .set_results(vec![
                fixtures::raw_candidate(7, "Cabbage Stir Fry"),
                fixtures::raw_candidate(8, "Cabbage Soup"),
                fixtures::raw_candidate(9, "Cabbage Salad"),
            ])
            .await;
        let (engine, _quota) = make_engine(&provider, None, 100, 500_000);

        let mut request = pantry_request(&["cabbage"]);
        request.max_results = Some(1);
        let response = engine.recommend(request).await;

        assert_eq!(response.candidates.len(), 1);
        let candidate = &response.candidates[0];
        assert!(!candidate.is_fallback);
        assert_eq!(candidate.original_title, "Cabbage Stir Fry");
        // Raw record has no timing data
        assert!(candidate.estimated_time.is_none());
        assert!(candidate.category.is_none());
        // Failed detail lookup bills nothing
        assert_eq!(response.usage.search_used, 1);
    }

    #[tokio::test]
    async fn test_recommend_without_translator_degrades() {
        let provider = Arc::new(MockProvider::new());
        provider
            .set_results(vec![fixtures::raw_candidate(1, "Hearty goulash casserole")])
            .await;
        let (engine, _quota) = make_engine(&provider, None, 100, 500_000);

        let mut request = pantry_request(&["cabbage"]);
        request.max_results = Some(1);
        let response = engine.recommend(request).await;

        let candidate = &response.candidates[0];
        assert!(!candidate.fully_translated);
        assert_eq!(response.usage.translation_used, 0);
    }

    #[tokio::test]
    async fn test_recommend_truncates_to_max_results() {
        let provider = Arc::new(MockProvider::new());
        let many: Vec<_> = (1..=10)
            .map(|i| fixtures::raw_candidate(i, &format!("Cabbage dish {}", i)))
            .collect();
        provider.set_results(many).await;
        let (engine, _quota) = make_engine(&provider, None, 100, 500_000);

        let mut request = pantry_request(&["cabbage"]);
        request.max_results = Some(3);
        let response = engine.recommend(request).await;

        assert_eq!(response.candidates.len(), 3);
    }

    #[tokio::test]
    async fn test_recipe_detail_invalid_identifier() {
        let provider = Arc::new(MockProvider::new());
        let (engine, _quota) = make_engine(&provider, None, 100, 500_000);

        let err = engine.recipe_detail("not-a-number").await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidIdentifier(_)));
        assert_eq!(provider.recorded_calls().await.len(), 0);
    }

    #[tokio::test]
    async fn test_recipe_detail_quota_gate() {
        let provider = Arc::new(MockProvider::new());
        provider
            .set_detail(fixtures::recipe_detail(7, "Cabbage Rolls"))
            .await;
        let (engine, _quota) = make_engine(&provider, None, 0, 500_000);

        let err = engine.recipe_detail("7").await.unwrap_err();
        assert!(matches!(err, EngineError::QuotaExhausted));
        assert_eq!(provider.recorded_calls().await.len(), 0);
    }

    #[tokio::test]
    async fn test_recipe_detail_success_consumes_budget() {
        let provider = Arc::new(MockProvider::new());
        provider
            .set_detail(fixtures::recipe_detail(7, "Cabbage Rolls"))
            .await;
        let (engine, quota) = make_engine(&provider, None, 100, 500_000);

        let candidate = engine.recipe_detail("7").await.unwrap();
        assert_eq!(candidate.id, 7);
        assert_eq!(candidate.original_title, "Cabbage Rolls");
        assert_eq!(candidate.source_strategy, "lookup");
        assert_eq!(candidate.estimated_time, Some(25));
        assert_eq!(candidate.estimated_difficulty, Difficulty::Easy);
        assert!(!candidate.is_fallback);
        // No translator wired up, so the title degrades to substitution
        assert!(!candidate.fully_translated);
        assert!(candidate.localized_title.contains("キャベツ"));
        assert_eq!(quota.budget(BudgetKind::Search).used, 1);
    }

    #[tokio::test]
    async fn test_recipe_detail_not_found_bills_nothing() {
        let provider = Arc::new(MockProvider::new());
        let (engine, quota) = make_engine(&provider, None, 100, 500_000);

        let err = engine.recipe_detail("7").await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Provider(ProviderError::NotFound(7))
        ));
        assert_eq!(quota.budget(BudgetKind::Search).used, 0);
    }

    #[test]
    fn test_strategy_name_mapping() {
        assert_eq!(strategy_name(1), "direct");
        assert_eq!(strategy_name(3), "pairing");
        assert_eq!(strategy_name(5), "similar_ingredient");
        assert_eq!(strategy_name(0), "unknown");
    }

    #[test]
    fn test_count_steps() {
        assert_eq!(count_steps("Slice. Cook. Serve."), 3);
        assert_eq!(count_steps("One step only"), 1);
        assert_eq!(count_steps("切る。煮る。"), 2);
    }
}
