//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Search orchestration (provider calls, per-strategy yield)
//! - Localization (translation calls, characters, cache)
//! - Recommendation outcomes (fallbacks, durations)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Search Metrics
// =============================================================================

/// Recipe provider calls by strategy and outcome.
pub static SEARCH_CALLS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kondate_search_calls_total", "Total recipe provider calls"),
        &["strategy", "outcome"], // outcome: "success", "error"
    )
    .unwrap()
});

/// Raw candidates returned per strategy call.
pub static STRATEGY_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "kondate_strategy_results",
            "Raw candidates returned per strategy call",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        &["strategy"],
    )
    .unwrap()
});

/// Recipe detail lookups by outcome.
pub static DETAIL_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kondate_detail_lookups_total", "Total recipe detail lookups"),
        &["outcome"], // "success", "error", "skipped"
    )
    .unwrap()
});

// =============================================================================
// Localization Metrics
// =============================================================================

/// Machine translation calls by outcome.
pub static TRANSLATION_CALLS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "kondate_translation_calls_total",
            "Total machine translation calls",
        ),
        &["outcome"], // "success", "error"
    )
    .unwrap()
});

/// Source characters billed against the translation budget.
pub static TRANSLATION_CHARS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "kondate_translation_chars_total",
        "Total source characters sent for machine translation",
    )
    .unwrap()
});

/// Translation cache lookups by result.
pub static CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "kondate_translation_cache_lookups_total",
            "Translation cache lookups",
        ),
        &["result"], // "hit", "miss"
    )
    .unwrap()
});

/// Localized texts by how the translation was produced.
pub static LOCALIZATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kondate_localizations_total", "Localized texts by source"),
        &["source"], // "cache", "dictionary", "machine", "substitution"
    )
    .unwrap()
});

// =============================================================================
// Recommendation Metrics
// =============================================================================

/// Fallback recommendations by reason.
pub static FALLBACKS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "kondate_fallbacks_total",
            "Fallback recommendations served",
        ),
        &["reason"], // "no_ingredient", "quota_exhausted", "no_results"
    )
    .unwrap()
});

/// Recommendation requests by outcome.
pub static RECOMMENDATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "kondate_recommendations_total",
            "Total recommendation requests",
        ),
        &["outcome"], // "ok", "fallback"
    )
    .unwrap()
});

/// Recommendation request duration in seconds.
pub static RECOMMENDATION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "kondate_recommendation_duration_seconds",
            "Duration of recommendation requests",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["outcome"],
    )
    .unwrap()
});

/// Candidates returned per recommendation.
pub static CANDIDATES_RETURNED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "kondate_candidates_returned",
            "Number of candidates returned per recommendation",
        )
        .buckets(vec![0.0, 1.0, 3.0, 5.0, 10.0, 25.0]),
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Search
        Box::new(SEARCH_CALLS.clone()),
        Box::new(STRATEGY_RESULTS.clone()),
        Box::new(DETAIL_LOOKUPS.clone()),
        // Localization
        Box::new(TRANSLATION_CALLS.clone()),
        Box::new(TRANSLATION_CHARS.clone()),
        Box::new(CACHE_LOOKUPS.clone()),
        Box::new(LOCALIZATIONS.clone()),
        // Recommendations
        Box::new(FALLBACKS.clone()),
        Box::new(RECOMMENDATIONS.clone()),
        Box::new(RECOMMENDATION_DURATION.clone()),
        Box::new(CANDIDATES_RETURNED.clone()),
    ]
}
