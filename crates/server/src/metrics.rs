//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the Kondate server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Budget gauges (collected dynamically from the quota governor)
//! - Core engine metrics (registered from the core crate)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "kondate_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kondate_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "kondate_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Budget Metrics (collected dynamically)
// =============================================================================

/// Current budget spend by budget kind.
pub static QUOTA_USED: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("kondate_quota_used", "Current budget spend"),
        &["budget"],
    )
    .unwrap()
});

/// Configured budget limit by budget kind.
pub static QUOTA_LIMIT: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("kondate_quota_limit", "Configured budget limit"),
        &["budget"],
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Budgets
    registry.register(Box::new(QUOTA_USED.clone())).unwrap();
    registry.register(Box::new(QUOTA_LIMIT.clone())).unwrap();

    // Core metrics (search, localization, fallbacks, recommendations)
    for metric in kondate_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Refresh dynamic gauges from current application state.
///
/// Called before encoding so the budget gauges reflect the governor's
/// counters at scrape time.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let usage = state.quota().usage();
    QUOTA_USED
        .with_label_values(&["search"])
        .set(usage.search_used as i64);
    QUOTA_LIMIT
        .with_label_values(&["search"])
        .set(usage.search_limit as i64);
    QUOTA_USED
        .with_label_values(&["translation"])
        .set(usage.translation_used as i64);
    QUOTA_LIMIT
        .with_label_values(&["translation"])
        .set(usage.translation_limit as i64);
}

/// Normalize a path for metric labels (replace IDs with placeholders).
pub fn normalize_path(path: &str) -> String {
    // Replace UUIDs and numeric recipe ids with placeholders
    let uuid_regex = regex_lite::Regex::new(
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
    )
    .unwrap();
    let numeric_regex = regex_lite::Regex::new(r"/\d+(/|$)").unwrap();

    let result = uuid_regex.replace_all(path, "{id}");
    let result = numeric_regex.replace_all(&result, "/{id}$1");
    result.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_numeric() {
        let path = "/api/v1/recipes/715538";
        assert_eq!(normalize_path(path), "/api/v1/recipes/{id}");
    }

    #[test]
    fn test_normalize_path_uuid() {
        let path = "/api/v1/requests/550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(normalize_path(path), "/api/v1/requests/{id}");
    }

    #[test]
    fn test_normalize_path_no_ids() {
        let path = "/api/v1/health";
        assert_eq!(normalize_path(path), "/api/v1/health");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        // Access metrics to ensure they're initialized
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("kondate_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_server_and_core_metrics() {
        // Touch all metrics to ensure they appear in output
        // (Prometheus only outputs metrics that have been accessed)
        HTTP_REQUEST_DURATION
            .with_label_values(&["GET", "/test", "200"])
            .observe(0.1);
        HTTP_REQUESTS_IN_FLIGHT.set(0);
        QUOTA_USED.with_label_values(&["search"]).set(0);
        QUOTA_LIMIT.with_label_values(&["search"]).set(100);
        kondate_core::metrics::RECOMMENDATIONS
            .with_label_values(&["ok"])
            .inc();

        let output = encode_metrics();

        // HTTP metrics
        assert!(output.contains("kondate_http_request_duration_seconds"));
        assert!(output.contains("kondate_http_requests_total"));
        assert!(output.contains("kondate_http_requests_in_flight"));

        // Budget gauges
        assert!(output.contains("kondate_quota_used"));
        assert!(output.contains("kondate_quota_limit"));

        // Core metrics registered alongside
        assert!(output.contains("kondate_recommendations_total"));
    }
}
