//! End-to-end tests with mocked external dependencies.
//!
//! These tests run the full server stack in-process with mock
//! implementations for the recipe provider and translator.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestFixture};

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint_masks_api_keys() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/config").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["provider"]["api_key_configured"], true);
    assert_eq!(response.body["translator"]["api_key_configured"], true);
    assert_eq!(response.body["translator"]["target_lang"], "ja");
    assert_eq!(response.body["engine"]["max_results"], 5);

    // The raw key must never leave the server
    let serialized = serde_json::to_string(&response.body).unwrap();
    assert!(
        !serialized.contains("test-key"),
        "Sanitized config leaked the API key: {}",
        serialized
    );
}

// =============================================================================
// Recommendation Tests
// =============================================================================

#[tokio::test]
async fn test_recommend_returns_ranked_candidates() {
    let fixture = TestFixture::new();

    fixture
        .provider
        .set_results(vec![
            fixtures::raw_candidate(11, "Spicy Cabbage Stir Fry"),
            fixtures::raw_candidate(12, "Cabbage and Potato Soup"),
        ])
        .await;
    fixture
        .provider
        .set_detail(fixtures::recipe_detail(11, "Spicy Cabbage Stir Fry"))
        .await;
    fixture
        .provider
        .set_detail(fixtures::recipe_detail(12, "Cabbage and Potato Soup"))
        .await;

    let response = fixture
        .post(
            "/api/v1/recommend",
            json!({
                "ingredients": [
                    {"name": "cabbage", "current_amount": 1.0, "unit": "head"},
                    {"name": "potato"}
                ],
                "cuisine": "korean"
            }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert!(response.body["request_id"].is_string());
    assert!(response.body["fallback_reason"].is_null());

    let candidates = response.body["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 2, "Expected both hits after merging");

    // The duplicate copies collapse into the direct-search hit
    assert_eq!(candidates[0]["source_strategy"], "direct");
    assert_eq!(candidates[0]["is_fallback"], false);
    let title = candidates[0]["localized_title"].as_str().unwrap();
    assert!(
        title.starts_with("訳:"),
        "Expected machine-translated title, got {}",
        title
    );

    // Spend is reported back to the caller
    let used = response.body["usage"]["search_used"].as_u64().unwrap();
    assert!(used > 0, "Expected search spend, got {}", used);
}

#[tokio::test]
async fn test_recommend_empty_pantry_falls_back() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/api/v1/recommend", json!({ "ingredients": [] }))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["fallback_reason"], "no ingredient selected");

    let candidates = response.body["candidates"].as_array().unwrap();
    assert!(!candidates.is_empty(), "Fallback should still suggest recipes");
    assert_eq!(candidates[0]["is_fallback"], true);

    // Nothing was spent upstream
    assert_eq!(fixture.provider.search_call_count().await, 0);
    assert_eq!(response.body["usage"]["search_used"], 0);
}

#[tokio::test]
async fn test_recommend_provider_outage_falls_back() {
    let fixture = TestFixture::new();
    fixture.provider.set_search_failure("connection refused").await;

    let response = fixture
        .post(
            "/api/v1/recommend",
            json!({ "ingredients": [{"name": "cabbage"}] }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["fallback_reason"], "no upstream results");
    assert!(!response.body["candidates"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommend_rejects_malformed_body() {
    let fixture = TestFixture::new();

    let response = fixture
        .post_raw("/api/v1/recommend", "{ this is not json")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Valid JSON but missing the required pantry field
    let response = fixture.post("/api/v1/recommend", json!({})).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Recipe Lookup Tests
// =============================================================================

#[tokio::test]
async fn test_get_recipe_by_id() {
    let fixture = TestFixture::new();
    fixture
        .provider
        .set_detail(fixtures::recipe_detail(715538, "Cabbage Rolls"))
        .await;

    let response = fixture.get("/api/v1/recipes/715538").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["id"], 715538);
    assert_eq!(response.body["original_title"], "Cabbage Rolls");
    assert_eq!(response.body["source_strategy"], "lookup");
    assert_eq!(response.body["estimated_time"], 25);
    assert_eq!(response.body["estimated_difficulty"], "easy");
}

#[tokio::test]
async fn test_get_recipe_invalid_id() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/recipes/chicken-soup").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let error = response.body["error"].as_str().unwrap();
    assert!(
        error.contains("Invalid recipe id"),
        "Unexpected error message: {}",
        error
    );
}

#[tokio::test]
async fn test_get_recipe_not_found() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/recipes/424242").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    // A failed lookup is never billed
    assert_eq!(fixture.quota.usage().search_used, 0);
}
