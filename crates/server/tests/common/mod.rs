//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock dependencies injected, enabling comprehensive E2E testing
//! without external infrastructure.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use kondate_core::provider::RecipeProvider;
use kondate_core::testing::{MockProvider, MockTranslator};
use kondate_core::translator::Translator;
use kondate_core::{load_config_from_str, QuotaGovernor, RecommendationEngine};

use kondate_server::api::create_router;
use kondate_server::state::AppState;

/// Re-export fixtures for test convenience
pub use kondate_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with fully controllable mocks for:
/// - Recipe search (MockProvider)
/// - Machine translation (MockTranslator)
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock recipe provider - configure search results and details
    pub provider: Arc<MockProvider>,
    /// Mock translator - observe calls, configure canned responses
    pub translator: Arc<MockTranslator>,
    /// Quota governor shared with the engine
    pub quota: Arc<QuotaGovernor>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with the default budget limits.
    pub fn new() -> Self {
        Self::with_limits(100, 500_000)
    }

    /// Create a test fixture with custom budget limits.
    pub fn with_limits(search_limit: u64, translation_limit: u64) -> Self {
        let config = load_config_from_str(
            r#"
            [provider]
            api_key = "test-key"

            [translator]
            api_key = "test-key"

            [engine]
            inter_call_delay_ms = 0
            "#,
        )
        .expect("Failed to parse test config");

        let provider = Arc::new(MockProvider::new());
        let translator = Arc::new(MockTranslator::new());
        let quota = Arc::new(QuotaGovernor::new(search_limit, translation_limit));

        let engine = Arc::new(RecommendationEngine::new(
            Arc::clone(&provider) as Arc<dyn RecipeProvider>,
            Some(Arc::clone(&translator) as Arc<dyn Translator>),
            Arc::clone(&quota),
            &config,
        ));

        let state = Arc::new(AppState::new(config, engine, Arc::clone(&quota)));
        let router = create_router(state);

        Self {
            router,
            provider,
            translator,
            quota,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body = Self::json_body(response.into_body()).await;
        TestResponse { status, body }
    }

    /// Send a GET request and return the raw body as text (for /metrics).
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body = Self::json_body(response.into_body()).await;
        TestResponse { status, body }
    }

    async fn json_body(body: Body) -> Value {
        let bytes = body
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
