//! Mock recipe provider for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::provider::{ProviderError, RawCandidate, RecipeDetail, RecipeProvider};

/// A recorded provider call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    ByIngredients { ingredient: String },
    ByQuery { text: String, cuisine: Option<String> },
    Detail { id: u64 },
}

impl RecordedCall {
    /// The query or ingredient text of a search call.
    pub fn text(&self) -> Option<&str> {
        match self {
            RecordedCall::ByIngredients { ingredient } => Some(ingredient),
            RecordedCall::ByQuery { text, .. } => Some(text),
            RecordedCall::Detail { .. } => None,
        }
    }
}

/// A query handler that produces results dynamically based on the query.
type QueryHandler = Box<dyn Fn(&str) -> Option<Vec<RawCandidate>> + Send + Sync>;

/// Mock implementation of the RecipeProvider trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable candidates and recipe details
/// - Track calls for assertions
/// - Simulate one-shot and persistent failures
///
/// # Example
///
/// ```rust,ignore
/// use kondate_core::testing::{fixtures, MockProvider};
///
/// let provider = MockProvider::new();
/// provider.set_results(vec![
///     fixtures::raw_candidate(101, "Cabbage Stir Fry"),
///     fixtures::raw_candidate(102, "Cabbage Soup"),
/// ]).await;
///
/// let candidates = provider.search_by_ingredients("cabbage").await?;
/// assert_eq!(candidates.len(), 2);
///
/// let calls = provider.recorded_calls().await;
/// assert_eq!(calls.len(), 1);
/// ```
pub struct MockProvider {
    /// Configured candidates returned by both search endpoints.
    results: Arc<RwLock<Vec<RawCandidate>>>,
    /// Recipe details by id.
    details: Arc<RwLock<HashMap<u64, RecipeDetail>>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// If set, the next search call fails with this error.
    next_error: Arc<RwLock<Option<ProviderError>>>,
    /// If set, every search call fails with a connection error.
    search_failure: Arc<RwLock<Option<String>>>,
    /// Query handler for dynamic result generation based on query text.
    query_handler: Arc<RwLock<Option<QueryHandler>>>,
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("results", &"<results>")
            .field("details", &"<details>")
            .field("calls", &"<calls>")
            .field("next_error", &"<next_error>")
            .field("search_failure", &"<search_failure>")
            .field("query_handler", &"<handler>")
            .finish()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider with no results.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
            details: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            search_failure: Arc::new(RwLock::new(None)),
            query_handler: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the candidates returned by subsequent search calls.
    pub async fn set_results(&self, results: Vec<RawCandidate>) {
        *self.results.write().await = results;
    }

    /// Add a single candidate.
    pub async fn add_result(&self, candidate: RawCandidate) {
        self.results.write().await.push(candidate);
    }

    /// Clear all candidates.
    pub async fn clear_results(&self) {
        self.results.write().await.clear();
    }

    /// Register a recipe detail, keyed by its id.
    pub async fn set_detail(&self, detail: RecipeDetail) {
        self.details.write().await.insert(detail.id, detail);
    }

    /// Get recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Get the number of search calls performed (detail lookups excluded).
    pub async fn search_call_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| !matches!(c, RecordedCall::Detail { .. }))
            .count()
    }

    /// Clear recorded calls.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    /// Configure the next search call to fail with the given error.
    pub async fn set_next_error(&self, error: ProviderError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every search call fail with a connection error.
    pub async fn set_search_failure(&self, message: &str) {
        *self.search_failure.write().await = Some(message.to_string());
    }

    /// Clear a persistent search failure.
    pub async fn clear_search_failure(&self) {
        *self.search_failure.write().await = None;
    }

    /// Set a query handler that generates results from the query text.
    ///
    /// The handler receives the ingredient name for ingredient searches
    /// and the query text for free-text searches. Return `Some(results)`
    /// to override the configured results, or `None` to fall through.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// provider.set_query_handler(|text| {
    ///     if text.contains("stir-fried") {
    ///         Some(vec![fixtures::raw_candidate(7, "Stir Fry")])
    ///     } else {
    ///         Some(vec![])
    ///     }
    /// }).await;
    /// ```
    pub async fn set_query_handler<F>(&self, handler: F)
    where
        F: Fn(&str) -> Option<Vec<RawCandidate>> + Send + Sync + 'static,
    {
        *self.query_handler.write().await = Some(Box::new(handler));
    }

    /// Clear the query handler.
    pub async fn clear_query_handler(&self) {
        *self.query_handler.write().await = None;
    }

    async fn check_failures(&self) -> Result<(), ProviderError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        if let Some(message) = self.search_failure.read().await.clone() {
            return Err(ProviderError::ConnectionFailed(message));
        }
        Ok(())
    }

    async fn lookup(&self, text: &str) -> Vec<RawCandidate> {
        let handler = self.query_handler.read().await;
        if let Some(ref h) = *handler {
            if let Some(results) = h(text) {
                return results;
            }
        }
        drop(handler);

        self.results.read().await.clone()
    }
}

#[async_trait]
impl RecipeProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search_by_ingredients(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RawCandidate>, ProviderError> {
        self.calls.write().await.push(RecordedCall::ByIngredients {
            ingredient: ingredient.to_string(),
        });
        self.check_failures().await?;
        Ok(self.lookup(ingredient).await)
    }

    async fn search_by_query(
        &self,
        text: &str,
        cuisine: Option<&str>,
    ) -> Result<Vec<RawCandidate>, ProviderError> {
        self.calls.write().await.push(RecordedCall::ByQuery {
            text: text.to_string(),
            cuisine: cuisine.map(|c| c.to_string()),
        });
        self.check_failures().await?;
        Ok(self.lookup(text).await)
    }

    async fn recipe_detail(&self, id: u64) -> Result<RecipeDetail, ProviderError> {
        self.calls.write().await.push(RecordedCall::Detail { id });
        self.details
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ProviderError::NotFound(id))
    }
}
