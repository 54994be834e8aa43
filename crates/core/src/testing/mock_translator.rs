//! Mock translator for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::translator::{TranslationError, Translator};

/// A recorded translation request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTranslation {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Mock implementation of the Translator trait.
///
/// Returns a canned translation when one is registered for the exact
/// source text, and otherwise echoes the input behind a `訳:` marker so
/// assertions can tell machine output from dictionary output.
pub struct MockTranslator {
    /// Canned translations by exact source text.
    responses: Arc<RwLock<HashMap<String, String>>>,
    /// Recorded translation requests.
    calls: Arc<RwLock<Vec<RecordedTranslation>>>,
    /// If set, the next call fails with this error.
    next_error: Arc<RwLock<Option<TranslationError>>>,
    /// If true, every call fails as if the service were down.
    unavailable: Arc<RwLock<bool>>,
}

impl std::fmt::Debug for MockTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTranslator")
            .field("responses", &"<responses>")
            .field("calls", &"<calls>")
            .field("next_error", &"<next_error>")
            .field("unavailable", &"<unavailable>")
            .finish()
    }
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranslator {
    /// Create a new mock translator in echo mode.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            unavailable: Arc::new(RwLock::new(false)),
        }
    }

    /// Register a canned translation for an exact source text.
    pub async fn set_response(&self, source: &str, translated: &str) {
        self.responses
            .write()
            .await
            .insert(source.to_string(), translated.to_string());
    }

    /// Get recorded translation requests.
    pub async fn recorded_calls(&self) -> Vec<RecordedTranslation> {
        self.calls.read().await.clone()
    }

    /// Get the number of translation calls performed.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: TranslationError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every call fail until cleared.
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError> {
        self.calls.write().await.push(RecordedTranslation {
            text: text.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        });

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        if *self.unavailable.read().await {
            return Err(TranslationError::ApiError {
                status: 503,
                message: "mock translator unavailable".to_string(),
            });
        }

        if let Some(canned) = self.responses.read().await.get(text) {
            return Ok(canned.clone());
        }
        Ok(format!("訳:{}", text))
    }
}
