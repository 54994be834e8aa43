//! Machine translation provider boundary.
//!
//! Calls here are billed in source-text characters against the monthly
//! translation budget; the localizer checks the quota governor before
//! every call and consumes only after success.

use async_trait::async_trait;
use thiserror::Error;

mod deepl;

pub use deepl::DeepLClient;

/// Errors from the machine translation provider.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// The provider's own character quota is spent.
    #[error("Translation provider quota exceeded")]
    ProviderQuotaExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for machine translation backends.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Translate `text` between the given languages.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError>;
}
