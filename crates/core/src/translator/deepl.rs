//! DeepL API client.
//!
//! The free tier is billed per source character per month; HTTP 456 is
//! DeepL's own signal that the account quota is spent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::TranslatorConfig;

use super::{TranslationError, Translator};

const DEFAULT_BASE_URL: &str = "https://api-free.deepl.com";

/// DeepL REST client.
pub struct DeepLClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DeepLClient {
    /// Create a new DeepL client.
    pub fn new(config: &TranslatorConfig) -> Result<Self, TranslationError> {
        if config.api_key.is_empty() {
            return Err(TranslationError::NotConfigured(
                "DeepL API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Translator for DeepLClient {
    fn name(&self) -> &str {
        "deepl"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError> {
        let url = format!("{}/v2/translate", self.base_url);
        let source = source_lang.to_uppercase();
        let target = target_lang.to_uppercase();

        debug!(
            chars = text.chars().count(),
            source = source_lang,
            target = target_lang,
            "Requesting translation"
        );

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("DeepL-Auth-Key {}", self.api_key),
            )
            .form(&[
                ("text", text),
                ("source_lang", source.as_str()),
                ("target_lang", target.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == 403 {
            return Err(TranslationError::NotConfigured(
                "Invalid DeepL API key".to_string(),
            ));
        }
        if status == 429 {
            return Err(TranslationError::RateLimitExceeded);
        }
        if status == 456 {
            return Err(TranslationError::ProviderQuotaExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: DeepLResponse = response.json().await.map_err(|e| {
            TranslationError::ParseError(format!("Failed to parse translate response: {}", e))
        })?;

        let translated = parsed
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| {
                TranslationError::ParseError("Response contained no translations".to_string())
            })?;

        Ok(translated)
    }
}

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
}
