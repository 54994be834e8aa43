//! Localization of recipe text into the configured target language.
//!
//! Every piece of text walks the same ladder: exact cache hit, then the
//! built-in dictionary, then budget-gated machine translation, and
//! finally word-by-word dictionary substitution when nothing else is
//! available. Only machine translation spends budget, and only after
//! the call succeeded.

pub mod cache;
pub mod chunk;
pub mod dictionary;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::TranslatorConfig;
use crate::metrics;
use crate::quota::{BudgetKind, QuotaGovernor};
use crate::translator::{TranslationError, Translator};

pub use cache::TranslationCache;
pub use chunk::{chunk_text, excerpt};

/// One localized piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedText {
    pub text: String,
    /// False when word-by-word substitution had to fill in.
    pub fully_translated: bool,
}

impl LocalizedText {
    fn complete(text: String) -> Self {
        Self {
            text,
            fully_translated: true,
        }
    }

    fn degraded(text: String) -> Self {
        Self {
            text,
            fully_translated: false,
        }
    }
}

pub struct Localizer {
    /// Absent when no machine translation backend is configured; the
    /// ladder then skips straight from dictionary to substitution.
    translator: Option<Arc<dyn Translator>>,
    cache: Arc<TranslationCache>,
    quota: Arc<QuotaGovernor>,
    source_lang: String,
    target_lang: String,
    max_chunk_chars: usize,
}

impl Localizer {
    pub fn new(
        translator: Option<Arc<dyn Translator>>,
        cache: Arc<TranslationCache>,
        quota: Arc<QuotaGovernor>,
        config: Option<&TranslatorConfig>,
    ) -> Self {
        let defaults = TranslatorConfig::default();
        let config = config.unwrap_or(&defaults);
        Self {
            translator,
            cache,
            quota,
            source_lang: config.source_lang.clone(),
            target_lang: config.target_lang.clone(),
            max_chunk_chars: config.max_chunk_chars,
        }
    }

    /// Localize a single piece of text.
    ///
    /// Never fails: when machine translation is unavailable or denied
    /// by the budget, the result degrades to dictionary substitution
    /// and is marked as not fully translated.
    pub async fn localize(&self, text: &str) -> LocalizedText {
        let source = text.trim();
        if source.is_empty() {
            return LocalizedText::complete(String::new());
        }

        if let Some(hit) = self.cache.get(source) {
            metrics::CACHE_LOOKUPS.with_label_values(&["hit"]).inc();
            metrics::LOCALIZATIONS.with_label_values(&["cache"]).inc();
            return LocalizedText::complete(hit);
        }
        metrics::CACHE_LOOKUPS.with_label_values(&["miss"]).inc();

        if let Some(entry) = dictionary::lookup(source) {
            metrics::LOCALIZATIONS
                .with_label_values(&["dictionary"])
                .inc();
            self.cache.put(source, entry.to_string());
            return LocalizedText::complete(entry.to_string());
        }

        if let Some(translator) = self.translator.clone() {
            let char_count = source.chars().count() as u64;
            if self.quota.can_consume(BudgetKind::Translation, char_count) {
                match self.machine_translate(translator.as_ref(), source).await {
                    Ok(translated) => {
                        metrics::LOCALIZATIONS.with_label_values(&["machine"]).inc();
                        self.cache.put(source, translated.clone());
                        return LocalizedText::complete(translated);
                    }
                    Err(e) => {
                        warn!(
                            translator = translator.name(),
                            error = %e,
                            "Machine translation failed, substituting from dictionary"
                        );
                    }
                }
            } else {
                debug!(
                    chars = char_count,
                    "Translation budget too low, substituting from dictionary"
                );
            }
        }

        metrics::LOCALIZATIONS
            .with_label_values(&["substitution"])
            .inc();
        LocalizedText::degraded(dictionary::substitute(source))
    }

    /// Translate in chunks, billing each chunk after its call succeeds.
    async fn machine_translate(
        &self,
        translator: &dyn Translator,
        text: &str,
    ) -> Result<String, TranslationError> {
        let chunks = chunk_text(text, self.max_chunk_chars);
        let mut parts = Vec::with_capacity(chunks.len());

        for chunk in &chunks {
            let translated = match translator
                .translate(chunk, &self.source_lang, &self.target_lang)
                .await
            {
                Ok(translated) => {
                    metrics::TRANSLATION_CALLS
                        .with_label_values(&["success"])
                        .inc();
                    translated
                }
                Err(e) => {
                    metrics::TRANSLATION_CALLS
                        .with_label_values(&["error"])
                        .inc();
                    return Err(e);
                }
            };

            let chunk_chars = chunk.chars().count() as u64;
            self.quota.consume(BudgetKind::Translation, chunk_chars);
            metrics::TRANSLATION_CHARS.inc_by(chunk_chars);
            parts.push(translated);
        }

        Ok(parts.join(" "))
    }
}
