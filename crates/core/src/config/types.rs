use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub provider: ProviderConfig,
    /// Machine translation backend. Without it, localization degrades
    /// to the built-in dictionary.
    #[serde(default)]
    pub translator: Option<TranslatorConfig>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub quota: QuotaConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Recipe provider (Spoonacular) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Spoonacular API key
    pub api_key: String,
    /// Override the API base URL (used by tests)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Results requested per search call (default: 10)
    #[serde(default = "default_results_per_call")]
    pub results_per_call: u32,
}

fn default_timeout() -> u32 {
    15
}

fn default_results_per_call() -> u32 {
    10
}

/// Machine translation (DeepL) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslatorConfig {
    /// DeepL API key
    pub api_key: String,
    /// Override the API base URL (used by tests)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Source language of provider recipe text (default: "en")
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    /// Presentation language (default: "ja")
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Character limit per translation call (default: 500)
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            timeout_secs: default_timeout(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "ja".to_string()
}

fn default_max_chunk_chars() -> usize {
    500
}

/// External budget limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuotaConfig {
    /// Provider search calls allowed per day (default: 100)
    #[serde(default = "default_search_daily_limit")]
    pub search_daily_limit: u64,
    /// Translation source characters allowed per month (default: 500000)
    #[serde(default = "default_translation_monthly_limit")]
    pub translation_monthly_limit: u64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            search_daily_limit: default_search_daily_limit(),
            translation_monthly_limit: default_translation_monthly_limit(),
        }
    }
}

fn default_search_daily_limit() -> u64 {
    100
}

fn default_translation_monthly_limit() -> u64 {
    500_000
}

/// Recommendation engine tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Candidates returned per recommendation (default: 5)
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Raw-candidate oversampling factor before scoring (default: 3)
    #[serde(default = "default_safety_multiplier")]
    pub safety_multiplier: u32,
    /// Delay between provider calls in milliseconds (default: 1000)
    #[serde(default = "default_inter_call_delay_ms")]
    pub inter_call_delay_ms: u64,
    /// Translation cache capacity in entries (default: 2048)
    #[serde(default = "default_translation_cache_capacity")]
    pub translation_cache_capacity: usize,
    /// Pantry ingredients considered per request (default: 5)
    #[serde(default = "default_max_ingredients")]
    pub max_ingredients: usize,
    /// Expiry window in days for the urgency bonus (default: 3)
    #[serde(default = "default_days_left_threshold")]
    pub days_left_threshold: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            safety_multiplier: default_safety_multiplier(),
            inter_call_delay_ms: default_inter_call_delay_ms(),
            translation_cache_capacity: default_translation_cache_capacity(),
            max_ingredients: default_max_ingredients(),
            days_left_threshold: default_days_left_threshold(),
        }
    }
}

fn default_max_results() -> usize {
    5
}

fn default_safety_multiplier() -> u32 {
    3
}

fn default_inter_call_delay_ms() -> u64 {
    1000
}

fn default_translation_cache_capacity() -> usize {
    2048
}

fn default_max_ingredients() -> usize {
    5
}

fn default_days_left_threshold() -> i32 {
    3
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub provider: SanitizedProviderConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator: Option<SanitizedTranslatorConfig>,
    pub server: ServerConfig,
    pub quota: QuotaConfig,
    pub engine: EngineConfig,
}

/// Sanitized provider config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
    pub results_per_call: u32,
}

/// Sanitized translator config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTranslatorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
    pub source_lang: String,
    pub target_lang: String,
    pub max_chunk_chars: usize,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            provider: SanitizedProviderConfig {
                base_url: config.provider.base_url.clone(),
                api_key_configured: !config.provider.api_key.is_empty(),
                timeout_secs: config.provider.timeout_secs,
                results_per_call: config.provider.results_per_call,
            },
            translator: config
                .translator
                .as_ref()
                .map(|t| SanitizedTranslatorConfig {
                    base_url: t.base_url.clone(),
                    api_key_configured: !t.api_key.is_empty(),
                    timeout_secs: t.timeout_secs,
                    source_lang: t.source_lang.clone(),
                    target_lang: t.target_lang.clone(),
                    max_chunk_chars: t.max_chunk_chars,
                }),
            server: config.server.clone(),
            quota: config.quota.clone(),
            engine: config.engine.clone(),
        }
    }
}
