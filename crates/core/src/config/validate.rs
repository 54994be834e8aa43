use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Provider API key is present (section itself enforced by serde)
/// - Translator API key is present when the section is configured
/// - Server port is not 0
/// - Engine limits are usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.provider.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "provider.api_key cannot be empty".to_string(),
        ));
    }

    if let Some(translator) = &config.translator {
        if translator.api_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "translator.api_key cannot be empty".to_string(),
            ));
        }
        if translator.max_chunk_chars == 0 {
            return Err(ConfigError::ValidationError(
                "translator.max_chunk_chars cannot be 0".to_string(),
            ));
        }
    }

    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.engine.max_results == 0 {
        return Err(ConfigError::ValidationError(
            "engine.max_results cannot be 0".to_string(),
        ));
    }
    if config.engine.safety_multiplier == 0 {
        return Err(ConfigError::ValidationError(
            "engine.safety_multiplier cannot be 0".to_string(),
        ));
    }
    if config.engine.max_ingredients == 0 {
        return Err(ConfigError::ValidationError(
            "engine.max_ingredients cannot be 0".to_string(),
        ));
    }

    Ok(())
}
