use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable consulted when no suggestion API key is configured.
pub const FALLBACK_API_KEY_VAR: &str = "DEEPSEEK_API_KEY";

/// Load configuration from file with environment variable overrides
///
/// Nested keys are separated by a double underscore, e.g.
/// `GUESSWORK_SUGGESTION__API_KEY` or `GUESSWORK_ORACLE__WORD_SIZE`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let mut config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("GUESSWORK_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    if config.suggestion.api_key.is_none() {
        config.suggestion.api_key = std::env::var(FALLBACK_API_KEY_VAR)
            .ok()
            .filter(|k| !k.is_empty());
    }

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
