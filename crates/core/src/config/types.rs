use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::solver::{BatchConfig, SolverConfig};
use crate::suggestion::{LlmProvider, SuggestionConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub suggestion: SuggestionConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub batch: BatchConfig,
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
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Feedback oracle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
    /// Base URL of the oracle (the `/daily` path is appended).
    #[serde(default = "default_oracle_url")]
    pub base_url: String,
    /// Fixed word length for every session.
    #[serde(default = "default_word_size")]
    pub word_size: usize,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_oracle_timeout")]
    pub timeout_secs: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: default_oracle_url(),
            word_size: default_word_size(),
            timeout_secs: default_oracle_timeout(),
        }
    }
}

fn default_oracle_url() -> String {
    "https://wordle.votee.dev:8000".to_string()
}

fn default_word_size() -> usize {
    6
}

fn default_oracle_timeout() -> u32 {
    10
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub oracle: OracleConfig,
    pub suggestion: SanitizedSuggestionConfig,
    pub solver: SolverConfig,
    pub batch: BatchConfig,
}

/// Sanitized suggestion config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSuggestionConfig {
    pub enabled: bool,
    pub provider: LlmProvider,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let s = &config.suggestion;
        Self {
            server: config.server.clone(),
            oracle: config.oracle.clone(),
            suggestion: SanitizedSuggestionConfig {
                enabled: s.enabled,
                provider: s.provider.clone(),
                model: s.model.clone(),
                api_base: s.api_base.clone(),
                api_key_configured: s.api_key.as_deref().is_some_and(|k| !k.is_empty()),
                timeout_secs: s.timeout_secs,
            },
            solver: config.solver.clone(),
            batch: config.batch.clone(),
        }
    }
}
