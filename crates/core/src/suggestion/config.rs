//! Suggestion service configuration types.

use serde::{Deserialize, Serialize};

/// LLM provider type.
///
/// Every provider speaks the OpenAI-compatible chat-completions protocol;
/// they differ in default endpoint and whether an API key is required.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    /// DeepSeek chat API.
    #[default]
    #[serde(rename = "deepseek")]
    DeepSeek,
    /// OpenAI API.
    OpenAi,
    /// Local Ollama instance (OpenAI-compatible endpoint, no key).
    Ollama,
    /// Custom OpenAI-compatible endpoint; `api_base` is required.
    Custom,
}

impl LlmProvider {
    /// Endpoint used when `api_base` is not configured.
    pub fn default_api_base(&self) -> Option<&'static str> {
        match self {
            LlmProvider::DeepSeek => Some("https://api.deepseek.com"),
            LlmProvider::OpenAi => Some("https://api.openai.com/v1"),
            LlmProvider::Ollama => Some("http://localhost:11434/v1"),
            LlmProvider::Custom => None,
        }
    }

    /// Hosted providers reject unauthenticated calls.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, LlmProvider::DeepSeek | LlmProvider::OpenAi)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::DeepSeek => "deepseek",
            LlmProvider::OpenAi => "openai",
            LlmProvider::Ollama => "ollama",
            LlmProvider::Custom => "custom",
        }
    }
}

/// Suggestion client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// When disabled, every non-probe round uses the emergency generator.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub provider: LlmProvider,
    /// Model name/identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key. Usually supplied through the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL (for proxies or self-hosted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Generated tokens are truncated to this many; the reply should be one word.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// How many recent attempts the prompt lists in full.
    #[serde(default = "default_prompt_history_limit")]
    pub prompt_history_limit: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_timeout() -> u32 {
    15
}

fn default_max_tokens() -> u32 {
    8
}

fn default_temperature() -> f32 {
    0.1
}

fn default_prompt_history_limit() -> usize {
    10
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: LlmProvider::default(),
            model: default_model(),
            api_key: None,
            api_base: None,
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            prompt_history_limit: default_prompt_history_limit(),
        }
    }
}

impl SuggestionConfig {
    /// Configured endpoint, falling back to the provider default.
    pub fn resolved_api_base(&self) -> Option<String> {
        self.api_base
            .clone()
            .or_else(|| self.provider.default_api_base().map(str::to_string))
    }
}
