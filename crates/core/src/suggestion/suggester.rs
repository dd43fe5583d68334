//! Turning constraint knowledge into one suggested word.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;
use tracing::debug;

use crate::constraint::ConstraintState;
use crate::metrics;

use super::config::SuggestionConfig;
use super::llm::{CompletionRequest, LlmClient, LlmError};
use super::prompt::{build_prompt, SYSTEM_PROMPT};

static ALPHA_RUN: Lazy<Regex> = Lazy::new(|| Regex::new("[a-z]+").expect("static regex"));

/// Why a suggestion could not be used.
#[derive(Debug, Clone, Error)]
pub enum SuggestionError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Suggestion service not configured")]
    NotConfigured,

    #[error("No {expected}-letter word in reply {reply:?}")]
    Malformed { reply: String, expected: usize },

    #[error("Suggested word {0:?} was already tried")]
    AlreadyTried(String),

    #[error("Suggested word {0:?} contradicts known constraints")]
    InvalidCandidate(String),
}

impl SuggestionError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            SuggestionError::Llm(LlmError::Timeout(_)) => "timeout",
            SuggestionError::Llm(LlmError::NotConfigured(_)) | SuggestionError::NotConfigured => {
                "not_configured"
            }
            SuggestionError::Llm(_) => "transport",
            SuggestionError::Malformed { .. } => "malformed",
            SuggestionError::AlreadyTried(_) => "already_tried",
            SuggestionError::InvalidCandidate(_) => "invalid",
        }
    }
}

/// Source of suggested guesses.
#[async_trait]
pub trait Suggester: Send + Sync {
    /// Name of this suggester for logging.
    fn name(&self) -> &str;

    /// Propose one untried word consistent with `state`.
    async fn suggest(&self, state: &ConstraintState) -> Result<String, SuggestionError>;
}

/// Suggester backed by a text-completion model.
pub struct LlmSuggester {
    llm: Arc<dyn LlmClient>,
    config: SuggestionConfig,
}

impl LlmSuggester {
    pub fn new(llm: Arc<dyn LlmClient>, config: SuggestionConfig) -> Self {
        Self { llm, config }
    }
}

#[async_trait]
impl Suggester for LlmSuggester {
    fn name(&self) -> &str {
        self.llm.provider()
    }

    async fn suggest(&self, state: &ConstraintState) -> Result<String, SuggestionError> {
        let prompt = build_prompt(state, self.config.prompt_history_limit);
        let request = CompletionRequest::new(prompt)
            .with_system(SYSTEM_PROMPT)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);

        let response = self.llm.complete(request).await?;
        debug!(reply = %response.text, model = %response.model, "Suggestion reply");
        metrics::LLM_TOKENS
            .with_label_values(&[self.llm.provider(), "input"])
            .inc_by(response.usage.input_tokens as u64);
        metrics::LLM_TOKENS
            .with_label_values(&[self.llm.provider(), "output"])
            .inc_by(response.usage.output_tokens as u64);

        let word = extract_word(&response.text, state.word_size()).ok_or_else(|| {
            SuggestionError::Malformed {
                reply: response.text.clone(),
                expected: state.word_size(),
            }
        })?;
        check_suggestion(state, word)
    }
}

/// First maximal alphabetic run of exactly `size` letters, lowercased.
pub fn extract_word(reply: &str, size: usize) -> Option<String> {
    let lowered = reply.to_lowercase();
    ALPHA_RUN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .find(|run| run.chars().count() == size)
        .map(str::to_string)
}

/// Accept `word` only if it is new and consistent with `state`.
pub fn check_suggestion(state: &ConstraintState, word: String) -> Result<String, SuggestionError> {
    if state.was_tried(&word) {
        return Err(SuggestionError::AlreadyTried(word));
    }
    if !state.is_candidate_valid(&word) {
        return Err(SuggestionError::InvalidCandidate(word));
    }
    Ok(word)
}
