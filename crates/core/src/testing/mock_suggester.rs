//! Mock suggester and LLM client for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::constraint::ConstraintState;
use crate::suggestion::{
    CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage, Suggester,
    SuggestionError,
};

/// Mock implementation of the Suggester trait.
///
/// Returns queued words in order, without checking them against the
/// state. Once the queue is empty every call fails with
/// [`SuggestionError::NotConfigured`].
#[derive(Debug, Default)]
pub struct MockSuggester {
    words: Arc<RwLock<VecDeque<Result<String, SuggestionError>>>>,
    calls: Arc<RwLock<usize>>,
}

impl MockSuggester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a word to return.
    pub async fn push_word(&self, word: &str) {
        self.words.write().await.push_back(Ok(word.to_string()));
    }

    /// Queue an error to return.
    pub async fn push_error(&self, error: SuggestionError) {
        self.words.write().await.push_back(Err(error));
    }

    pub async fn call_count(&self) -> usize {
        *self.calls.read().await
    }
}

#[async_trait]
impl Suggester for MockSuggester {
    fn name(&self) -> &str {
        "mock"
    }

    async fn suggest(&self, _state: &ConstraintState) -> Result<String, SuggestionError> {
        *self.calls.write().await += 1;
        self.words
            .write()
            .await
            .pop_front()
            .unwrap_or(Err(SuggestionError::NotConfigured))
    }
}

/// Mock implementation of the LlmClient trait.
///
/// Replies are scripted in order and every prompt is recorded. An empty
/// script answers with [`LlmError::NotConfigured`].
#[derive(Debug, Default)]
pub struct MockLlm {
    replies: Arc<RwLock<VecDeque<Result<String, LlmError>>>>,
    prompts: Arc<RwLock<Vec<String>>>,
    system_prompts: Arc<RwLock<Vec<Option<String>>>>,
}

impl MockLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_reply(&self, text: &str) {
        self.replies.write().await.push_back(Ok(text.to_string()));
    }

    pub async fn push_error(&self, error: LlmError) {
        self.replies.write().await.push_back(Err(error));
    }

    /// Prompts received so far, in order.
    pub async fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.read().await.clone()
    }

    pub async fn recorded_system_prompts(&self) -> Vec<Option<String>> {
        self.system_prompts.read().await.clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.system_prompts.write().await.push(request.system);
        self.prompts.write().await.push(request.prompt);
        let text = self
            .replies
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::NotConfigured("no scripted reply".to_string())))?;

        Ok(CompletionResponse {
            usage: LlmUsage {
                input_tokens: 0,
                output_tokens: text.split_whitespace().count() as u32,
            },
            text,
            model: "mock-model".to_string(),
        })
    }
}
