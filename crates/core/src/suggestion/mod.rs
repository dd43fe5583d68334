//! Language-model suggested guesses.
//!
//! The solver asks a [`Suggester`] for one word per round. [`LlmSuggester`]
//! summarizes the constraint state into a short prompt, sends it to an
//! OpenAI-compatible chat-completions service and extracts the first run of
//! letters of the right length from the reply. Any failure is returned to the
//! caller, which falls back to the randomized emergency generator; there is
//! never more than one remote call per round.

mod config;
mod llm;
mod prompt;
mod suggester;

pub use config::{LlmProvider, SuggestionConfig};
pub use llm::{
    ChatCompletionsClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage,
};
pub use prompt::build_prompt;
pub use suggester::{check_suggestion, extract_word, LlmSuggester, Suggester, SuggestionError};
