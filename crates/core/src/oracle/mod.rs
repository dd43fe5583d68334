//! Feedback oracle abstraction.
//!
//! The oracle scores a candidate word against the hidden word and answers
//! with one [`LetterFeedback`] per slot. The production implementation talks
//! to a remote HTTP service; tests use [`crate::testing::MockOracle`].

mod http;

pub use http::HttpOracle;

use async_trait::async_trait;
use thiserror::Error;

use crate::constraint::LetterFeedback;

/// Errors returned by oracle calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleError {
    #[error("Oracle request timed out")]
    Timeout,

    #[error("Connection to oracle failed: {0}")]
    ConnectionFailed(String),

    #[error("Oracle API error: {0}")]
    ApiError(String),

    #[error("Malformed oracle response: {0}")]
    MalformedResponse(String),

    #[error("Invalid guess {guess:?}: expected {expected} letters")]
    InvalidGuess { guess: String, expected: usize },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// A service that grades guesses against a hidden word.
#[async_trait]
pub trait FeedbackOracle: Send + Sync {
    /// Name of this oracle for logging.
    fn name(&self) -> &str;

    /// Fixed word length every guess must have.
    fn word_size(&self) -> usize;

    /// Submit `word` and return one verdict per slot, ordered by slot.
    async fn guess(&self, word: &str) -> Result<Vec<LetterFeedback>, OracleError>;
}

/// Normalize a raw oracle answer: lowercase letters, order by slot, and
/// check that every slot of the word is covered exactly once.
pub fn normalize_feedback(
    word_size: usize,
    mut feedback: Vec<LetterFeedback>,
) -> Result<Vec<LetterFeedback>, OracleError> {
    if feedback.len() != word_size {
        return Err(OracleError::MalformedResponse(format!(
            "expected {} verdicts, got {}",
            word_size,
            feedback.len()
        )));
    }

    feedback.sort_by_key(|f| f.slot);
    for (expected, f) in feedback.iter_mut().enumerate() {
        if f.slot != expected {
            return Err(OracleError::MalformedResponse(format!(
                "missing or duplicate slot {}",
                expected
            )));
        }
        if !f.letter.is_ascii_alphabetic() {
            return Err(OracleError::MalformedResponse(format!(
                "non-alphabetic letter {:?} at slot {}",
                f.letter, f.slot
            )));
        }
        f.letter = f.letter.to_ascii_lowercase();
    }

    Ok(feedback)
}

/// Reject guesses the oracle would not accept.
pub fn check_guess(word_size: usize, word: &str) -> Result<(), OracleError> {
    if word.chars().count() != word_size || !word.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(OracleError::InvalidGuess {
            guess: word.to_string(),
            expected: word_size,
        });
    }
    Ok(())
}
