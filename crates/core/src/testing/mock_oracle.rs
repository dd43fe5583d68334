//! Mock feedback oracle for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::constraint::{LetterFeedback, Verdict};
use crate::oracle::{check_guess, FeedbackOracle, OracleError};

/// Mock implementation of the FeedbackOracle trait.
///
/// Scores guesses against a hidden word with the usual duplicate-letter
/// rules: exact matches first, then each remaining occurrence of a hidden
/// letter turns at most one other guessed occurrence `present`.
///
/// # Example
///
/// ```rust,ignore
/// let oracle = MockOracle::new("planet");
/// oracle.fail_next(2).await;
///
/// assert!(oracle.guess("aaaaaa").await.is_err());
/// assert!(oracle.guess("aaaaaa").await.is_err());
/// let verdicts = oracle.guess("aaaaaa").await?;
///
/// assert_eq!(oracle.recorded_guesses().await.len(), 3);
/// ```
#[derive(Debug)]
pub struct MockOracle {
    hidden: Vec<char>,
    /// Every guess received, failed ones included.
    guesses: Arc<RwLock<Vec<String>>>,
    /// Number of upcoming calls that fail.
    fail_next: Arc<RwLock<usize>>,
    /// Words that always fail.
    fail_words: Arc<RwLock<HashSet<String>>>,
}

impl MockOracle {
    /// Create a mock oracle hiding `word`.
    pub fn new(word: &str) -> Self {
        Self {
            hidden: word.to_lowercase().chars().collect(),
            guesses: Arc::new(RwLock::new(Vec::new())),
            fail_next: Arc::new(RwLock::new(0)),
            fail_words: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Make the next `count` calls fail with a timeout.
    pub async fn fail_next(&self, count: usize) {
        *self.fail_next.write().await = count;
    }

    /// Make every call guessing `word` fail with a connection error.
    pub async fn fail_on(&self, word: &str) {
        self.fail_words.write().await.insert(word.to_string());
    }

    /// Guesses received so far, in order.
    pub async fn recorded_guesses(&self) -> Vec<String> {
        self.guesses.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.guesses.read().await.len()
    }

    /// Score `word` against the hidden word.
    pub fn score(&self, word: &str) -> Vec<LetterFeedback> {
        let guess: Vec<char> = word.chars().collect();
        let mut verdicts = vec![Verdict::Absent; guess.len()];
        let mut unmatched: Vec<char> = Vec::new();

        for (slot, letter) in guess.iter().enumerate() {
            if self.hidden.get(slot) == Some(letter) {
                verdicts[slot] = Verdict::Correct;
            } else if let Some(hidden) = self.hidden.get(slot) {
                unmatched.push(*hidden);
            }
        }
        for (slot, letter) in guess.iter().enumerate() {
            if verdicts[slot] == Verdict::Correct {
                continue;
            }
            if let Some(pos) = unmatched.iter().position(|c| c == letter) {
                unmatched.swap_remove(pos);
                verdicts[slot] = Verdict::Present;
            }
        }

        guess
            .into_iter()
            .zip(verdicts)
            .enumerate()
            .map(|(slot, (letter, verdict))| LetterFeedback::new(slot, letter, verdict))
            .collect()
    }
}

#[async_trait]
impl FeedbackOracle for MockOracle {
    fn name(&self) -> &str {
        "mock"
    }

    fn word_size(&self) -> usize {
        self.hidden.len()
    }

    async fn guess(&self, word: &str) -> Result<Vec<LetterFeedback>, OracleError> {
        self.guesses.write().await.push(word.to_string());

        {
            let mut fail_next = self.fail_next.write().await;
            if *fail_next > 0 {
                *fail_next -= 1;
                return Err(OracleError::Timeout);
            }
        }
        if self.fail_words.read().await.contains(word) {
            return Err(OracleError::ConnectionFailed("mock failure".to_string()));
        }

        check_guess(self.hidden.len(), word)?;
        Ok(self.score(word))
    }
}
