//! Feedback and history types shared by the solver components.

use serde::{Deserialize, Serialize};

/// Per-letter verdict returned by the feedback oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The letter sits in this slot.
    Correct,
    /// The letter is in the word, but not in this slot.
    Present,
    /// The letter is not in the word (or not in excess of the occurrences
    /// already accounted for in the same guess).
    Absent,
}

/// Verdict for one slot of a submitted guess.
///
/// The wire form matches the oracle: `{"slot": 0, "guess": "p", "result": "correct"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterFeedback {
    pub slot: usize,
    #[serde(rename = "guess")]
    pub letter: char,
    #[serde(rename = "result")]
    pub verdict: Verdict,
}

impl LetterFeedback {
    pub fn new(slot: usize, letter: char, verdict: Verdict) -> Self {
        Self {
            slot,
            letter,
            verdict,
        }
    }
}

/// Which strategy produced a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// First round, no knowledge yet.
    Opening,
    /// Single-unknown-slot alphabetical sweep.
    Exhaustive,
    /// Permutation of the known-present letters.
    Permutation,
    /// Word proposed by the suggestion service.
    Suggestion,
    /// Randomized emergency candidate.
    Emergency,
    /// Deterministic last-resort candidate.
    Fallback,
    /// Chunked letter-presence or repeated-letter probe.
    Batch,
}

impl Strategy {
    /// Label used for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Opening => "opening",
            Strategy::Exhaustive => "exhaustive",
            Strategy::Permutation => "permutation",
            Strategy::Suggestion => "suggestion",
            Strategy::Emergency => "emergency",
            Strategy::Fallback => "fallback",
            Strategy::Batch => "batch",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submitted guess and the oracle's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub guess: String,
    pub verdicts: Vec<LetterFeedback>,
    pub strategy: Strategy,
}

impl AttemptRecord {
    /// True if every verdict in this attempt is `present`.
    pub fn all_present(&self) -> bool {
        !self.verdicts.is_empty() && self.verdicts.iter().all(|v| v.verdict == Verdict::Present)
    }

    /// Number of slots reported `correct`.
    pub fn correct_count(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| v.verdict == Verdict::Correct)
            .count()
    }
}
