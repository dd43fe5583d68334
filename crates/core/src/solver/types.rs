//! Types for the solver.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::constraint::{AttemptRecord, Strategy};

/// Terminal state of a round-based solving session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SolveOutcome {
    /// Every slot determined.
    Solved {
        word: String,
        /// Round in which the word was found.
        attempts: u32,
        /// Strategy whose guess completed the word.
        strategy: Strategy,
    },
    /// Attempt budget used up.
    Exhausted {
        /// Determined slots verbatim, placeholders elsewhere.
        best_guess: String,
        attempts: u32,
    },
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved { .. })
    }

    /// Human-readable summary returned by the HTTP endpoint.
    pub fn message(&self) -> String {
        match self {
            SolveOutcome::Solved {
                word,
                strategy: Strategy::Exhaustive,
                ..
            } => format!("Solved with exhaustive test: {}", word),
            SolveOutcome::Solved {
                word,
                strategy: Strategy::Permutation,
                ..
            } => format!("Solved with permutation: {}", word),
            SolveOutcome::Solved { word, attempts, .. } => {
                format!("Solved in {} attempts: {}", attempts, word)
            }
            SolveOutcome::Exhausted {
                best_guess,
                attempts,
            } => format!("Failed after {} attempts. Best guess: {}", attempts, best_guess),
        }
    }

    /// Label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            SolveOutcome::Solved { .. } => "solved",
            SolveOutcome::Exhausted { .. } => "exhausted",
        }
    }
}

/// Full record of one round-based solving session.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub session_id: Uuid,
    pub outcome: SolveOutcome,
    pub message: String,
    /// Rounds started.
    pub rounds: u32,
    /// Guesses the oracle answered, probe sweeps included.
    pub submissions: usize,
    pub history: Vec<AttemptRecord>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
