//! Solving strategies driven against a feedback oracle.
//!
//! [`Solver`] runs the round-based attempt loop; [`BatchProbe`] is the
//! one-shot presence probe offered as an alternative mode.

mod batch;
mod config;
mod emergency;
mod runner;
mod stagnation;
mod types;

pub use batch::{BatchOutcome, BatchProbe, CONSONANTS, VOWELS};
pub use config::{BatchConfig, SolverConfig};
pub use emergency::{deterministic_fallback, EmergencyGenerator};
pub use runner::Solver;
pub use stagnation::StagnationDetector;
pub use types::{SolveOutcome, SolveReport};
