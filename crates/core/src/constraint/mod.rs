//! Constraint knowledge derived from oracle feedback.

mod state;
mod types;

pub use state::{ConstraintState, ALPHABET};
pub use types::{AttemptRecord, LetterFeedback, Strategy, Verdict};
