//! Combinatorial candidate enumeration.
//!
//! These are pure functions over a [`ConstraintState`](crate::constraint::ConstraintState);
//! submitting the candidates and deciding when to stop is the solver's job.

mod exhaustive;
mod permutation;

pub use exhaustive::single_unknown_candidates;
pub use permutation::{permutation_applicable, permutation_candidates, permutations};
