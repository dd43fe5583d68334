//! Testing utilities and mock implementations.
//!
//! Mocks for the external services the solver talks to, so solving can be
//! exercised end to end without a remote oracle or a language model.
//!
//! # Example
//!
//! ```rust,ignore
//! use guesswork_core::testing::{MockOracle, MockSuggester};
//!
//! let oracle = Arc::new(MockOracle::new("planet"));
//! let suggester = Arc::new(MockSuggester::new());
//! suggester.push_word("plants").await;
//!
//! let solver = Solver::new(SolverConfig::default(), oracle.clone())
//!     .with_suggester(suggester);
//! let report = solver.solve().await;
//! ```

mod mock_oracle;
mod mock_suggester;

pub use mock_oracle::MockOracle;
pub use mock_suggester::{MockLlm, MockSuggester};
