pub mod config;
pub mod constraint;
pub mod metrics;
pub mod oracle;
pub mod probes;
pub mod solver;
pub mod suggestion;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, OracleConfig,
    SanitizedConfig, ServerConfig,
};
pub use constraint::{AttemptRecord, ConstraintState, LetterFeedback, Strategy, Verdict};
pub use oracle::{FeedbackOracle, HttpOracle, OracleError};
pub use solver::{
    BatchConfig, BatchOutcome, BatchProbe, SolveOutcome, SolveReport, Solver, SolverConfig,
};
pub use suggestion::{
    ChatCompletionsClient, LlmClient, LlmError, LlmProvider, LlmSuggester, Suggester,
    SuggestionConfig, SuggestionError,
};
