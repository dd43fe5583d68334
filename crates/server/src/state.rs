use std::sync::Arc;

use guesswork_core::{
    BatchProbe, Config, FeedbackOracle, SanitizedConfig, Solver, Suggester,
};

/// Shared application state
///
/// Holds only the configuration and the shared service clients. Every
/// request builds its own solver, so sessions never share constraint state.
pub struct AppState {
    config: Config,
    oracle: Arc<dyn FeedbackOracle>,
    suggester: Option<Arc<dyn Suggester>>,
}

impl AppState {
    pub fn new(
        config: Config,
        oracle: Arc<dyn FeedbackOracle>,
        suggester: Option<Arc<dyn Suggester>>,
    ) -> Self {
        Self {
            config,
            oracle,
            suggester,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    /// Round-based solver for one request.
    pub fn solver(&self) -> Solver {
        let solver = Solver::new(self.config.solver.clone(), Arc::clone(&self.oracle));
        match &self.suggester {
            Some(suggester) => solver.with_suggester(Arc::clone(suggester)),
            None => solver,
        }
    }

    /// Batch presence probe for one request.
    pub fn batch_probe(&self) -> BatchProbe {
        BatchProbe::new(self.config.batch.clone(), Arc::clone(&self.oracle))
    }
}
