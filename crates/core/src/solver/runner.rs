//! Round-based solver.
//!
//! Each round picks a strategy in strict priority order:
//! 1. exactly one slot unknown: alphabetical sweep of that slot
//! 2. last attempt all `present`: permutations of the present letters
//! 3. one guess from the suggester, or the emergency generator when the
//!    suggester fails or the recent history is stagnating
//!
//! Rounds are strictly sequential; every guess updates the session's
//! [`ConstraintState`] before the next decision is made.

use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::constraint::{ConstraintState, LetterFeedback, Strategy, Verdict};
use crate::metrics;
use crate::oracle::{FeedbackOracle, OracleError};
use crate::probes::{permutation_applicable, permutation_candidates, single_unknown_candidates};
use crate::suggestion::Suggester;

use super::config::SolverConfig;
use super::emergency::{deterministic_fallback, EmergencyGenerator};
use super::stagnation::StagnationDetector;
use super::types::{SolveOutcome, SolveReport};

/// Per-call session. Nothing here outlives one `solve`.
struct Session {
    state: ConstraintState,
    rng: StdRng,
    submissions: usize,
}

/// Drives the attempt loop against a feedback oracle.
pub struct Solver {
    config: SolverConfig,
    oracle: Arc<dyn FeedbackOracle>,
    suggester: Option<Arc<dyn Suggester>>,
    stagnation: StagnationDetector,
    emergency: EmergencyGenerator,
}

impl Solver {
    pub fn new(config: SolverConfig, oracle: Arc<dyn FeedbackOracle>) -> Self {
        let stagnation = StagnationDetector::from(&config);
        let emergency = EmergencyGenerator::from(&config);
        Self {
            config,
            oracle,
            suggester: None,
            stagnation,
            emergency,
        }
    }

    /// Use `suggester` for non-probe rounds.
    pub fn with_suggester(mut self, suggester: Arc<dyn Suggester>) -> Self {
        self.suggester = Some(suggester);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Run one full solving session.
    ///
    /// Never fails: oracle and suggestion failures degrade to other
    /// strategies, and running out of attempts is reported as
    /// [`SolveOutcome::Exhausted`].
    pub async fn solve(&self) -> SolveReport {
        let session_id = Uuid::new_v4();
        let span = info_span!("solve", session = %session_id);
        self.run(session_id).instrument(span).await
    }

    async fn run(&self, session_id: Uuid) -> SolveReport {
        let started_at = Utc::now();
        let rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut session = Session {
            state: ConstraintState::new(self.oracle.word_size()),
            rng,
            submissions: 0,
        };

        info!(
            oracle = self.oracle.name(),
            word_size = self.oracle.word_size(),
            max_attempts = self.config.max_attempts,
            "Starting solve session"
        );

        let mut rounds = 0;
        let mut outcome = None;
        for attempt in 1..=self.config.max_attempts {
            rounds = attempt;
            if let Some(solved) = self.play_round(&mut session, attempt).await {
                outcome = Some(solved);
                break;
            }
        }

        let outcome = outcome.unwrap_or_else(|| SolveOutcome::Exhausted {
            best_guess: session
                .state
                .partial_reconstruction(self.config.placeholder),
            attempts: self.config.max_attempts,
        });

        metrics::SOLVE_OUTCOMES
            .with_label_values(&[outcome.label()])
            .inc();
        metrics::SOLVE_ROUNDS.observe(rounds as f64);

        let message = outcome.message();
        info!(
            rounds,
            submissions = session.submissions,
            outcome = %message,
            "Solve session finished"
        );

        SolveReport {
            session_id,
            outcome,
            message,
            rounds,
            submissions: session.submissions,
            history: session.state.history().to_vec(),
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Play one round. Returns the outcome if the word was found.
    async fn play_round(&self, session: &mut Session, attempt: u32) -> Option<SolveOutcome> {
        if session.state.unknown_slots().len() == 1 {
            if let Some(word) = self.run_exhaustive(session).await {
                return Some(SolveOutcome::Solved {
                    word,
                    attempts: attempt,
                    strategy: Strategy::Exhaustive,
                });
            }
            info!("Exhaustive sweep did not solve, falling back");
        }

        if permutation_applicable(&session.state, self.config.max_permutation_letters) {
            if let Some(word) = self.run_permutations(session).await {
                return Some(SolveOutcome::Solved {
                    word,
                    attempts: attempt,
                    strategy: Strategy::Permutation,
                });
            }
        }

        let (guess, strategy) = self.next_guess(session).await;
        match self.submit(session, &guess, strategy).await {
            Ok(_) => {
                debug!(
                    attempt,
                    guess = %guess,
                    strategy = %strategy,
                    known = %session.state.partial_reconstruction(self.config.placeholder),
                    "Round complete"
                );
                session.state.solution().map(|word| SolveOutcome::Solved {
                    word,
                    attempts: attempt,
                    strategy,
                })
            }
            Err(e) => {
                warn!(attempt, guess = %guess, error = %e, "Oracle call failed, round lost");
                None
            }
        }
    }

    /// Try every letter in the single open slot, alphabetically.
    async fn run_exhaustive(&self, session: &mut Session) -> Option<String> {
        let candidates = single_unknown_candidates(&session.state);
        info!(count = candidates.len(), "Only one slot unknown, running exhaustive sweep");

        for candidate in candidates {
            if !session.state.is_candidate_valid(&candidate) {
                continue;
            }
            debug!(candidate = %candidate, "Testing exhaustive option");
            if let Err(e) = self.submit(session, &candidate, Strategy::Exhaustive).await {
                warn!(candidate = %candidate, error = %e, "Skipping exhaustive option");
                continue;
            }
            if let Some(word) = session.state.solution() {
                return Some(word);
            }
        }
        None
    }

    /// Submit permutations of the present letters until one solves or
    /// reveals a new correct slot.
    async fn run_permutations(&self, session: &mut Session) -> Option<String> {
        let candidates = permutation_candidates(&session.state);
        info!(count = candidates.len(), "Last guess was all present, testing permutations");

        for candidate in candidates {
            if session.state.was_tried(&candidate) {
                continue;
            }
            debug!(candidate = %candidate, "Testing permutation");
            let verdicts = match self.submit(session, &candidate, Strategy::Permutation).await {
                Ok(v) => v,
                Err(e) => {
                    warn!(candidate = %candidate, error = %e, "Skipping permutation");
                    continue;
                }
            };
            if let Some(word) = session.state.solution() {
                return Some(word);
            }
            if verdicts.iter().any(|v| v.verdict == Verdict::Correct) {
                info!(candidate = %candidate, "Permutation found a correct slot, stopping sweep");
                break;
            }
        }
        None
    }

    /// Pick the round's main guess: opening, suggestion, emergency or fallback.
    async fn next_guess(&self, session: &mut Session) -> (String, Strategy) {
        if session.state.history().is_empty() {
            let opening = self
                .config
                .opening_letter
                .to_string()
                .repeat(session.state.word_size());
            return (opening, Strategy::Opening);
        }

        if self.stagnation.is_stagnating(session.state.history()) {
            warn!("Recent guesses are repeating, skipping suggestion service");
            metrics::STAGNATION_DETECTIONS.inc();
        } else if let Some(suggester) = &self.suggester {
            match suggester.suggest(&session.state).await {
                Ok(word) => return (word, Strategy::Suggestion),
                Err(e) => {
                    warn!(
                        suggester = suggester.name(),
                        reason = e.reason(),
                        error = %e,
                        "Suggestion unusable, using emergency generator"
                    );
                    metrics::SUGGESTION_FAILURES
                        .with_label_values(&[e.reason()])
                        .inc();
                }
            }
        }

        if let Some(word) = self.emergency.generate(&session.state, &mut session.rng) {
            return (word, Strategy::Emergency);
        }
        warn!("Emergency generator found no untried candidate, using deterministic fallback");
        (deterministic_fallback(&session.state), Strategy::Fallback)
    }

    async fn submit(
        &self,
        session: &mut Session,
        guess: &str,
        strategy: Strategy,
    ) -> Result<Vec<LetterFeedback>, OracleError> {
        let verdicts = self.oracle.guess(guess).await?;
        session.submissions += 1;
        metrics::GUESSES_SUBMITTED
            .with_label_values(&[strategy.as_str()])
            .inc();
        session.state.apply_verdicts(guess, &verdicts, strategy);
        Ok(verdicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockOracle, MockSuggester};

    fn seeded_config() -> SolverConfig {
        SolverConfig {
            rng_seed: Some(42),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_opening_guess_is_repeated_letter() {
        let oracle = Arc::new(MockOracle::new("planet"));
        let solver = Solver::new(seeded_config(), oracle.clone());

        let report = solver.solve().await;
        let guesses = oracle.recorded_guesses().await;
        assert_eq!(guesses[0], "aaaaaa");
        assert_eq!(report.history[0].strategy, Strategy::Opening);
    }

    #[tokio::test]
    async fn test_suggestion_is_used() {
        let oracle = Arc::new(MockOracle::new("crane"));
        let suggester = Arc::new(MockSuggester::new());
        suggester.push_word("crane").await;

        let solver = Solver::new(seeded_config(), oracle.clone()).with_suggester(suggester.clone());
        let report = solver.solve().await;

        assert_eq!(report.outcome.message(), "Solved in 2 attempts: crane");
        assert_eq!(report.submissions, 2);
        assert_eq!(suggester.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_failing_suggester_falls_back() {
        let oracle = Arc::new(MockOracle::new("planet"));
        let suggester = Arc::new(MockSuggester::new());

        let solver = Solver::new(seeded_config(), oracle.clone()).with_suggester(suggester.clone());
        let report = solver.solve().await;

        assert!(report.outcome.is_solved());
        assert!(report
            .history
            .iter()
            .all(|a| a.strategy != Strategy::Suggestion));
        assert!(suggester.call_count().await >= 1);
    }

    #[tokio::test]
    async fn test_exhaustive_sweep_in_alphabetical_order() {
        // Hidden "catz": the opening "aaaa" pins slot 1, the suggester
        // pins c and t, leaving only the last slot open.
        let oracle = Arc::new(MockOracle::new("catz"));
        let suggester = Arc::new(MockSuggester::new());
        suggester.push_word("cxty").await;

        let solver = Solver::new(seeded_config(), oracle.clone()).with_suggester(suggester);
        let report = solver.solve().await;

        assert_eq!(report.outcome.message(), "Solved with exhaustive test: catz");
        let guesses = oracle.recorded_guesses().await;
        assert_eq!(guesses[0], "aaaa");
        assert_eq!(guesses[1], "cxty");
        // x and y are absent; the sweep goes a, b, c, ... z.
        assert_eq!(guesses[2], "cata");
        assert_eq!(guesses[3], "catb");
        assert_eq!(report.submissions, 26);
        assert_eq!(guesses.last().map(String::as_str), Some("catz"));
        assert!(!guesses.contains(&"catx".to_string()));
    }

    #[tokio::test]
    async fn test_permutation_sweep() {
        let oracle = Arc::new(MockOracle::new("ta"));
        let suggester = Arc::new(MockSuggester::new());
        suggester.push_word("at").await;

        let config = SolverConfig {
            opening_letter: 'x',
            ..seeded_config()
        };
        let solver = Solver::new(config, oracle.clone()).with_suggester(suggester);
        let report = solver.solve().await;

        assert_eq!(report.outcome.message(), "Solved with permutation: ta");
        assert_eq!(oracle.recorded_guesses().await, vec!["xx", "at", "ta"]);
    }

    #[tokio::test]
    async fn test_exhausted_reports_partial_word() {
        let oracle = Arc::new(MockOracle::new("planet"));
        let config = SolverConfig {
            max_attempts: 1,
            ..seeded_config()
        };
        let report = Solver::new(config, oracle).solve().await;

        assert_eq!(
            report.outcome,
            SolveOutcome::Exhausted {
                best_guess: "__a___".to_string(),
                attempts: 1,
            }
        );
        assert_eq!(
            report.message,
            "Failed after 1 attempts. Best guess: __a___"
        );
    }

    #[tokio::test]
    async fn test_oracle_failure_costs_the_round_only() {
        let oracle = Arc::new(MockOracle::new("planet"));
        oracle.fail_next(1).await;
        let report = Solver::new(seeded_config(), oracle.clone()).solve().await;

        assert!(report.outcome.is_solved());
        assert_eq!(report.submissions, report.history.len());
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_state() {
        let oracle = Arc::new(MockOracle::new("crane"));
        let solver = Arc::new(Solver::new(seeded_config(), oracle));

        let (a, b) = tokio::join!(solver.solve(), solver.solve());
        assert!(a.outcome.is_solved());
        assert!(b.outcome.is_solved());
        assert_ne!(a.session_id, b.session_id);
        assert_eq!(a.history[0].guess, "aaaaa");
        assert_eq!(b.history[0].guess, "aaaaa");
    }

    #[tokio::test]
    async fn test_stagnation_bypasses_suggester() {
        let oracle = Arc::new(MockOracle::new("planet"));
        let suggester = Arc::new(MockSuggester::new());
        for _ in 0..3 {
            suggester.push_word("aaaaab").await;
        }
        let config = SolverConfig {
            stagnation_min_entries: 2,
            stagnation_max_distinct: 2,
            ..seeded_config()
        };
        let solver = Solver::new(config, oracle).with_suggester(suggester.clone());
        let report = solver.solve().await;

        // Two entries with two distinct guesses: round three skips the suggester.
        assert_eq!(report.history[1].strategy, Strategy::Suggestion);
        assert_eq!(report.history[2].strategy, Strategy::Emergency);
    }

    #[tokio::test]
    async fn test_repeated_guess_triggers_stagnation_on_fourth_round() {
        // The suggester here hands back a word already tried, so history
        // reads [aaaaa, bbbbb, aaaaa] under the default detector settings.
        let oracle = Arc::new(MockOracle::new("crane"));
        let suggester = Arc::new(MockSuggester::new());
        suggester.push_word("bbbbb").await;
        suggester.push_word("aaaaa").await;
        let config = SolverConfig {
            max_attempts: 4,
            ..seeded_config()
        };
        let solver = Solver::new(config, oracle.clone()).with_suggester(suggester.clone());
        let report = solver.solve().await;

        let guesses = oracle.recorded_guesses().await;
        assert_eq!(&guesses[..3], &["aaaaa", "bbbbb", "aaaaa"]);
        assert_eq!(report.history[3].strategy, Strategy::Emergency);
        assert_eq!(suggester.call_count().await, 2);
    }
}
