//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Solve sessions (outcomes, rounds)
//! - Guess submissions by strategy
//! - External services (oracle, suggestion model)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Solver Metrics
// =============================================================================

/// Solve sessions by outcome.
pub static SOLVE_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("guesswork_solve_sessions_total", "Total solve sessions"),
        &["result"], // "solved", "exhausted"
    )
    .unwrap()
});

/// Rounds used per solve session.
pub static SOLVE_ROUNDS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("guesswork_solve_rounds", "Rounds used per solve session")
            .buckets(vec![1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 34.0, 55.0, 100.0]),
    )
    .unwrap()
});

/// Guesses answered by the oracle, by the strategy that produced them.
pub static GUESSES_SUBMITTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "guesswork_guesses_submitted_total",
            "Total guesses answered by the oracle",
        ),
        &["strategy"],
    )
    .unwrap()
});

/// Rounds in which repetitive history bypassed the suggester.
pub static STAGNATION_DETECTIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "guesswork_stagnation_detections_total",
        "Rounds where recent guesses were too repetitive",
    )
    .unwrap()
});

/// Guesses submitted by the batch presence probe.
pub static BATCH_SUBMISSIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "guesswork_batch_submissions_total",
        "Total guesses submitted by the batch probe",
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// Failed oracle calls.
pub static ORACLE_ERRORS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("guesswork_oracle_errors_total", "Total failed oracle calls").unwrap()
});

/// Suggestions that could not be used, by reason.
pub static SUGGESTION_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "guesswork_suggestion_failures_total",
            "Suggestions rejected or failed",
        ),
        &["reason"],
    )
    .unwrap()
});

/// LLM tokens used.
pub static LLM_TOKENS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("guesswork_llm_tokens_total", "Total LLM tokens used"),
        &["provider", "direction"], // direction: "input", "output"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Solver
        Box::new(SOLVE_OUTCOMES.clone()),
        Box::new(SOLVE_ROUNDS.clone()),
        Box::new(GUESSES_SUBMITTED.clone()),
        Box::new(STAGNATION_DETECTIONS.clone()),
        Box::new(BATCH_SUBMISSIONS.clone()),
        // External services
        Box::new(ORACLE_ERRORS.clone()),
        Box::new(SUGGESTION_FAILURES.clone()),
        Box::new(LLM_TOKENS.clone()),
    ]
}
