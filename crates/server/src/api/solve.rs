//! Solve endpoints.
//!
//! The two play routes answer with plain text, the API route with the full
//! session report. Solving never fails: degraded runs still produce a
//! message, so every handler returns 200.

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

use guesswork_core::SolveReport;

use crate::state::AppState;

/// Run the round-based solver and return its outcome message.
pub async fn play_daily(State(state): State<Arc<AppState>>) -> String {
    let report = state.solver().solve().await;
    report.message
}

/// Run the batch presence probe and return the reconstructed word.
pub async fn smart_play_daily(State(state): State<Arc<AppState>>) -> String {
    let outcome = state.batch_probe().run().await;
    info!(
        word = %outcome.word(),
        submissions = outcome.submissions,
        "Batch probe answered"
    );
    outcome.word()
}

/// Run the round-based solver and return the full session report.
pub async fn solve_report(State(state): State<Arc<AppState>>) -> Json<SolveReport> {
    Json(state.solver().solve().await)
}
