//! Endpoint tests against the in-process router.

mod common;

use axum::http::StatusCode;
use common::TestFixture;
use guesswork_core::{Config, SolverConfig};

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new("planet").await;
    let response = fixture.get("/api/v1/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_play_daily_returns_outcome_text() {
    let fixture = TestFixture::new("planet").await;
    fixture.suggester.push_word("planet").await;

    let response = fixture.get("/play/daily").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .content_type
        .as_deref()
        .is_some_and(|c| c.starts_with("text/plain")));
    assert_eq!(response.text, "Solved in 2 attempts: planet");
    assert_eq!(
        fixture.oracle.recorded_guesses().await,
        vec!["aaaaaa", "planet"]
    );
}

#[tokio::test]
async fn test_play_daily_without_suggestions_still_solves() {
    let fixture = TestFixture::new("planet").await;
    let response = fixture.get("/play/daily").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.ends_with(": planet"), "{}", response.text);
}

#[tokio::test]
async fn test_play_daily_exhausted() {
    let config = Config {
        solver: SolverConfig {
            max_attempts: 1,
            rng_seed: Some(1),
            ..Default::default()
        },
        ..Default::default()
    };
    let fixture = TestFixture::with_config("planet", config).await;
    let response = fixture.get("/play/daily").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "Failed after 1 attempts. Best guess: __a___");
}

#[tokio::test]
async fn test_smart_play_daily_returns_word() {
    let fixture = TestFixture::new("apart").await;
    let response = fixture.get("/smart/play/daily").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "apart");
}

#[tokio::test]
async fn test_smart_play_daily_partial_word() {
    let fixture = TestFixture::new("apart").await;
    fixture.oracle.fail_on("ttttt").await;

    let response = fixture.get("/smart/play/daily").await;
    assert_eq!(response.text, "apar");
}

#[tokio::test]
async fn test_solve_report_json() {
    let fixture = TestFixture::new("crane").await;
    fixture.suggester.push_word("crane").await;

    let response = fixture.get("/api/v1/solve").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = &response.body;
    assert_eq!(body["outcome"]["state"], "solved");
    assert_eq!(body["outcome"]["word"], "crane");
    assert_eq!(body["outcome"]["strategy"], "suggestion");
    assert_eq!(body["message"], "Solved in 2 attempts: crane");
    assert_eq!(body["submissions"], 2);
    assert_eq!(body["history"][0]["guess"], "aaaaa");
    assert_eq!(body["history"][0]["strategy"], "opening");
    assert_eq!(body["history"][0]["verdicts"][2]["result"], "correct");
    assert!(body["session_id"].is_string());
}

#[tokio::test]
async fn test_config_is_sanitized() {
    let mut config = Config::default();
    config.suggestion.api_key = Some("sk-secret".to_string());
    let fixture = TestFixture::with_config("planet", config).await;

    let response = fixture.get("/api/v1/config").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["suggestion"]["api_key_configured"], true);
    assert!(!response.text.contains("sk-secret"));
    assert_eq!(response.body["oracle"]["word_size"], 6);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new("crane").await;
    fixture.suggester.push_word("crane").await;
    fixture.get("/play/daily").await;

    let response = fixture.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("guesswork_guesses_submitted_total"));
    assert!(response.text.contains("guesswork_http_requests_total"));
}

#[tokio::test]
async fn test_unknown_route() {
    let fixture = TestFixture::new("planet").await;
    let response = fixture.get("/play/weekly").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
