//! Common test utilities for endpoint testing with mocks.
//!
//! This module provides a test fixture that creates an in-process router
//! with a mock oracle and an optional mock suggester, so the solve routes
//! can be exercised without the remote services.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use guesswork_core::{
    testing::{MockOracle, MockSuggester},
    Config, FeedbackOracle, SolverConfig, Suggester,
};
use guesswork_server::{api::create_router, state::AppState};

/// Test fixture with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_play() {
///     let fixture = TestFixture::new("planet").await;
///     let response = fixture.get("/play/daily").await;
///     assert!(response.text.ends_with("planet"));
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock oracle hiding the fixture's word
    pub oracle: Arc<MockOracle>,
    /// Mock suggester - queue words to suggest
    pub suggester: Arc<MockSuggester>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub text: String,
    /// Parsed JSON body, or `Null` for non-JSON bodies.
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture hiding `word`, with a seeded solver.
    pub async fn new(word: &str) -> Self {
        let config = Config {
            solver: SolverConfig {
                rng_seed: Some(42),
                ..Default::default()
            },
            ..Default::default()
        };
        Self::with_config(word, config).await
    }

    pub async fn with_config(word: &str, mut config: Config) -> Self {
        let oracle = Arc::new(MockOracle::new(word));
        let suggester = Arc::new(MockSuggester::new());
        config.oracle.word_size = word.len();

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&oracle) as Arc<dyn FeedbackOracle>,
            Some(Arc::clone(&suggester) as Arc<dyn Suggester>),
        ));
        let router = create_router(state);

        Self {
            router,
            oracle,
            suggester,
        }
    }

    /// Send a GET request to the test router.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            content_type,
            text,
            body,
        }
    }
}
