//! HTTP feedback oracle.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::OracleConfig;
use crate::constraint::LetterFeedback;
use crate::metrics;

use super::{check_guess, normalize_feedback, FeedbackOracle, OracleError};

/// Oracle backed by the remote daily-puzzle service.
///
/// Each guess is a `GET {base_url}/daily?guess=<word>&size=<n>` returning a
/// JSON array of `{slot, guess, result}` objects.
pub struct HttpOracle {
    client: Client,
    config: OracleConfig,
}

impl HttpOracle {
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| OracleError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn build_url(&self, word: &str) -> String {
        format!(
            "{}/daily?guess={}&size={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(word),
            self.config.word_size
        )
    }
}

#[async_trait]
impl FeedbackOracle for HttpOracle {
    fn name(&self) -> &str {
        "http"
    }

    fn word_size(&self) -> usize {
        self.config.word_size
    }

    async fn guess(&self, word: &str) -> Result<Vec<LetterFeedback>, OracleError> {
        check_guess(self.config.word_size, word)?;

        let url = self.build_url(word);
        debug!(guess = word, "Submitting guess to oracle");

        let result = async {
            let response = self.client.get(&url).send().await.map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout
                } else if e.is_connect() {
                    OracleError::ConnectionFailed(e.to_string())
                } else {
                    OracleError::ApiError(e.to_string())
                }
            })?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(OracleError::ApiError(format!(
                    "HTTP {}: {}",
                    status,
                    body.chars().take(200).collect::<String>()
                )));
            }

            let feedback: Vec<LetterFeedback> = response
                .json()
                .await
                .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;

            normalize_feedback(self.config.word_size, feedback)
        }
        .await;

        if result.is_err() {
            metrics::ORACLE_ERRORS.inc();
        }
        result
    }
}
