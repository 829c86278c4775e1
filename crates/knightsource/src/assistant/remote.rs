use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::debug;

use super::service::{AnswerError, AnswerSource};

/// Answer service reached with `GET <endpoint>?prompt=<question>`, expecting a
/// plain-text body.
#[derive(Debug, Clone)]
pub struct HttpAnswerSource {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpAnswerSource {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnswerSource for HttpAnswerSource {
    async fn answer(&self, question: &str) -> Result<String, AnswerError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("prompt", question)])
            .header(ACCEPT, "text/plain")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| AnswerError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), %body, "answer service rejected prompt");
            return Err(AnswerError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|err| AnswerError::Unavailable(err.to_string()))
    }
}
