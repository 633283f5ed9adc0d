//! HTTP implementations of the portal collaborators.
//!
//! One client covers both directions: fetching a test definition by slug
//! before an attempt begins, and posting the submission record after it
//! ends. The client never retries; delivery guarantees belong to the
//! caller, not the engine side.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use mockexam_core::model::TestDefinition;
use mockexam_core::results::Submission;
use mockexam_core::traits::{SubmissionSink, TestSource};

use crate::error::ClientError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the education portal's mock-test API.
pub struct PortalClient {
    base_url: String,
    auth_token: Option<String>,
    client: reqwest::Client,
}

impl PortalClient {
    pub fn new(base_url: &str, auth_token: Option<String>) -> Self {
        Self::with_timeout(base_url, auth_token, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, auth_token: Option<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
            client,
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn map_send_error(e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(DEFAULT_TIMEOUT_SECS)
        } else {
            ClientError::NetworkError(e.to_string())
        }
    }
}

#[derive(Deserialize)]
struct PortalErrorBody {
    message: String,
}

/// Extract the portal's error message from a response body, falling back
/// to the raw text.
fn error_message(body: String) -> String {
    serde_json::from_str::<PortalErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body)
}

#[async_trait]
impl TestSource for PortalClient {
    fn name(&self) -> &str {
        "portal"
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn fetch_test(&self, slug: &str) -> anyhow::Result<TestDefinition> {
        let url = format!("{}/api/mock-tests/{slug}", self.base_url);
        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status().as_u16();
        if status == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::AuthenticationFailed(error_message(body)).into());
        }
        if status == 404 {
            return Err(ClientError::TestNotFound(slug.to_string()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ApiError {
                status,
                message: error_message(body),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;
        let definition =
            TestDefinition::from_json_str(&body).map_err(ClientError::InvalidDefinition)?;
        tracing::debug!(
            test = %definition.id,
            questions = definition.question_count(),
            "fetched test definition"
        );
        Ok(definition)
    }
}

#[async_trait]
impl SubmissionSink for PortalClient {
    fn name(&self) -> &str {
        "portal"
    }

    #[instrument(skip(self, submission), fields(test = %submission.test_id))]
    async fn submit(&self, submission: &Submission) -> anyhow::Result<()> {
        let url = format!(
            "{}/api/mock-tests/{}/attempts",
            self.base_url, submission.test_id
        );
        let response = self
            .request(self.client.post(&url))
            .json(submission)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status().as_u16();
        if status == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::AuthenticationFailed(error_message(body)).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ApiError {
                status,
                message: error_message(body),
            }
            .into());
        }

        tracing::debug!(attempt = %submission.attempt_id, "submission reported");
        Ok(())
    }
}
