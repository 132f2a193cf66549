//! Skills Client: the single point of entry for all calls to the EMSI skills API.
//!
//! Two endpoints: the OAuth2 token endpoint (client-credentials grant) and the
//! skills extraction endpoint. No other module talks to the provider directly.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

pub mod token;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_EXPIRES_IN: i64 = 3600;

#[derive(Debug, Error)]
pub enum SkillsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Access token unavailable: {0}")]
    TokenUnavailable(String),
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
    scope: &'a str,
}

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    text: &'a str,
}

/// Body of a successful token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    /// Lifetime in seconds. The provider normally sends 3600.
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

fn default_expires_in() -> i64 {
    DEFAULT_EXPIRES_IN
}

/// HTTP client for the skills provider.
#[derive(Clone)]
pub struct SkillsClient {
    client: Client,
    auth_url: String,
    extract_url: String,
    retry_base_delay: Duration,
}

impl SkillsClient {
    pub fn new(auth_url: impl Into<String>, extract_url: impl Into<String>) -> Result<Self, SkillsError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            auth_url: auth_url.into(),
            extract_url: extract_url.into(),
            retry_base_delay: Duration::from_millis(1000),
        })
    }

    /// Overrides the first backoff step; later steps double it.
    #[cfg(test)]
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Requests a bearer token with the client-credentials grant.
    /// Every failure (unreachable host, non-success status, unreadable body) is
    /// reported as `TokenUnavailable`.
    pub async fn request_token(
        &self,
        client_id: &str,
        client_secret: &str,
        scope: &str,
    ) -> Result<TokenResponse, SkillsError> {
        let form = TokenRequest {
            client_id,
            client_secret,
            grant_type: "client_credentials",
            scope,
        };

        let response = self
            .client
            .post(&self.auth_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!("Token endpoint unreachable: {e}");
                SkillsError::TokenUnavailable(format!("token endpoint unreachable: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Token endpoint returned {}: {}", status, body);
            return Err(SkillsError::TokenUnavailable(format!(
                "token endpoint returned status {}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SkillsError::TokenUnavailable(format!("token response unreadable: {e}")))?;

        serde_json::from_str::<TokenResponse>(&body).map_err(|e| {
            error!("Token endpoint returned a non-JSON body: {}", body);
            SkillsError::TokenUnavailable(format!("token response is not valid JSON: {e}"))
        })
    }

    /// Sends a document to the extraction endpoint and returns the parsed JSON verbatim.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn extract_skills(&self, access_token: &str, text: &str) -> Result<Value, SkillsError> {
        let request_body = ExtractRequest { text };

        let mut last_error: Option<SkillsError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.retry_base_delay * (1 << (attempt - 1));
                warn!(
                    "Skills extraction attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.extract_url)
                .bearer_auth(access_token)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(SkillsError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Skills API returned {}: {}", status, body);
                last_error = Some(SkillsError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(SkillsError::Api {
                    status: status.as_u16(),
                    message: api_error_message(&body),
                });
            }

            let body = response.text().await?;
            let parsed: Value = serde_json::from_str(&body)?;

            debug!("Skills extraction succeeded: {} bytes of text", text.len());

            return Ok(parsed);
        }

        Err(last_error.unwrap_or(SkillsError::Api {
            status: 0,
            message: format!("extraction failed after {MAX_RETRIES} attempts"),
        }))
    }
}

/// Pulls a readable message out of a provider error body.
/// The provider answers with `{"errors":[{"title","detail"}]}` or `{"message"}`.
fn api_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    let first_error = value
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first());

    first_error
        .and_then(|e| e.get("detail").or_else(|| e.get("title")))
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}
