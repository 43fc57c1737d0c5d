//! Minimal HTTP capability used by the SDK
//!
//! The provider API is reached through exactly two verbs: an authenticated
//! JSON POST (token exchange) and an authenticated JSON GET (identity and
//! profile). [`HttpClient`] captures that capability so the core flow is
//! transport-agnostic; [`ReqwestHttpClient`] is the production implementation.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Transport-level failures, prior to any interpretation by the SSO flow
#[derive(Debug)]
pub enum HttpError {
    /// The request never produced a response (DNS, TLS, connect, timeout)
    Transport(String),

    /// The provider answered with a non-2xx status
    Status { status: u16, body: String },

    /// The response body was not valid JSON
    InvalidResponse(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Transport(msg) => write!(f, "Transport error: {msg}"),
            HttpError::Status { status, body } => {
                write!(f, "Request failed with status {status}: {body}")
            }
            HttpError::InvalidResponse(msg) => write!(f, "Invalid response: {msg}"),
        }
    }
}

impl std::error::Error for HttpError {}

/// JSON-over-HTTP capability with a caller-supplied `Authorization` value
///
/// The header value arrives fully formed (`Basic ...` or `Bearer ...`); the
/// transport attaches it without inspecting it.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST a JSON body and return the parsed JSON response
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails to send, the provider answers
    /// with a non-2xx status, or the body is not valid JSON.
    async fn post_json(
        &self,
        url: &str,
        authorization: &str,
        body: &Value,
    ) -> Result<Value, HttpError>;

    /// GET and return the parsed JSON response
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails to send, the provider answers
    /// with a non-2xx status, or the body is not valid JSON.
    async fn get_json(&self, url: &str, authorization: &str) -> Result<Value, HttpError>;
}

/// Production transport backed by a shared `reqwest::Client`
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a transport with a fresh connection pool
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Wrap an existing `reqwest::Client` (custom timeouts, proxies, ...)
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, HttpError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HttpError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| HttpError::Transport(format!("Failed to read response body: {e}")))?;
        serde_json::from_str(&text)
            .map_err(|e| HttpError::InvalidResponse(format!("Failed to parse JSON: {e}")))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(
        &self,
        url: &str,
        authorization: &str,
        body: &Value,
    ) -> Result<Value, HttpError> {
        log::debug!("POST {url}");
        let response = self
            .client
            .post(url)
            .header("Authorization", authorization)
            .json(body)
            .send()
            .await
            .map_err(|e| HttpError::Transport(format!("Failed to send request: {e}")))?;

        Self::read_json(response).await
    }

    async fn get_json(&self, url: &str, authorization: &str) -> Result<Value, HttpError> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .header("Authorization", authorization)
            .send()
            .await
            .map_err(|e| HttpError::Transport(format!("Failed to send request: {e}")))?;

        Self::read_json(response).await
    }
}
