//! Hosted backend clients — identity (GoTrue-style) and row storage
//! (PostgREST-style).
//!
//! DESIGN
//! ======
//! Each external collaborator sits behind an async trait
//! ([`auth::IdentityProvider`], [`profile::ProfileStore`]) so the account
//! services can be exercised against in-memory mocks. The HTTP
//! implementations are thin: build the request, check the status, and hand
//! the body to a pure `parse_*` function.

pub mod auth;
pub mod profile;

use std::time::Duration;

use crate::config::{BackendConfig, Timeouts};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend client operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("backend request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend error (status {status}): {message}")]
    Response { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("backend response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The operation needs a signed-in session.
    #[error("not signed in")]
    NotSignedIn,
}

impl BackendError {
    /// Whether repeating the same request may succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }

    /// Build a [`BackendError::Response`] from a raw error body, preferring
    /// the backend's own message field when one is present.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Response { status, message: error_message(body) }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Identity errors use `error_description` or `msg`; row-storage errors use
/// `message`. Anything else is returned verbatim.
#[must_use]
pub fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map_or_else(|| body.trim().to_string(), str::to_string)
}

// =============================================================================
// HTTP
// =============================================================================

/// Shared HTTP settings for both backend clients.
#[derive(Debug, Clone)]
pub struct BackendHttp {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) anon_key: String,
}

impl BackendHttp {
    /// # Errors
    ///
    /// Returns [`BackendError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        Ok(Self {
            http: build_http(config.timeouts)?,
            base_url: config.base_url.clone(),
            anon_key: config.anon_key.clone(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Start a request carrying the `apikey` header and a bearer token (the
    /// session token when signed in, else the anon key).
    pub(crate) fn request(&self, method: reqwest::Method, path: &str, bearer: Option<&str>) -> reqwest::RequestBuilder {
        let token = bearer.unwrap_or(&self.anon_key);
        self.http
            .request(method, self.url(path))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    /// Send a request and return the body of a successful response.
    pub(crate) async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, BackendError> {
        let response = request.send().await.map_err(|e| BackendError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| BackendError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            tracing::debug!(status, "backend returned error status");
            return Err(BackendError::from_response(status, &body));
        }
        Ok(body)
    }
}

fn build_http(timeouts: Timeouts) -> Result<reqwest::Client, BackendError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .user_agent(concat!("trailguide/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| BackendError::HttpClientBuild(e.to_string()))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
