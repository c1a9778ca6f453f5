//! HTTP transport abstraction.
//!
//! The client issues requests through [`Transport`] so callers can supply
//! their own HTTP stack or a test double.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use url::Url;

use super::config::ClientConfig;
use super::error::ClientError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: StatusCode,

    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Capability for issuing HTTP GET requests.
///
/// Dropping the returned future must abort the request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET request against `url` and reads the full body.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received.
    async fn get(&self, url: &Url) -> Result<TransportResponse, ClientError>;
}

/// Transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(&config.user_agent)
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { http })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, ClientError> {
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        Ok(TransportResponse { status, body })
    }
}
