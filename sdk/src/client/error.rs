//! Client error types.
//!
//! Provides error types for HTTP client operations.

use std::fmt;

use reqwest::StatusCode;

use crate::error::SdkError;

/// Client errors.
#[derive(Debug)]
pub enum ClientError {
    /// Caller input rejected before any request was sent.
    InvalidArgument(String),

    /// Server answered with a non-success status. The body is not parsed.
    RequestFailed {
        /// HTTP status returned by the server.
        status: StatusCode,
    },

    /// Response body could not be parsed into the expected shape.
    MalformedResponse(String),

    /// Request was cancelled by the caller before a response arrived.
    Cancelled,

    /// HTTP request failed before a response was received.
    Request(reqwest::Error),

    /// Transport failure reported by a non-reqwest transport.
    Transport(String),

    /// Request timeout.
    Timeout,

    /// Invalid configuration.
    InvalidConfig(String),
}

impl ClientError {
    /// Returns the HTTP status for `RequestFailed` errors.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestFailed { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the request was cancelled by the caller.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true if no response was received at all.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Transport(_) | Self::Timeout)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Self::RequestFailed { status } => write!(f, "request failed with status {}", status),
            Self::MalformedResponse(msg) => write!(f, "malformed response: {}", msg),
            Self::Cancelled => write!(f, "request cancelled"),
            Self::Request(e) => write!(f, "HTTP request failed: {}", e),
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
            Self::Timeout => write!(f, "request timeout"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}

impl From<SdkError> for ClientError {
    fn from(err: SdkError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
