//! Backend client error types.

use thiserror::Error;

/// Message used when the backend gives none.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Errors that can occur when talking to the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Could not reach the backend.
    #[error("Could not reach the server: {0}")]
    Connect(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Failed to send the request or read the reply.
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response. `message` comes from the body when present.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx response with `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Invalid base URL or path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Check if repeating the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Connect(_) | ApiError::Timeout => true,
            ApiError::Http { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }

    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Connect(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
