//! Error types for the User API client.

use thiserror::Error;

/// Errors that can occur when talking to the User API.
#[derive(Error, Debug)]
pub enum ApiClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-2xx response without a structured error body
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Server answered with a structured `{ "error": ... }` body
    #[error("{0}")]
    Application(String),

    /// Invalid API base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline, unreachable, or timed out
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ApiClientError {
    /// Message the server put in its `error` field, if that is what failed
    pub fn application_message(&self) -> Option<&str> {
        match self {
            Self::Application(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

/// Result type for User API client operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;
