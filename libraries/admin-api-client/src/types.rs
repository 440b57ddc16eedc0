//! Types for User API requests and responses.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for connecting to the User API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the API (e.g., "https://admin.example.com/api")
    #[serde(default)]
    pub url: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl ApiConfig {
    /// Create a config for `url` with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: default_timeout(),
        }
    }

    /// Override the request timeout. Whole seconds; anything shorter than
    /// one second is rejected when the client is built.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.as_secs();
        self
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

fn default_timeout() -> u64 {
    30
}

// =============================================================================
// Response Envelope
// =============================================================================

/// Body shape of the create, update and delete endpoints.
///
/// Exactly one of `data` or `error` is expected. An empty `error` string
/// counts as absent.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// The server's error message, ignoring empty strings
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}
