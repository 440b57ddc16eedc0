use crate::notify::GENERIC_FAILURE_MESSAGE;
use admin_api_client::ApiClientError;
use admin_core::{AdminError, UserId};
use thiserror::Error;

/// Errors raised by the cache, the mutation coordinator and the edit surface
#[derive(Error, Debug)]
pub enum SyncError {
    /// Rejected on the client before any request was sent
    #[error("Validation failed: {0}")]
    Validation(#[from] AdminError),

    /// The server answered with a structured `{ error }` body
    #[error("{0}")]
    Application(String),

    /// The request never produced a usable answer
    #[error("Request failed: {0}")]
    Transport(#[source] ApiClientError),

    /// Loading the user list failed
    #[error("Failed to load users: {0}")]
    Fetch(String),

    #[error("Editing surface is closed")]
    SurfaceClosed,

    #[error("A request is already in progress")]
    SurfaceBusy,

    #[error("Only an existing user can be deleted")]
    NotEditing,

    #[error("User not found: {0}")]
    UserNotFound(UserId),
}

impl From<ApiClientError> for SyncError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Application(message) => Self::Application(message),
            other => Self::Transport(other),
        }
    }
}

impl SyncError {
    /// Text to show the user.
    ///
    /// Server messages are passed through verbatim; transport failures
    /// collapse to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Application(message) => message.clone(),
            Self::Transport(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
