//! User endpoints of the remote API.

use crate::error::{ApiClientError, Result};
use crate::types::Envelope;
use admin_core::{User, UserId, UserPayload};
use reqwest::{Client, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, warn};

/// Client for the `/users` endpoints.
pub struct UsersClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Fetch the full user list.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = format!("{}/users", self.base_url);
        debug!(url = %url, "Fetching users");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ApiClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let users: Vec<User> = response.json().await.map_err(|e| {
                ApiClientError::ParseError(format!("Failed to parse user list: {}", e))
            })?;

            debug!(users = users.len(), "Fetched users");

            Ok(users)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(error_from_body(status.as_u16(), body))
        }
    }

    /// Create a user.
    ///
    /// The server assigns the id and timestamps of the returned record.
    pub async fn create_user(&self, payload: &UserPayload) -> Result<User> {
        let url = format!("{}/users/create", self.base_url);
        debug!(url = %url, first_name = %payload.first_name, "Creating user");

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(ApiClientError::from_send)?;

        read_envelope(response, "create").await
    }

    /// Replace the stored fields of user `id`.
    pub async fn update_user(&self, id: UserId, payload: &UserPayload) -> Result<User> {
        let url = format!("{}/users/update/{}", self.base_url, id);
        debug!(url = %url, user_id = %id, "Updating user");

        let response = self
            .http
            .put(&url)
            .json(payload)
            .send()
            .await
            .map_err(ApiClientError::from_send)?;

        read_envelope(response, "update").await
    }

    /// Delete user `id`.
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        let url = format!("{}/users/delete/{}", self.base_url, id);
        debug!(url = %url, user_id = %id, "Deleting user");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(ApiClientError::from_send)?;

        let _: IgnoredAny = read_envelope(response, "delete").await?;
        Ok(())
    }
}

/// Decode a `{ data }` / `{ error }` body.
///
/// A structured error wins regardless of HTTP status; a non-2xx response
/// without one is a plain server error.
async fn read_envelope<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(error_from_body(status.as_u16(), body));
    }

    let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
        ApiClientError::ParseError(format!("Failed to parse {} response: {}", operation, e))
    })?;

    if let Some(message) = envelope.error_message() {
        warn!(operation, error = %message, "Server rejected request");
        return Err(ApiClientError::Application(message.to_string()));
    }

    envelope.data.ok_or_else(|| {
        ApiClientError::ParseError(format!("{} response carried neither data nor error", operation))
    })
}

fn error_from_body(status: u16, body: String) -> ApiClientError {
    let structured = serde_json::from_str::<Envelope<IgnoredAny>>(&body)
        .ok()
        .and_then(|envelope| envelope.error_message().map(str::to_string));

    match structured {
        Some(message) => {
            warn!(status, error = %message, "Server rejected request");
            ApiClientError::Application(message)
        }
        None => ApiClientError::ServerError {
            status,
            message: body,
        },
    }
}
