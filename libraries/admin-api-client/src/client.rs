//! Main User API client.

use crate::config::AdminConfig;
use crate::error::{ApiClientError, Result};
use crate::types::ApiConfig;
use crate::users::UsersClient;
use admin_core::{User, UserId, UserPayload};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Remote operations the sync layer depends on.
///
/// [`UserApiClient`] is the HTTP implementation; tests and embedders may
/// substitute their own.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// GET `/users`
    async fn list_users(&self) -> Result<Vec<User>>;

    /// POST `/users/create`
    async fn create_user(&self, payload: &UserPayload) -> Result<User>;

    /// PUT `/users/update/{id}`
    async fn update_user(&self, id: UserId, payload: &UserPayload) -> Result<User>;

    /// DELETE `/users/delete/{id}`
    async fn delete_user(&self, id: UserId) -> Result<()>;
}

/// HTTP client for the User API.
///
/// # Example
///
/// ```ignore
/// use admin_api_client::{ApiConfig, UserApiClient};
///
/// let client = UserApiClient::new(ApiConfig::new("http://localhost:3001"))?;
/// let users = client.users().list_users().await?;
/// println!("Found {} users", users.len());
/// ```
#[derive(Clone)]
pub struct UserApiClient {
    http: Client,
    base_url: String,
}

impl UserApiClient {
    /// Create a new client with the given configuration.
    ///
    /// A blank or malformed URL, or a zero timeout, is rejected here rather
    /// than producing requests that silently go nowhere.
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ApiClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url)
            .map_err(|e| ApiClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        if config.timeout == 0 {
            return Err(ApiClientError::Config(
                "timeout must be at least one second".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("UserAdmin/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiClientError::Request)?;

        info!(url = %base_url, "User API client configured");

        Ok(Self { http, base_url })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &AdminConfig) -> Result<Self> {
        Self::new(config.api.clone())
    }

    /// The normalized base URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Access the `/users` endpoints.
    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(&self.http, &self.base_url)
    }
}

#[async_trait]
impl UserApi for UserApiClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.users().list_users().await
    }

    async fn create_user(&self, payload: &UserPayload) -> Result<User> {
        self.users().create_user(payload).await
    }

    async fn update_user(&self, id: UserId, payload: &UserPayload) -> Result<User> {
        self.users().update_user(id, payload).await
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        self.users().delete_user(id).await
    }
}
