//! User API Client
//!
//! HTTP client library for the remote User API behind the admin panel.
//!
//! # Features
//!
//! - **List**: fetch every user record
//! - **Mutations**: create, update and delete users, decoding the
//!   `{ data }` / `{ error }` response envelope
//! - **Configuration**: base URL and timeout from `user-admin.toml` and
//!   `USER_ADMIN_*` environment variables
//!
//! # Example
//!
//! ```ignore
//! use admin_api_client::{AdminConfig, UserApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AdminConfig::load()?;
//!     let client = UserApiClient::from_config(&config)?;
//!
//!     let users = client.users().list_users().await?;
//!     println!("Found {} users", users.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod types;
mod users;

// Re-export main types
pub use client::{UserApi, UserApiClient};
pub use config::{AdminConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use error::{ApiClientError, Result};
pub use types::ApiConfig;
pub use users::UsersClient;
