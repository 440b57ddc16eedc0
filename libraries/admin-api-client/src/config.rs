//! Client configuration loading
use crate::error::{ApiClientError, Result};
use crate::types::ApiConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "user-admin.toml";

/// Prefix of environment overrides, e.g. `USER_ADMIN_API_URL`
pub const ENV_PREFIX: &str = "USER_ADMIN";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

impl AdminConfig {
    /// Load configuration from `user-admin.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (or the default one if it
    /// exists), overridden by `USER_ADMIN_*` environment variables.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        Self::build(path, None)
    }

    fn build(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("_")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| ApiClientError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ApiClientError::Config(e.to_string()))
    }
}
