//! Admin panel facade
//!
//! Ties the list cache, the search box and the editing surface together
//! the way the page uses them. A presentation layer renders
//! [`AdminPanel::visible_users`] and forwards intents to the other methods.

use crate::cache::{QueryCache, QueryState};
use crate::error::{Result, SyncError};
use crate::mutation::MutationCoordinator;
use crate::notify::Notifier;
use crate::surface::EditingSurface;
use admin_api_client::{AdminConfig, UserApi, UserApiClient};
use admin_core::{filter_users, User, UserId};
use std::sync::Arc;
use tokio::sync::watch;

pub struct AdminPanel {
    cache: QueryCache,
    surface: EditingSurface,
    search: String,
}

impl AdminPanel {
    pub fn new(api: Arc<dyn UserApi>, notifier: Arc<dyn Notifier>) -> Self {
        let cache = QueryCache::new(Arc::clone(&api));
        let coordinator = MutationCoordinator::new(api, cache.clone(), notifier);

        Self {
            cache,
            surface: EditingSurface::new(coordinator),
            search: String::new(),
        }
    }

    /// Build a panel talking HTTP to the configured API.
    ///
    /// Fails when the configured URL is missing or malformed.
    pub fn connect(config: &AdminConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let client = UserApiClient::from_config(config).map_err(SyncError::Transport)?;
        Ok(Self::new(Arc::new(client), notifier))
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn surface(&self) -> &EditingSurface {
        &self.surface
    }

    /// Observe the list. Starts the initial fetch.
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.cache.subscribe()
    }

    pub fn list_state(&self) -> QueryState {
        self.cache.state()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Users to render: the cached list narrowed by the search text.
    ///
    /// Empty while nothing has been fetched yet; after a failed refetch the
    /// previous list is still shown.
    pub fn visible_users(&self) -> Vec<User> {
        self.cache
            .state()
            .data()
            .map(|users| {
                filter_users(users, &self.search)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn open_create(&mut self) -> Result<()> {
        self.surface.open_create()
    }

    /// Open the surface on a user from the cached list
    pub fn open_edit(&mut self, id: UserId) -> Result<()> {
        let user = self
            .cache
            .state()
            .data()
            .and_then(|users| users.iter().find(|user| user.id == id).cloned())
            .ok_or(SyncError::UserNotFound(id))?;

        self.surface.open_edit(user)
    }

    pub fn close(&mut self) -> Result<()> {
        self.surface.close()
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.surface.set_field_by_name(name, value)
    }

    pub async fn submit(&mut self) -> Result<User> {
        self.surface.submit().await
    }

    pub async fn delete(&mut self) -> Result<()> {
        self.surface.delete().await
    }
}
