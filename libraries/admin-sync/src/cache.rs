//! Query cache for the user list.
//!
//! The cache is the single source of truth the presentation layer observes.
//! Its state is only ever written by its own fetch tasks; writes elsewhere
//! reach it by invalidation, which refetches from the server.

use crate::error::{Result, SyncError};
use admin_api_client::{ApiClientError, UserApi};
use admin_core::User;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Identifier a fetched collection is stored and invalidated under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(&'static str);

impl CacheKey {
    /// The user list
    pub const USERS: CacheKey = CacheKey("users");

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Observable state of a cache entry
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    /// Never fetched
    Idle,
    /// A fetch is in flight; `previous` is still displayable
    Loading { previous: Option<Arc<Vec<User>>> },
    /// Last fetch succeeded
    Success {
        data: Arc<Vec<User>>,
        fetched_at: DateTime<Utc>,
    },
    /// Last fetch failed; `previous` is still displayable
    Error {
        message: String,
        previous: Option<Arc<Vec<User>>>,
    },
}

impl QueryState {
    /// The list a view should render, stale or not
    pub fn data(&self) -> Option<&Arc<Vec<User>>> {
        match self {
            QueryState::Idle => None,
            QueryState::Loading { previous } | QueryState::Error { previous, .. } => {
                previous.as_ref()
            }
            QueryState::Success { data, .. } => Some(data),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading { .. })
    }

    /// Whether the last fetch has finished, successfully or not
    pub fn is_settled(&self) -> bool {
        matches!(self, QueryState::Success { .. } | QueryState::Error { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    fn settled_result(&self) -> Option<Result<Arc<Vec<User>>>> {
        match self {
            QueryState::Success { data, .. } => Some(Ok(Arc::clone(data))),
            QueryState::Error { message, .. } => Some(Err(SyncError::Fetch(message.clone()))),
            QueryState::Idle | QueryState::Loading { .. } => None,
        }
    }
}

/// Shared, refetchable view of the server's user list.
///
/// Cloning yields another handle to the same entry, so every consumer
/// observes the same state.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    key: CacheKey,
    api: Arc<dyn UserApi>,
    state: watch::Sender<QueryState>,
    // All state writes happen while this is held.
    fetch: Mutex<FetchSlot>,
}

#[derive(Default)]
struct FetchSlot {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl QueryCache {
    /// Create an empty cache for the user list
    pub fn new(api: Arc<dyn UserApi>) -> Self {
        Self::with_key(CacheKey::USERS, api)
    }

    pub fn with_key(key: CacheKey, api: Arc<dyn UserApi>) -> Self {
        let (state, _) = watch::channel(QueryState::Idle);

        Self {
            inner: Arc::new(CacheInner {
                key,
                api,
                state,
                fetch: Mutex::new(FetchSlot::default()),
            }),
        }
    }

    pub fn key(&self) -> CacheKey {
        self.inner.key
    }

    /// Snapshot of the current state
    pub fn state(&self) -> QueryState {
        self.inner.state.borrow().clone()
    }

    /// Observe the entry.
    ///
    /// The first observation of an entry that was never fetched starts a
    /// fetch. Must be called from within a Tokio runtime for that fetch to run.
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        let rx = self.inner.state.subscribe();
        self.inner
            .start_fetch_if(|state| matches!(state, QueryState::Idle));
        rx
    }

    /// Get the user list, fetching it if it is absent or the last fetch failed.
    ///
    /// Concurrent callers share a single in-flight fetch.
    pub async fn fetch_users(&self) -> Result<Arc<Vec<User>>> {
        let rx = self.inner.state.subscribe();
        self.inner.start_fetch_if(|state| {
            matches!(state, QueryState::Idle | QueryState::Error { .. })
        });
        Self::wait_settled(rx).await
    }

    /// Mark the entry stale and refetch in the background.
    ///
    /// Any fetch still in flight is superseded: it is aborted and its result
    /// would be discarded, so back-to-back invalidations settle once.
    pub fn invalidate(&self) {
        debug!(key = %self.inner.key, "Invalidating cache entry");
        self.inner.start_fetch_if(|_| true);
    }

    /// Invalidate and wait for the resulting fetch to settle
    pub async fn refetch(&self) -> Result<Arc<Vec<User>>> {
        let rx = self.inner.state.subscribe();
        self.invalidate();
        Self::wait_settled(rx).await
    }

    async fn wait_settled(mut rx: watch::Receiver<QueryState>) -> Result<Arc<Vec<User>>> {
        let state = rx
            .wait_for(QueryState::is_settled)
            .await
            .map_err(|_| SyncError::Fetch("cache was dropped".to_string()))?;

        state
            .settled_result()
            .unwrap_or_else(|| Err(SyncError::Fetch("fetch did not settle".to_string())))
    }
}

impl CacheInner {
    fn lock_slot(&self) -> MutexGuard<'_, FetchSlot> {
        self.fetch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_fetch_if(self: &Arc<Self>, should_fetch: impl FnOnce(&QueryState) -> bool) {
        let mut slot = self.lock_slot();

        let current = self.state.borrow().clone();
        if !should_fetch(&current) {
            return;
        }

        slot.generation += 1;
        let generation = slot.generation;

        if let Some(task) = slot.task.take() {
            debug!(key = %self.key, "Superseding in-flight fetch");
            task.abort();
        }

        // Already loading: keep the single Loading transition observers saw.
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                return false;
            }
            let previous = state.data().cloned();
            *state = QueryState::Loading { previous };
            true
        });

        let Ok(runtime) = Handle::try_current() else {
            warn!(key = %self.key, "No async runtime available to fetch users");
            self.state.send_modify(|state| {
                let previous = state.data().cloned();
                *state = QueryState::Error {
                    message: "no async runtime available".to_string(),
                    previous,
                };
            });
            return;
        };

        let inner = Arc::clone(self);
        slot.task = Some(runtime.spawn(async move {
            let result = inner.api.list_users().await;
            inner.settle(generation, result);
        }));
    }

    fn settle(&self, generation: u64, result: std::result::Result<Vec<User>, ApiClientError>) {
        let mut slot = self.lock_slot();

        if slot.generation != generation {
            debug!(key = %self.key, generation, "Discarding superseded fetch result");
            return;
        }
        slot.task = None;

        match result {
            Ok(users) => {
                info!(key = %self.key, users = users.len(), "Cache entry refreshed");
                self.state.send_modify(|state| {
                    *state = QueryState::Success {
                        data: Arc::new(users),
                        fetched_at: Utc::now(),
                    };
                });
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "Failed to fetch users");
                self.state.send_modify(|state| {
                    let previous = state.data().cloned();
                    *state = QueryState::Error {
                        message: err.to_string(),
                        previous,
                    };
                });
            }
        }
    }
}
