//! Client-side data synchronization for the user admin panel.
//!
//! - [`QueryCache`]: the fetched user list under the `"users"` key, with
//!   loading/error/success state and invalidation
//! - [`MutationCoordinator`]: create/update/delete with progress
//!   notifications and cache invalidation on confirmed success
//! - [`EditingSurface`]: the create/edit form's state machine
//! - [`AdminPanel`]: the page-level facade a presentation layer drives
//!
//! # Example
//!
//! ```ignore
//! use admin_api_client::AdminConfig;
//! use admin_sync::{AdminPanel, ChannelNotifier};
//! use std::sync::Arc;
//!
//! let (notifier, mut toasts) = ChannelNotifier::new();
//! let mut panel = AdminPanel::connect(&AdminConfig::load()?, Arc::new(notifier))?;
//!
//! panel.cache().fetch_users().await?;
//! panel.set_search("Ann");
//! for user in panel.visible_users() {
//!     println!("{} {}", user.first_name, user.last_name);
//! }
//! ```

mod cache;
mod error;
mod mutation;
mod notify;
mod panel;
mod surface;

pub use cache::{CacheKey, QueryCache, QueryState};
pub use error::{Result, SyncError};
pub use mutation::MutationCoordinator;
pub use notify::{
    ChannelNotifier, MutationKind, Notification, NotificationPhase, Notifier, TracingNotifier,
    GENERIC_FAILURE_MESSAGE, PENDING_MESSAGE,
};
pub use panel::AdminPanel;
pub use surface::{EditingSurface, SurfaceState, SurfaceTarget};
