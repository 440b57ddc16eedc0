//! Mutation notifications
//!
//! Progress feedback for writes, the data a toast would render:
//! - `Pending` when a request goes out
//! - `Succeeded` once the server confirmed it
//! - `Failed` with either the server's message or a generic one
//!
//! A pending notification and its outcome share a ticket so a UI can
//! replace one with the other.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Shown while a request is in flight
pub const PENDING_MESSAGE: &str = "Loading...";

/// Shown when a request failed without a server-provided message
pub const GENERIC_FAILURE_MESSAGE: &str = "Error!";

/// Which write a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn success_message(self) -> &'static str {
        match self {
            MutationKind::Create => "User Created!",
            MutationKind::Update => "User Updated!",
            MutationKind::Delete => "User Deleted!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPhase {
    Pending,
    Succeeded,
    Failed,
}

/// One progress update for a write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Shared by a pending notification and its outcome
    pub ticket: u64,
    pub kind: MutationKind,
    pub phase: NotificationPhase,
    pub message: String,
}

impl Notification {
    pub fn pending(ticket: u64, kind: MutationKind) -> Self {
        Self {
            ticket,
            kind,
            phase: NotificationPhase::Pending,
            message: PENDING_MESSAGE.to_string(),
        }
    }

    pub fn succeeded(ticket: u64, kind: MutationKind) -> Self {
        Self {
            ticket,
            kind,
            phase: NotificationPhase::Succeeded,
            message: kind.success_message().to_string(),
        }
    }

    pub fn failed(ticket: u64, kind: MutationKind, message: impl Into<String>) -> Self {
        Self {
            ticket,
            kind,
            phase: NotificationPhase::Failed,
            message: message.into(),
        }
    }
}

/// Receives mutation progress
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            ticket,
            kind,
            phase,
            message,
        } = notification;

        match phase {
            NotificationPhase::Pending => debug!(ticket, ?kind, "{}", message),
            NotificationPhase::Succeeded => info!(ticket, ?kind, "{}", message),
            NotificationPhase::Failed => warn!(ticket, ?kind, "{}", message),
        }
    }
}

/// Forwards notifications to a channel the presentation layer drains
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            debug!("Notification receiver dropped");
        }
    }
}
