//! Mutation coordinator
//!
//! Wraps each write so it reports progress, refreshes the list only after
//! the server confirmed the change, and turns failures into errors the
//! edit surface can show.

use crate::cache::QueryCache;
use crate::error::{Result, SyncError};
use crate::notify::{MutationKind, Notification, Notifier};
use admin_api_client::{Result as ApiResult, UserApi};
use admin_core::{User, UserId, UserInput};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs create/update/delete against the API and keeps the cache in step.
///
/// Writes to different users may run concurrently; nothing here serializes
/// them. Each invalidates the cache once its own response has resolved, so
/// the list converges on the server's latest state.
#[derive(Clone)]
pub struct MutationCoordinator {
    api: Arc<dyn UserApi>,
    cache: QueryCache,
    notifier: Arc<dyn Notifier>,
    next_ticket: Arc<AtomicU64>,
}

impl MutationCoordinator {
    pub fn new(api: Arc<dyn UserApi>, cache: QueryCache, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            cache,
            notifier,
            next_ticket: Arc::new(AtomicU64::new(1)),
        }
    }

    /// The cache this coordinator invalidates
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Create a user.
    ///
    /// Age is coerced to an integer here, before anything is sent.
    pub async fn create_user(&self, input: UserInput) -> Result<User> {
        let payload = input.into_payload()?;
        let user = self
            .run(MutationKind::Create, self.api.create_user(&payload))
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Update user `id` with the full form input.
    pub async fn update_user(&self, id: UserId, input: UserInput) -> Result<User> {
        let payload = input.into_payload()?;
        let user = self
            .run(MutationKind::Update, self.api.update_user(id, &payload))
            .await?;

        info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    /// Delete user `id`.
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        self.run(MutationKind::Delete, self.api.delete_user(id))
            .await?;

        info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn run<T, F>(&self, kind: MutationKind, request: F) -> Result<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        self.notifier.notify(Notification::pending(ticket, kind));

        match request.await {
            Ok(value) => {
                self.notifier.notify(Notification::succeeded(ticket, kind));
                self.cache.invalidate();
                Ok(value)
            }
            Err(err) => {
                let err = SyncError::from(err);
                warn!(ticket, ?kind, error = %err, "Mutation failed");
                self.notifier
                    .notify(Notification::failed(ticket, kind, err.user_message()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{MockNotifier, NotificationPhase};
    use admin_api_client::ApiClientError;
    use admin_core::{AdminError, Status, UserPayload};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use mockall::Sequence;
    use std::sync::atomic::AtomicUsize;

    fn user(id: i64) -> User {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        User {
            id: UserId::new(id),
            first_name: "Bo".into(),
            last_name: "X".into(),
            username: None,
            status: Status::Pending,
            age: 25,
            address: "Y".into(),
            created_at: at,
            updated_at: at,
        }
    }

    fn input(age: &str) -> UserInput {
        UserInput {
            first_name: "Bo".into(),
            last_name: "X".into(),
            username: None,
            status: Status::Pending,
            age: age.into(),
            address: "Y".into(),
            password: Some("p".into()),
        }
    }

    /// Answers every write with a canned outcome and counts calls.
    struct ScriptedApi {
        writes: AtomicUsize,
        lists: AtomicUsize,
        reject_with: Option<String>,
    }

    impl ScriptedApi {
        fn accepting() -> Self {
            Self {
                writes: AtomicUsize::new(0),
                lists: AtomicUsize::new(0),
                reject_with: None,
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                reject_with: Some(message.to_string()),
                ..Self::accepting()
            }
        }

        fn outcome(&self, id: i64) -> ApiResult<User> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            match &self.reject_with {
                Some(message) => Err(ApiClientError::Application(message.clone())),
                None => Ok(user(id)),
            }
        }
    }

    #[async_trait]
    impl UserApi for ScriptedApi {
        async fn list_users(&self) -> ApiResult<Vec<User>> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            Ok(vec![user(1)])
        }

        async fn create_user(&self, payload: &UserPayload) -> ApiResult<User> {
            assert_eq!(payload.age, 25);
            self.outcome(1)
        }

        async fn update_user(&self, id: UserId, _payload: &UserPayload) -> ApiResult<User> {
            self.outcome(id.get())
        }

        async fn delete_user(&self, id: UserId) -> ApiResult<()> {
            self.outcome(id.get()).map(|_| ())
        }
    }

    fn coordinator(api: Arc<ScriptedApi>, notifier: MockNotifier) -> MutationCoordinator {
        let cache = QueryCache::new(api.clone());
        MutationCoordinator::new(api, cache, Arc::new(notifier))
    }

    #[tokio::test]
    async fn test_success_notifies_then_invalidates() {
        let api = Arc::new(ScriptedApi::accepting());
        let mut notifier = MockNotifier::new();
        let mut seq = Sequence::new();

        notifier
            .expect_notify()
            .withf(|n| n.phase == NotificationPhase::Pending && n.message == "Loading...")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        notifier
            .expect_notify()
            .withf(|n| n.phase == NotificationPhase::Succeeded && n.message == "User Created!")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let coordinator = coordinator(api.clone(), notifier);
        let created = coordinator.create_user(input("25")).await.unwrap();

        assert_eq!(created.id, UserId::new(1));
        assert!(coordinator.cache().state().is_loading());
        coordinator.cache().fetch_users().await.unwrap();
        assert_eq!(api.lists.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_application_error_is_verbatim_and_keeps_cache() {
        let api = Arc::new(ScriptedApi::rejecting("username taken"));
        let mut notifier = MockNotifier::new();
        let mut seq = Sequence::new();

        notifier
            .expect_notify()
            .withf(|n| n.phase == NotificationPhase::Pending)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        notifier
            .expect_notify()
            .withf(|n| n.phase == NotificationPhase::Failed && n.message == "username taken")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let coordinator = coordinator(api.clone(), notifier);
        let err = coordinator
            .update_user(UserId::new(4), input("25"))
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Application(ref m) if m == "username taken"));
        assert_eq!(coordinator.cache().state(), crate::cache::QueryState::Idle);
        assert_eq!(api.lists.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_age_never_reaches_the_api() {
        let api = Arc::new(ScriptedApi::accepting());
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let coordinator = coordinator(api.clone(), notifier);
        let err = coordinator.create_user(input("NaN")).await.unwrap_err();

        assert!(matches!(
            err,
            SyncError::Validation(AdminError::InvalidAge(_))
        ));
        assert_eq!(api.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_tickets_pair_pending_with_outcome() {
        let api = Arc::new(ScriptedApi::accepting());
        let (notifier, mut rx) = crate::notify::ChannelNotifier::new();
        let cache = QueryCache::new(api.clone());
        let coordinator = MutationCoordinator::new(api, cache, Arc::new(notifier));

        coordinator.delete_user(UserId::new(2)).await.unwrap();
        coordinator.delete_user(UserId::new(3)).await.unwrap();

        let seen: Vec<(u64, NotificationPhase)> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|n| (n.ticket, n.phase))
            .collect();
        assert_eq!(
            seen,
            vec![
                (1, NotificationPhase::Pending),
                (1, NotificationPhase::Succeeded),
                (2, NotificationPhase::Pending),
                (2, NotificationPhase::Succeeded),
            ]
        );
    }
}
