//! Editing surface state machine
//!
//! ```text
//! Closed --open_create--> Open(Create) --submit--> Submitting --ok--> Closed
//! Closed --open_edit----> Open(Edit)   --submit--> Submitting --err-> Open (error shown)
//!                         Open(Edit)   --delete--> Deleting   --ok--> Closed
//! ```
//!
//! The form is bound to a target. Switching targets reloads it; reopening
//! the target it is already bound to keeps the draft.

use crate::error::{Result, SyncError};
use crate::mutation::MutationCoordinator;
use admin_core::{FormField, FormMode, User, UserForm};
use tracing::debug;

/// What the surface is editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceTarget {
    Create,
    Edit(User),
}

impl SurfaceTarget {
    pub fn user(&self) -> Option<&User> {
        match self {
            SurfaceTarget::Create => None,
            SurfaceTarget::Edit(user) => Some(user),
        }
    }

    pub fn mode(&self) -> FormMode {
        match self {
            SurfaceTarget::Create => FormMode::Create,
            SurfaceTarget::Edit(_) => FormMode::Update,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceState {
    Closed,
    Open {
        target: SurfaceTarget,
        /// Message from the last failed submit or delete
        error: Option<String>,
    },
    Submitting {
        target: SurfaceTarget,
    },
    Deleting {
        target: SurfaceTarget,
    },
}

/// The create/update form overlay.
///
/// Mutating methods take `&mut self`, so a surface runs at most one
/// request at a time. A cancelled submit or delete leaves the surface
/// open on its target, never stuck pending.
pub struct EditingSurface {
    coordinator: MutationCoordinator,
    state: SurfaceState,
    form: UserForm,
    bound: Option<SurfaceTarget>,
}

impl EditingSurface {
    pub fn new(coordinator: MutationCoordinator) -> Self {
        Self {
            coordinator,
            state: SurfaceState::Closed,
            form: UserForm::blank(),
            bound: None,
        }
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, SurfaceState::Closed)
    }

    /// Whether a submit or delete is in flight
    pub fn is_pending(&self) -> bool {
        matches!(
            self.state,
            SurfaceState::Submitting { .. } | SurfaceState::Deleting { .. }
        )
    }

    /// Error shown on the open surface, if any
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SurfaceState::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn open_create(&mut self) -> Result<()> {
        self.open(SurfaceTarget::Create)
    }

    pub fn open_edit(&mut self, user: User) -> Result<()> {
        self.open(SurfaceTarget::Edit(user))
    }

    /// Close without submitting. The draft stays bound to its target.
    pub fn close(&mut self) -> Result<()> {
        if self.is_pending() {
            return Err(SyncError::SurfaceBusy);
        }
        self.state = SurfaceState::Closed;
        Ok(())
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<()> {
        self.open_target()?;
        self.form.set(field, value);
        Ok(())
    }

    /// Set a field addressed by its wire name, e.g. `"firstName"`
    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.open_target()?;
        self.form.set_by_name(name, value)?;
        Ok(())
    }

    /// Submit the form: create in create mode, update in edit mode.
    ///
    /// Closes the surface on success. On any failure the surface returns to
    /// `Open` with the error's user-facing message and the draft intact.
    /// Dropping the future before it resolves also returns it to `Open`;
    /// the request may still have reached the server, and a later refetch
    /// shows whether it did.
    pub async fn submit(&mut self) -> Result<User> {
        let target = self.open_target()?.clone();

        let input = match self.form.to_input(target.mode()) {
            Ok(input) => input,
            Err(err) => return Err(self.reopen(target, SyncError::from(err))),
        };

        let guard = PendingGuard::enter(
            &mut self.state,
            SurfaceState::Submitting {
                target: target.clone(),
            },
        );
        let result = match &target {
            SurfaceTarget::Create => self.coordinator.create_user(input).await,
            SurfaceTarget::Edit(user) => self.coordinator.update_user(user.id, input).await,
        };
        guard.settle();

        match result {
            Ok(user) => {
                self.finish();
                Ok(user)
            }
            Err(err) => Err(self.reopen(target, err)),
        }
    }

    /// Delete the user being edited.
    ///
    /// Cancellation behaves as for [`EditingSurface::submit`].
    pub async fn delete(&mut self) -> Result<()> {
        let target = self.open_target()?.clone();
        let Some(id) = target.user().map(|user| user.id) else {
            return Err(SyncError::NotEditing);
        };

        let guard = PendingGuard::enter(
            &mut self.state,
            SurfaceState::Deleting {
                target: target.clone(),
            },
        );
        let result = self.coordinator.delete_user(id).await;
        guard.settle();

        match result {
            Ok(()) => {
                self.finish();
                Ok(())
            }
            Err(err) => Err(self.reopen(target, err)),
        }
    }

    fn open(&mut self, target: SurfaceTarget) -> Result<()> {
        if self.is_pending() {
            return Err(SyncError::SurfaceBusy);
        }

        if self.bound.as_ref() != Some(&target) {
            debug!(editing = ?target.user().map(|user| user.id), "Loading form for new target");
            self.form.reset(target.user());
            self.bound = Some(target.clone());
        }

        self.state = SurfaceState::Open {
            target,
            error: None,
        };
        Ok(())
    }

    fn open_target(&self) -> Result<&SurfaceTarget> {
        match &self.state {
            SurfaceState::Open { target, .. } => Ok(target),
            SurfaceState::Closed => Err(SyncError::SurfaceClosed),
            SurfaceState::Submitting { .. } | SurfaceState::Deleting { .. } => {
                Err(SyncError::SurfaceBusy)
            }
        }
    }

    fn reopen(&mut self, target: SurfaceTarget, err: SyncError) -> SyncError {
        self.state = SurfaceState::Open {
            target,
            error: Some(err.user_message()),
        };
        err
    }

    // The submitted draft is spent; the next open starts from a fresh form.
    fn finish(&mut self) {
        self.state = SurfaceState::Closed;
        self.bound = None;
        self.form.reset(None);
    }
}

/// Holds the surface in `Submitting`/`Deleting` while a request runs.
///
/// Dropped without [`PendingGuard::settle`] (the request future was
/// cancelled), it puts the surface back to `Open` on the same target.
struct PendingGuard<'a> {
    state: &'a mut SurfaceState,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn enter(state: &'a mut SurfaceState, pending: SurfaceState) -> Self {
        *state = pending;
        Self { state, armed: true }
    }

    fn settle(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let target = match &*self.state {
            SurfaceState::Submitting { target } | SurfaceState::Deleting { target } => {
                target.clone()
            }
            SurfaceState::Open { .. } | SurfaceState::Closed => return,
        };

        debug!(editing = ?target.user().map(|user| user.id), "Request cancelled, reopening surface");
        *self.state = SurfaceState::Open {
            target,
            error: None,
        };
    }
}
