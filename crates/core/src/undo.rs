// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-boxed, single-slot undo.
//!
//! At most one action can be undone. Registering a new action supersedes
//! the pending one, whose rollback is then lost. Undo acts on the local
//! store only: no compensating remote call is issued, so after undoing a
//! move the service may disagree with the client until the next refresh.

use crate::store::SnapshotStore;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

/// The default undo window.
pub const DEFAULT_UNDO_WINDOW: Duration = Duration::milliseconds(5000);

/// A procedure restoring the store to the state captured before an edit.
pub type Rollback = Box<dyn FnOnce(&mut SnapshotStore) + Send>;

/// The most recent undoable action.
pub struct LastAction {
    description: String,
    rollback: Rollback,
    expires_at: OffsetDateTime,
}

impl LastAction {
    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns when the action stops being undoable.
    #[must_use]
    pub const fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }

    /// Returns whether the window has elapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }

    /// Returns the time left in the window, never negative.
    #[must_use]
    pub fn remaining(&self, now: OffsetDateTime) -> Duration {
        let remaining: Duration = self.expires_at - now;
        if remaining.is_negative() {
            Duration::ZERO
        } else {
            remaining
        }
    }
}

impl std::fmt::Debug for LastAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastAction")
            .field("description", &self.description)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Holds at most one pending [`LastAction`].
///
/// States: idle (no action) and pending (action with a running window).
/// Pending returns to idle on undo, on expiry, or when cleared.
#[derive(Debug)]
pub struct UndoController {
    window: Duration,
    pending: Option<LastAction>,
}

impl UndoController {
    /// Creates an idle controller with the given window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Returns the configured window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Registers a new undoable action, superseding any pending one.
    ///
    /// A window reaching past the largest representable instant is cut
    /// off there.
    ///
    /// # Returns
    ///
    /// The description of the superseded action, if one was pending.
    pub fn register(
        &mut self,
        description: String,
        rollback: Rollback,
        now: OffsetDateTime,
    ) -> Option<String> {
        let expires_at: OffsetDateTime = now
            .checked_add(self.window)
            .unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc());
        let superseded: Option<LastAction> = self.pending.replace(LastAction {
            description,
            rollback,
            expires_at,
        });
        superseded
            .filter(|action| !action.is_expired(now))
            .map(|action| action.description)
    }

    /// Returns the pending action if its window is still open at `now`.
    #[must_use]
    pub fn pending(&self, now: OffsetDateTime) -> Option<&LastAction> {
        self.pending.as_ref().filter(|action| !action.is_expired(now))
    }

    /// Returns the remaining countdown of the pending action.
    #[must_use]
    pub fn remaining(&self, now: OffsetDateTime) -> Option<Duration> {
        self.pending(now).map(|action| action.remaining(now))
    }

    /// Discards the pending action if its window has elapsed.
    ///
    /// # Returns
    ///
    /// The description of the discarded action.
    pub fn expire(&mut self, now: OffsetDateTime) -> Option<String> {
        if self
            .pending
            .as_ref()
            .is_some_and(|action| action.is_expired(now))
        {
            return self.pending.take().map(|action| action.description);
        }
        None
    }

    /// Runs the pending rollback against `store` if the window is open.
    ///
    /// An expired action is discarded without running.
    ///
    /// # Returns
    ///
    /// The description of the undone action.
    pub fn undo(&mut self, store: &mut SnapshotStore, now: OffsetDateTime) -> Option<String> {
        let action: LastAction = self.pending.take()?;
        if action.is_expired(now) {
            return None;
        }
        (action.rollback)(store);
        Some(action.description)
    }

    /// Drops the pending action without running it.
    ///
    /// # Returns
    ///
    /// Whether an action was pending.
    pub fn clear(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

impl Default for UndoController {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_WINDOW)
    }
}
