// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::notice::NoticeBoard;
use crate::operation::RemoteOperation;
use crate::store::SnapshotStore;
use time::OffsetDateTime;
use war_roster_domain::Snapshot;

/// How a remote failure is classified for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service's version-mismatch sentinel.
    VersionMismatch,
    /// Timeout, offline or server error.
    Transient,
    /// The service refused the request as invalid.
    Rejected,
}

/// A failed remote call, reduced to what routing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// The operation that failed.
    pub operation: RemoteOperation,
    /// Failure classification.
    pub kind: FailureKind,
    /// Human-readable message.
    pub message: String,
}

/// Where a failure ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// A conflict is open (newly, or one was already open).
    Conflict,
    /// A notice was raised with this identifier.
    Notice(u64),
}

/// An open version conflict awaiting the operator's choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The first operation rejected for version mismatch.
    pub operation: RemoteOperation,
    /// The service's message.
    pub message: String,
    /// When the conflict opened.
    pub opened_at: OffsetDateTime,
    /// How many mismatches were reported while it was open.
    pub occurrences: u32,
}

/// The operator's answer to an open conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Discard local edits and refetch the snapshot.
    Refresh,
    /// Keep local edits and send the next mutation without a version check.
    Override,
}

/// Tracks whether a version conflict is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictResolver {
    open: Option<Conflict>,
}

impl ConflictResolver {
    /// Creates a resolver with no open conflict.
    #[must_use]
    pub const fn new() -> Self {
        Self { open: None }
    }

    /// Routes a failure.
    ///
    /// Only the version-mismatch sentinel opens a conflict. Every other
    /// failure becomes a notice and leaves local state as it is.
    pub fn route(
        &mut self,
        failure: Failure,
        notices: &mut NoticeBoard,
        now: OffsetDateTime,
    ) -> Routed {
        match failure.kind {
            FailureKind::VersionMismatch => {
                self.open(failure.operation, failure.message, now);
                Routed::Conflict
            }
            FailureKind::Transient | FailureKind::Rejected => {
                Routed::Notice(notices.raise(failure.operation, failure.message, now))
            }
        }
    }

    /// Opens a conflict, or counts another occurrence of the open one.
    ///
    /// # Returns
    ///
    /// Whether a new conflict was opened.
    pub fn open(
        &mut self,
        operation: RemoteOperation,
        message: String,
        now: OffsetDateTime,
    ) -> bool {
        if let Some(conflict) = self.open.as_mut() {
            conflict.occurrences += 1;
            return false;
        }
        self.open = Some(Conflict {
            operation,
            message,
            opened_at: now,
            occurrences: 1,
        });
        true
    }

    /// Returns the open conflict.
    #[must_use]
    pub const fn current(&self) -> Option<&Conflict> {
        self.open.as_ref()
    }

    /// Returns whether a conflict is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Resolves by replacing local state with a freshly fetched snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if no conflict is open.
    pub fn resolve_refresh(
        &mut self,
        store: &mut SnapshotStore,
        fresh: Snapshot,
    ) -> Result<Conflict, CoreError> {
        let conflict: Conflict = self.open.take().ok_or(CoreError::NoOpenConflict)?;
        store.replace(fresh);
        Ok(conflict)
    }

    /// Resolves by clearing the expected version and keeping local edits.
    ///
    /// # Errors
    ///
    /// Returns an error if no conflict is open.
    pub fn resolve_override(&mut self, store: &mut SnapshotStore) -> Result<Conflict, CoreError> {
        let conflict: Conflict = self.open.take().ok_or(CoreError::NoOpenConflict)?;
        store.clear_expectation();
        Ok(conflict)
    }
}
