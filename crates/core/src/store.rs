// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use war_roster_domain::{ParticipantId, RoleTag, Snapshot, VersionToken, WarId};

/// Holds the current snapshot for one war.
///
/// The store separates two version notions:
/// - the snapshot's own token, which only changes when a snapshot fetched
///   from the service replaces the current one
/// - the *expected* version sent with the next mutation, which also follows
///   mutation acknowledgements and is cleared by a conflict override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStore {
    war: WarId,
    snapshot: Snapshot,
    expected_version: Option<VersionToken>,
}

impl SnapshotStore {
    /// Creates a store from a freshly fetched snapshot.
    #[must_use]
    pub fn new(war: WarId, snapshot: Snapshot) -> Self {
        let expected_version: Option<VersionToken> = Some(snapshot.version().clone());
        Self {
            war,
            snapshot,
            expected_version,
        }
    }

    /// Returns the war this store is scoped to.
    #[must_use]
    pub const fn war(&self) -> &WarId {
        &self.war
    }

    /// Returns the current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns the version the next mutation should be checked against.
    ///
    /// `None` means the next mutation is attempted blind.
    #[must_use]
    pub const fn expected_version(&self) -> Option<&VersionToken> {
        self.expected_version.as_ref()
    }

    /// Commits an optimistic local edit.
    ///
    /// Only `next`'s squads and pool are taken; the version token stays.
    ///
    /// # Returns
    ///
    /// The snapshot that was replaced.
    pub fn commit(&mut self, next: &Snapshot) -> Snapshot {
        let replacement: Snapshot = self.snapshot.with_layout_of(next);
        std::mem::replace(&mut self.snapshot, replacement)
    }

    /// Restores a previously captured layout, keeping the current version.
    pub fn restore_layout(&mut self, previous: &Snapshot) {
        self.snapshot = self.snapshot.with_layout_of(previous);
    }

    /// Replaces the snapshot with one accepted from the service.
    ///
    /// This discards any local optimistic edits.
    pub fn replace(&mut self, fresh: Snapshot) {
        self.expected_version = Some(fresh.version().clone());
        self.snapshot = fresh;
    }

    /// Records the version returned by an accepted mutation.
    pub fn acknowledge(&mut self, version: VersionToken) {
        self.expected_version = Some(version);
    }

    /// Forgets the expected version so the next mutation is sent blind.
    pub fn clear_expectation(&mut self) {
        self.expected_version = None;
    }

    /// Sets or clears a squad member's role tag locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is not a squad member.
    pub fn set_role(
        &mut self,
        participant_id: &ParticipantId,
        role: Option<RoleTag>,
    ) -> Result<(), CoreError> {
        self.snapshot.set_role(participant_id, role)?;
        Ok(())
    }
}
