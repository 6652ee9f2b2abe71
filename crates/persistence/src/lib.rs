// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference roster service storage.
//!
//! Holds every war's authoritative roster in memory together with a bounded
//! revision log. Each write is validated as a whole against a copy of the
//! stored snapshot and then committed under a fresh version token.
//!
//! ## Version checks
//!
//! A write may carry the version the caller last saw. It is rejected with
//! [`PersistenceError::VersionMismatch`] when that version is unknown, or
//! when a *different* operator committed after it. Writes without a version
//! are blind and always checked only for validity.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod history;
mod mutations;
mod seed;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use history::{HISTORY_LIMIT, Revision, RevisionLog};
pub use seed::{SeedFile, WarSeed};

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};
use war_roster::{PoolToSquad, SquadToSquad};
use war_roster_domain::{ParticipantId, RosterDocument, Snapshot, SquadId, VersionToken, WarId};

/// The stored state of one war.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WarRecord {
    snapshot: Snapshot,
    log: RevisionLog,
}

/// In-memory roster storage for every known war.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterDatabase {
    wars: BTreeMap<WarId, WarRecord>,
}

impl RosterDatabase {
    /// Creates an empty database.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wars: BTreeMap::new(),
        }
    }

    /// Creates a database from a parsed seed document.
    ///
    /// # Errors
    ///
    /// Returns an error if a war is seeded twice or violates the partition
    /// invariant.
    pub fn from_seed(seed: SeedFile) -> Result<Self, PersistenceError> {
        let mut database: Self = Self::new();
        for war in seed.wars {
            database.insert_war(war)?;
        }
        Ok(database)
    }

    /// Creates a database from a JSON seed file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or holds
    /// an invalid roster.
    pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        info!("Loading roster seed from: {}", path.as_ref().display());
        let seed: SeedFile = SeedFile::from_path(path)?;
        Self::from_seed(seed)
    }

    /// Adds a war at revision 1.
    ///
    /// # Returns
    ///
    /// The version token of the stored roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the war already exists or the roster is invalid.
    pub fn insert_war(&mut self, seed: WarSeed) -> Result<VersionToken, PersistenceError> {
        if self.wars.contains_key(&seed.war_id) {
            return Err(PersistenceError::DuplicateWar(seed.war_id));
        }

        let log: RevisionLog = RevisionLog::seeded(&seed.war_id);
        let version: VersionToken = log.head().token.clone();
        let snapshot: Snapshot =
            Snapshot::new(seed.squads, seed.pool, seed.assigned, version.clone())?;

        info!(
            "Seeded war {} with {} participants",
            seed.war_id,
            snapshot.participant_count()
        );
        self.wars.insert(seed.war_id, WarRecord { snapshot, log });
        Ok(version)
    }

    /// Returns the identifiers of every stored war.
    #[must_use]
    pub fn war_ids(&self) -> Vec<WarId> {
        self.wars.keys().cloned().collect()
    }

    /// Returns a war's current roster in wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if the war does not exist.
    pub fn fetch_roster(&self, war_id: &WarId) -> Result<RosterDocument, PersistenceError> {
        debug!("Fetching roster for war: {}", war_id);
        Ok(self.record(war_id)?.snapshot.to_document())
    }

    /// Returns a war's current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the war does not exist.
    pub fn snapshot(&self, war_id: &WarId) -> Result<&Snapshot, PersistenceError> {
        Ok(&self.record(war_id)?.snapshot)
    }

    /// Returns a war's current version token.
    ///
    /// # Errors
    ///
    /// Returns an error if the war does not exist.
    pub fn current_version(&self, war_id: &WarId) -> Result<VersionToken, PersistenceError> {
        Ok(self.record(war_id)?.log.head().token.clone())
    }

    /// Returns a war's remembered revisions, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the war does not exist.
    pub fn revisions(&self, war_id: &WarId) -> Result<Vec<Revision>, PersistenceError> {
        Ok(self.record(war_id)?.log.revisions().cloned().collect())
    }

    /// Commits a batch of pool to squad moves.
    ///
    /// # Arguments
    ///
    /// * `war_id` - The war to modify
    /// * `operator_id` - The operator issuing the write
    /// * `expected` - The version the operator last saw, `None` for a blind write
    /// * `moves` - The batch
    ///
    /// # Returns
    ///
    /// The new version token.
    ///
    /// # Errors
    ///
    /// Returns an error if the war is unknown, the version check fails, or
    /// any entry of the batch is invalid. Nothing is applied on error.
    pub fn move_pool_to_squad(
        &mut self,
        war_id: &WarId,
        operator_id: &str,
        expected: Option<&VersionToken>,
        moves: &[PoolToSquad],
    ) -> Result<VersionToken, PersistenceError> {
        self.write(war_id, operator_id, expected, "move_pool_to_squad", |s| {
            mutations::move_pool_to_squad(s, moves)
        })
    }

    /// Commits a batch of squad to squad moves.
    ///
    /// # Errors
    ///
    /// Returns an error if the war is unknown, the version check fails, or
    /// any entry of the batch is invalid. Nothing is applied on error.
    pub fn move_squad_to_squad(
        &mut self,
        war_id: &WarId,
        operator_id: &str,
        expected: Option<&VersionToken>,
        moves: &[SquadToSquad],
    ) -> Result<VersionToken, PersistenceError> {
        self.write(war_id, operator_id, expected, "move_squad_to_squad", |s| {
            mutations::move_squad_to_squad(s, moves)
        })
    }

    /// Returns a batch of squad members to the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the war is unknown, the version check fails, or
    /// any entry of the batch is invalid. Nothing is applied on error.
    pub fn move_squad_to_pool(
        &mut self,
        war_id: &WarId,
        operator_id: &str,
        expected: Option<&VersionToken>,
        participant_ids: &[ParticipantId],
    ) -> Result<VersionToken, PersistenceError> {
        self.write(war_id, operator_id, expected, "move_squad_to_pool", |s| {
            mutations::move_squad_to_pool(s, participant_ids)
        })
    }

    /// Removes a squad member from the war.
    ///
    /// # Errors
    ///
    /// Returns an error if the war is unknown, the version check fails, or
    /// the participant is not a member of an unlocked `squad_id`.
    pub fn kick_from_squad(
        &mut self,
        war_id: &WarId,
        operator_id: &str,
        expected: Option<&VersionToken>,
        participant_id: &ParticipantId,
        squad_id: &SquadId,
    ) -> Result<VersionToken, PersistenceError> {
        self.write(war_id, operator_id, expected, "kick_from_squad", |s| {
            mutations::kick_from_squad(s, participant_id, squad_id)
        })
    }

    /// Removes a pool participant from the war.
    ///
    /// # Errors
    ///
    /// Returns an error if the war is unknown, the version check fails, or
    /// the participant is not in the pool.
    pub fn kick_from_pool(
        &mut self,
        war_id: &WarId,
        operator_id: &str,
        expected: Option<&VersionToken>,
        participant_id: &ParticipantId,
    ) -> Result<VersionToken, PersistenceError> {
        self.write(war_id, operator_id, expected, "kick_from_pool", |s| {
            mutations::kick_from_pool(s, participant_id)
        })
    }

    fn record(&self, war_id: &WarId) -> Result<&WarRecord, PersistenceError> {
        self.wars
            .get(war_id)
            .ok_or_else(|| PersistenceError::WarNotFound(war_id.clone()))
    }

    fn write<F>(
        &mut self,
        war_id: &WarId,
        operator_id: &str,
        expected: Option<&VersionToken>,
        operation: &str,
        mutate: F,
    ) -> Result<VersionToken, PersistenceError>
    where
        F: FnOnce(&Snapshot) -> Result<Snapshot, PersistenceError>,
    {
        let record: &mut WarRecord = self
            .wars
            .get_mut(war_id)
            .ok_or_else(|| PersistenceError::WarNotFound(war_id.clone()))?;

        if let Err(err) = record.log.check(expected, operator_id) {
            warn!(
                "Rejected {} on war {} from operator {}: {}",
                operation, war_id, operator_id, err
            );
            return Err(err);
        }

        let next: Snapshot = mutate(&record.snapshot)?;
        let version: VersionToken = record.log.advance(operator_id);
        record.snapshot = next.with_version(version.clone());

        debug!(
            "Committed {} on war {} by operator {} at {}",
            operation, war_id, operator_id, version
        );
        Ok(version)
    }
}
