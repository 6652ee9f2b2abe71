// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The roster snapshot: squads, pool and version token for one war.
//!
//! A snapshot always satisfies the partition invariant: every participant
//! it knows about lives in exactly one of the pool or a single squad.
//! Alongside the content it keeps a participant directory (so records can
//! move back into the pool) and a container index (so locating a
//! participant does not require scanning every squad).

use crate::document::RosterDocument;
use crate::error::DomainError;
use crate::types::{
    Container, Participant, ParticipantId, RoleTag, Squad, SquadAssignment, SquadId, VersionToken,
};
use crate::validation::{validate_participant, validate_partition, validate_squad};
use std::collections::BTreeMap;

/// The complete roster state of one war as held by a client or the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Squads in display order.
    squads: Vec<Squad>,
    /// Pool membership in insertion order.
    pool: Vec<ParticipantId>,
    /// Records for every participant in the snapshot.
    directory: BTreeMap<ParticipantId, Participant>,
    /// The service version this snapshot was accepted at.
    version: VersionToken,
    /// Derived: participant to container.
    index: BTreeMap<ParticipantId, Container>,
}

impl Snapshot {
    /// Creates a validated snapshot.
    ///
    /// # Arguments
    ///
    /// * `squads` - The squads, in display order
    /// * `pool` - Participants in the unassigned pool
    /// * `assigned` - Participant records for squad members
    /// * `version` - The service's version token
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A participant or squad has empty fields
    /// - A participant appears in more than one container
    /// - Two squads share an identifier
    /// - A squad member has no record in `assigned`
    pub fn new(
        squads: Vec<Squad>,
        pool: Vec<Participant>,
        assigned: Vec<Participant>,
        version: VersionToken,
    ) -> Result<Self, DomainError> {
        for squad in &squads {
            validate_squad(squad)?;
        }

        let mut directory: BTreeMap<ParticipantId, Participant> = BTreeMap::new();
        let mut pool_ids: Vec<ParticipantId> = Vec::with_capacity(pool.len());
        for participant in pool {
            validate_participant(&participant)?;
            pool_ids.push(participant.id.clone());
            directory.insert(participant.id.clone(), participant);
        }

        let index: BTreeMap<ParticipantId, Container> = validate_partition(&squads, &pool_ids)?;

        for participant in assigned {
            validate_participant(&participant)?;
            match index.get(&participant.id) {
                Some(Container::Squad(_)) => {
                    directory.insert(participant.id.clone(), participant);
                }
                // Records for pool members come from the pool itself; a
                // record for someone outside the roster is ignored.
                Some(Container::Pool) | None => {}
            }
        }

        if let Some(missing) = index.keys().find(|id| !directory.contains_key(*id)) {
            return Err(DomainError::MissingParticipantRecord(missing.clone()));
        }

        Ok(Self {
            squads,
            pool: pool_ids,
            directory,
            version,
            index,
        })
    }

    /// Creates a snapshot with no squads and an empty pool.
    #[must_use]
    pub const fn empty(version: VersionToken) -> Self {
        Self {
            squads: Vec::new(),
            pool: Vec::new(),
            directory: BTreeMap::new(),
            version,
            index: BTreeMap::new(),
        }
    }

    /// Builds a snapshot from its wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if the document violates the partition invariant.
    pub fn from_document(document: RosterDocument) -> Result<Self, DomainError> {
        Self::new(
            document.squads,
            document.pool,
            document.assigned,
            document.version,
        )
    }

    /// Converts the snapshot into its wire form.
    #[must_use]
    pub fn to_document(&self) -> RosterDocument {
        let assigned: Vec<Participant> = self
            .squads
            .iter()
            .flat_map(Squad::member_ids)
            .filter_map(|id| self.directory.get(id).cloned())
            .collect();

        RosterDocument {
            squads: self.squads.clone(),
            pool: self.pool().cloned().collect(),
            assigned,
            version: self.version.clone(),
        }
    }

    /// Returns the version token this snapshot was accepted at.
    #[must_use]
    pub const fn version(&self) -> &VersionToken {
        &self.version
    }

    /// Returns a copy of this snapshot stamped with a new service version.
    ///
    /// Only the service issuing tokens calls this.
    #[must_use]
    pub fn with_version(mut self, version: VersionToken) -> Self {
        self.version = version;
        self
    }

    /// Returns a snapshot with `other`'s squads and pool but this snapshot's
    /// version token.
    #[must_use]
    pub fn with_layout_of(&self, other: &Self) -> Self {
        Self {
            squads: other.squads.clone(),
            pool: other.pool.clone(),
            directory: other.directory.clone(),
            version: self.version.clone(),
            index: other.index.clone(),
        }
    }

    /// Returns the squads in display order.
    #[must_use]
    pub fn squads(&self) -> &[Squad] {
        &self.squads
    }

    /// Looks up a squad by identifier.
    #[must_use]
    pub fn squad(&self, id: &SquadId) -> Option<&Squad> {
        self.squads.iter().find(|s| &s.id == id)
    }

    /// Returns the pool identifiers in insertion order.
    #[must_use]
    pub fn pool_ids(&self) -> &[ParticipantId] {
        &self.pool
    }

    /// Returns the pool participant records in insertion order.
    pub fn pool(&self) -> impl Iterator<Item = &Participant> {
        self.pool.iter().filter_map(|id| self.directory.get(id))
    }

    /// Returns the pool sorted by power, strongest first.
    ///
    /// Ties keep insertion order.
    #[must_use]
    pub fn pool_by_power(&self) -> Vec<&Participant> {
        let mut pool: Vec<&Participant> = self.pool().collect();
        pool.sort_by(|a, b| b.power.cmp(&a.power));
        pool
    }

    /// Returns the summed power of a squad's members.
    #[must_use]
    pub fn squad_power(&self, id: &SquadId) -> Option<u64> {
        self.squad(id).map(|squad| {
            squad
                .member_ids()
                .filter_map(|pid| self.directory.get(pid))
                .map(|p| p.power)
                .sum()
        })
    }

    /// Looks up a participant record.
    #[must_use]
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.directory.get(id)
    }

    /// Returns where a participant currently lives.
    #[must_use]
    pub fn container_of(&self, id: &ParticipantId) -> Option<&Container> {
        self.index.get(id)
    }

    /// Returns whether the participant is part of this snapshot.
    #[must_use]
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.index.contains_key(id)
    }

    /// Returns the number of participants in the snapshot.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.index.len()
    }

    /// Returns every participant identifier with its container.
    pub fn placements(&self) -> impl Iterator<Item = (&ParticipantId, &Container)> {
        self.index.iter()
    }

    /// Structural comparison that ignores the version token.
    #[must_use]
    pub fn same_layout(&self, other: &Self) -> bool {
        self.squads == other.squads
            && self.pool == other.pool
            && self.directory == other.directory
    }

    /// Moves a participant into another container.
    ///
    /// The participant is appended to the destination squad's member list
    /// (without a role tag) or to the end of the pool. Relocating into the
    /// current container leaves the snapshot untouched.
    ///
    /// # Returns
    ///
    /// The container the participant was in before the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant or destination squad is unknown.
    pub fn relocate(
        &mut self,
        id: &ParticipantId,
        to: &Container,
    ) -> Result<Container, DomainError> {
        let from: Container = self
            .index
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::ParticipantNotFound(id.clone()))?;

        if let Container::Squad(squad_id) = to {
            if self.squad(squad_id).is_none() {
                return Err(DomainError::SquadNotFound(squad_id.clone()));
            }
        }

        if &from == to {
            return Ok(from);
        }

        self.detach(id, &from);
        match to {
            Container::Pool => self.pool.push(id.clone()),
            Container::Squad(squad_id) => {
                if let Some(squad) = self.squads.iter_mut().find(|s| &s.id == squad_id) {
                    squad.members.push(SquadAssignment::new(id.clone()));
                }
            }
        }
        self.index.insert(id.clone(), to.clone());

        Ok(from)
    }

    /// Removes a participant from the roster entirely.
    ///
    /// Unlike a move to the pool, the participant leaves the snapshot.
    ///
    /// # Returns
    ///
    /// The container it was removed from and its record.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is unknown.
    pub fn evict(&mut self, id: &ParticipantId) -> Result<(Container, Participant), DomainError> {
        let from: Container = self
            .index
            .remove(id)
            .ok_or_else(|| DomainError::ParticipantNotFound(id.clone()))?;
        self.detach(id, &from);
        let record: Participant = self
            .directory
            .remove(id)
            .ok_or_else(|| DomainError::MissingParticipantRecord(id.clone()))?;
        Ok((from, record))
    }

    /// Sets or clears the role tag on a squad member.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is unknown or sits in the pool.
    pub fn set_role(
        &mut self,
        id: &ParticipantId,
        role: Option<RoleTag>,
    ) -> Result<(), DomainError> {
        let Some(container) = self.index.get(id) else {
            return Err(DomainError::ParticipantNotFound(id.clone()));
        };
        let Container::Squad(squad_id) = container else {
            return Err(DomainError::InvalidParticipant(format!(
                "Participant '{id}' is in the pool and cannot carry a role"
            )));
        };

        let assignment: Option<&mut SquadAssignment> = self
            .squads
            .iter_mut()
            .find(|s| &s.id == squad_id)
            .and_then(|s| s.members.iter_mut().find(|m| &m.participant_id == id));

        match assignment {
            Some(assignment) => {
                assignment.role = role;
                Ok(())
            }
            None => Err(DomainError::NotASquadMember {
                participant_id: id.clone(),
                squad_id: squad_id.clone(),
            }),
        }
    }

    fn detach(&mut self, id: &ParticipantId, from: &Container) {
        match from {
            Container::Pool => self.pool.retain(|p| p != id),
            Container::Squad(squad_id) => {
                if let Some(squad) = self.squads.iter_mut().find(|s| &s.id == squad_id) {
                    squad.members.retain(|m| &m.participant_id != id);
                }
            }
        }
    }
}
