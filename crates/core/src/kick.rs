// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Kicks: terminal removal of a participant from the war roster.
//!
//! A kicked participant does not return to the pool. Kicks are gated behind
//! an explicit confirmation and are not undoable; a failed remote kick is
//! rolled back automatically.

use crate::error::CoreError;
use war_roster_domain::{Container, ParticipantId, Snapshot};

/// A kick awaiting confirmation, or confirmed and awaiting dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickRequest {
    /// The participant being removed.
    pub participant_id: ParticipantId,
    /// Where it is removed from.
    pub from: Container,
}

/// A kick applied to a copy of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickPlan {
    /// What is being removed.
    pub request: KickRequest,
    /// The snapshot before removal.
    pub previous: Snapshot,
    /// The snapshot after removal.
    pub next: Snapshot,
}

/// Plans the removal of a participant from wherever it currently is.
///
/// # Errors
///
/// Returns an error if the participant is unknown or sits in a locked squad.
pub fn plan_kick(snapshot: &Snapshot, participant_id: &ParticipantId) -> Result<KickPlan, CoreError> {
    let from: Container = snapshot
        .container_of(participant_id)
        .cloned()
        .ok_or_else(|| CoreError::UnknownParticipant(participant_id.clone()))?;

    if let Container::Squad(squad_id) = &from {
        if snapshot.squad(squad_id).is_some_and(|s| s.locked) {
            return Err(CoreError::SquadLocked(squad_id.clone()));
        }
    }

    let mut next: Snapshot = snapshot.clone();
    next.evict(participant_id)?;

    Ok(KickPlan {
        request: KickRequest {
            participant_id: participant_id.clone(),
            from,
        },
        previous: snapshot.clone(),
        next,
    })
}

/// Holds the kick awaiting confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KickGate {
    pending: Option<KickRequest>,
}

impl KickGate {
    /// Creates a gate with nothing pending.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Asks for confirmation to kick a participant.
    ///
    /// Replaces any earlier unconfirmed request. State is not touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is not in the snapshot.
    pub fn request(
        &mut self,
        snapshot: &Snapshot,
        participant_id: &ParticipantId,
    ) -> Result<&KickRequest, CoreError> {
        let from: Container = snapshot
            .container_of(participant_id)
            .cloned()
            .ok_or_else(|| CoreError::UnknownParticipant(participant_id.clone()))?;
        if let Container::Squad(squad_id) = &from {
            if snapshot.squad(squad_id).is_some_and(|s| s.locked) {
                return Err(CoreError::SquadLocked(squad_id.clone()));
            }
        }
        Ok(self.pending.insert(KickRequest {
            participant_id: participant_id.clone(),
            from,
        }))
    }

    /// Returns the request awaiting confirmation.
    #[must_use]
    pub const fn pending(&self) -> Option<&KickRequest> {
        self.pending.as_ref()
    }

    /// Declines the pending kick.
    pub fn cancel(&mut self) -> Option<KickRequest> {
        self.pending.take()
    }

    /// Takes the pending kick for confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if no kick was requested.
    pub fn confirm(&mut self) -> Result<KickRequest, CoreError> {
        self.pending.take().ok_or(CoreError::NoPendingKick)
    }
}
