// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batch mutations against a stored roster.
//!
//! Each function works on a copy of the stored snapshot and validates every
//! entry before the copy is returned, so a rejected batch leaves nothing
//! half-applied.

use crate::error::PersistenceError;
use war_roster::{PoolToSquad, SquadToSquad};
use war_roster_domain::{Container, ParticipantId, Snapshot, SquadId};

fn require_open_squad(snapshot: &Snapshot, squad_id: &SquadId) -> Result<(), PersistenceError> {
    match snapshot.squad(squad_id) {
        None => Err(PersistenceError::InvalidMove(format!(
            "Squad '{squad_id}' does not exist"
        ))),
        Some(squad) if squad.locked => Err(PersistenceError::InvalidMove(format!(
            "Squad '{squad_id}' is locked"
        ))),
        Some(_) => Ok(()),
    }
}

fn require_in(
    snapshot: &Snapshot,
    participant_id: &ParticipantId,
    expected: &Container,
) -> Result<(), PersistenceError> {
    match snapshot.container_of(participant_id) {
        Some(current) if current == expected => Ok(()),
        Some(current) => Err(PersistenceError::InvalidMove(format!(
            "Participant '{participant_id}' is in the {current}, not the {expected}"
        ))),
        None => Err(PersistenceError::InvalidMove(format!(
            "Participant '{participant_id}' is not on the roster"
        ))),
    }
}

/// Moves pool participants into squads.
///
/// # Errors
///
/// Returns an error if the batch is empty, a participant is not in the
/// pool, or a destination squad is missing or locked.
pub fn move_pool_to_squad(
    snapshot: &Snapshot,
    moves: &[PoolToSquad],
) -> Result<Snapshot, PersistenceError> {
    if moves.is_empty() {
        return Err(PersistenceError::EmptyBatch);
    }

    let mut next: Snapshot = snapshot.clone();
    for mv in moves {
        require_in(&next, &mv.participant_id, &Container::Pool)?;
        require_open_squad(&next, &mv.squad_id)?;
        next.relocate(&mv.participant_id, &Container::Squad(mv.squad_id.clone()))?;
    }
    Ok(next)
}

/// Moves participants between squads.
///
/// # Errors
///
/// Returns an error if the batch is empty, a participant is not in its
/// stated source squad, or either squad is missing or locked.
pub fn move_squad_to_squad(
    snapshot: &Snapshot,
    moves: &[SquadToSquad],
) -> Result<Snapshot, PersistenceError> {
    if moves.is_empty() {
        return Err(PersistenceError::EmptyBatch);
    }

    let mut next: Snapshot = snapshot.clone();
    for mv in moves {
        require_in(
            &next,
            &mv.participant_id,
            &Container::Squad(mv.from_squad_id.clone()),
        )?;
        require_open_squad(&next, &mv.from_squad_id)?;
        require_open_squad(&next, &mv.to_squad_id)?;
        next.relocate(
            &mv.participant_id,
            &Container::Squad(mv.to_squad_id.clone()),
        )?;
    }
    Ok(next)
}

/// Returns squad members to the pool.
///
/// # Errors
///
/// Returns an error if the batch is empty, a participant is not in a
/// squad, or its squad is locked.
pub fn move_squad_to_pool(
    snapshot: &Snapshot,
    participant_ids: &[ParticipantId],
) -> Result<Snapshot, PersistenceError> {
    if participant_ids.is_empty() {
        return Err(PersistenceError::EmptyBatch);
    }

    let mut next: Snapshot = snapshot.clone();
    for participant_id in participant_ids {
        let from: SquadId = match next.container_of(participant_id) {
            Some(Container::Squad(squad_id)) => squad_id.clone(),
            Some(Container::Pool) => {
                return Err(PersistenceError::InvalidMove(format!(
                    "Participant '{participant_id}' is already in the pool"
                )));
            }
            None => {
                return Err(PersistenceError::InvalidMove(format!(
                    "Participant '{participant_id}' is not on the roster"
                )));
            }
        };
        require_open_squad(&next, &from)?;
        next.relocate(participant_id, &Container::Pool)?;
    }
    Ok(next)
}

/// Removes a participant from a squad and from the roster.
///
/// # Errors
///
/// Returns an error if the participant is not in that squad or the squad
/// is locked.
pub fn kick_from_squad(
    snapshot: &Snapshot,
    participant_id: &ParticipantId,
    squad_id: &SquadId,
) -> Result<Snapshot, PersistenceError> {
    require_in(
        snapshot,
        participant_id,
        &Container::Squad(squad_id.clone()),
    )?;
    require_open_squad(snapshot, squad_id)?;

    let mut next: Snapshot = snapshot.clone();
    next.evict(participant_id)?;
    Ok(next)
}

/// Removes a pool participant from the roster.
///
/// # Errors
///
/// Returns an error if the participant is not in the pool.
pub fn kick_from_pool(
    snapshot: &Snapshot,
    participant_id: &ParticipantId,
) -> Result<Snapshot, PersistenceError> {
    require_in(snapshot, participant_id, &Container::Pool)?;

    let mut next: Snapshot = snapshot.clone();
    next.evict(participant_id)?;
    Ok(next)
}
