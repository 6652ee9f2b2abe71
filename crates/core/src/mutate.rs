// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::classify::{ClassifiedMoves, Move, classify};
use crate::error::CoreError;
use crate::store::SnapshotStore;
use crate::undo::Rollback;
use std::collections::HashMap;
use war_roster_domain::{Container, ParticipantId, Snapshot};

/// A move that has been classified and applied to a copy of the snapshot,
/// ready to be committed locally and dispatched remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    /// The classified moves to dispatch.
    pub moves: ClassifiedMoves,
    /// The snapshot before the move.
    pub previous: Snapshot,
    /// The snapshot after the move. Carries `previous`'s version token.
    pub next: Snapshot,
    /// Human-readable summary for the undo prompt.
    pub description: String,
}

impl MovePlan {
    /// Builds the rollback procedure that restores the pre-move layout.
    #[must_use]
    pub fn rollback(&self) -> Rollback {
        rollback_to(self.previous.clone())
    }
}

/// Returns a rollback procedure restoring `previous`'s squads and pool.
///
/// The store's current version token is kept; rolling back is a local edit.
#[must_use]
pub fn rollback_to(previous: Snapshot) -> Rollback {
    Box::new(move |store: &mut SnapshotStore| store.restore_layout(&previous))
}

/// Applies classified moves to a copy of `snapshot`.
///
/// Participants are relocated in `order` (the caller's selection order), so
/// a mixed-source move appends members to the destination in the order they
/// were picked. Moves whose participant `order` does not name are applied
/// afterwards in dispatch order. The version token is left as is.
///
/// # Errors
///
/// Returns an error if a move references a participant or squad the
/// snapshot does not contain.
pub fn apply_moves(
    snapshot: &Snapshot,
    order: &[ParticipantId],
    moves: &ClassifiedMoves,
) -> Result<Snapshot, CoreError> {
    let mut remaining: HashMap<ParticipantId, Container> = moves
        .moves()
        .iter()
        .map(|mv| (mv.participant_id().clone(), mv.destination()))
        .collect();

    let mut next: Snapshot = snapshot.clone();
    for id in order {
        if let Some(destination) = remaining.remove(id) {
            next.relocate(id, &destination)?;
        }
    }
    for mv in moves.moves() {
        if let Some(destination) = remaining.remove(mv.participant_id()) {
            next.relocate(mv.participant_id(), &destination)?;
        }
    }
    Ok(next)
}

/// Classifies and applies a move against `snapshot`.
///
/// # Returns
///
/// * `Ok(Some(plan))` if at least one participant changes container
/// * `Ok(None)` if the move is a no-op (nothing to commit, undo or dispatch)
///
/// # Errors
///
/// Returns an error if classification fails.
pub fn plan_move(
    snapshot: &Snapshot,
    ids: &[ParticipantId],
    destination: &Container,
) -> Result<Option<MovePlan>, CoreError> {
    let moves: ClassifiedMoves = classify(ids, destination, snapshot)?;
    if moves.is_empty() {
        return Ok(None);
    }

    let next: Snapshot = apply_moves(snapshot, ids, &moves)?;
    if next.same_layout(snapshot) {
        return Ok(None);
    }

    let description: String = describe(snapshot, &moves, destination);

    Ok(Some(MovePlan {
        moves,
        previous: snapshot.clone(),
        next,
        description,
    }))
}

fn describe(snapshot: &Snapshot, moves: &ClassifiedMoves, destination: &Container) -> String {
    let target: String = match destination {
        Container::Pool => String::from("the pool"),
        Container::Squad(id) => snapshot
            .squad(id)
            .map_or_else(|| id.to_string(), |s| s.name.clone()),
    };

    let count: usize = moves.len();
    if count == 1 {
        let moved: Option<String> = moves
            .moves()
            .first()
            .map(Move::participant_id)
            .and_then(|id| snapshot.participant(id))
            .map(|p| p.name.clone());
        if let Some(name) = moved {
            return format!("Moved 1 participant ({name}) to {target}");
        }
    }

    format!("Moved {count} participants to {target}")
}
