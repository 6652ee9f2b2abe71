// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Move classification.
//!
//! A drag or explicit move names a set of participants and one destination.
//! Classification turns that into typed moves, grouped by the remote call
//! that will carry them, by comparing each participant's destination with
//! where it sits in the snapshot *before* any of the moves are applied.

use crate::error::CoreError;
use std::collections::HashSet;
use war_roster_domain::{Container, ParticipantId, Snapshot, SquadId};

/// The three kinds of move, in the order they are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    /// Pool to a squad.
    PoolToSquad,
    /// One squad to another.
    SquadToSquad,
    /// A squad back to the pool.
    SquadToPool,
}

impl MoveCategory {
    /// Every category in dispatch order.
    ///
    /// Issuing pool→squad first and squad→pool last means the service never
    /// sees a participant in two squads or in no container mid-transition.
    pub const DISPATCH_ORDER: [Self; 3] =
        [Self::PoolToSquad, Self::SquadToSquad, Self::SquadToPool];

    /// Converts this category to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PoolToSquad => "pool_to_squad",
            Self::SquadToSquad => "squad_to_squad",
            Self::SquadToPool => "squad_to_pool",
        }
    }
}

impl std::fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A participant leaving the pool for a squad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolToSquad {
    /// The participant being moved.
    pub participant_id: ParticipantId,
    /// The destination squad.
    pub squad_id: SquadId,
}

/// A participant changing squads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadToSquad {
    /// The participant being moved.
    pub participant_id: ParticipantId,
    /// The squad it leaves.
    pub from_squad_id: SquadId,
    /// The squad it joins.
    pub to_squad_id: SquadId,
}

/// A participant returning from a squad to the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadToPool {
    /// The participant being moved.
    pub participant_id: ParticipantId,
    /// The squad it leaves.
    pub from_squad_id: SquadId,
}

/// A single participant's transition between containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// Pool to a squad.
    PoolToSquad(PoolToSquad),
    /// One squad to another.
    SquadToSquad(SquadToSquad),
    /// A squad back to the pool.
    SquadToPool(SquadToPool),
}

impl Move {
    /// Returns the moved participant.
    #[must_use]
    pub const fn participant_id(&self) -> &ParticipantId {
        match self {
            Self::PoolToSquad(m) => &m.participant_id,
            Self::SquadToSquad(m) => &m.participant_id,
            Self::SquadToPool(m) => &m.participant_id,
        }
    }

    /// Returns the squad the participant leaves, `None` for the pool.
    #[must_use]
    pub const fn from_squad_id(&self) -> Option<&SquadId> {
        match self {
            Self::PoolToSquad(_) => None,
            Self::SquadToSquad(m) => Some(&m.from_squad_id),
            Self::SquadToPool(m) => Some(&m.from_squad_id),
        }
    }

    /// Returns the squad the participant joins, `None` for the pool.
    #[must_use]
    pub const fn to_squad_id(&self) -> Option<&SquadId> {
        match self {
            Self::PoolToSquad(m) => Some(&m.squad_id),
            Self::SquadToSquad(m) => Some(&m.to_squad_id),
            Self::SquadToPool(_) => None,
        }
    }

    /// Returns the container the participant ends up in.
    #[must_use]
    pub fn destination(&self) -> Container {
        self.to_squad_id()
            .map_or(Container::Pool, |id| Container::Squad(id.clone()))
    }

    /// Returns the category this move is dispatched under.
    #[must_use]
    pub const fn category(&self) -> MoveCategory {
        match self {
            Self::PoolToSquad(_) => MoveCategory::PoolToSquad,
            Self::SquadToSquad(_) => MoveCategory::SquadToSquad,
            Self::SquadToPool(_) => MoveCategory::SquadToPool,
        }
    }
}

/// Moves grouped by dispatch category.
///
/// Each list preserves the order the participants were named in. The three
/// lists are disjoint: a participant appears at most once overall.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedMoves {
    /// Pool to squad moves.
    pub pool_to_squad: Vec<PoolToSquad>,
    /// Squad to squad moves.
    pub squad_to_squad: Vec<SquadToSquad>,
    /// Squad to pool moves.
    pub squad_to_pool: Vec<SquadToPool>,
}

impl ClassifiedMoves {
    /// Returns whether no move survived classification.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool_to_squad.is_empty()
            && self.squad_to_squad.is_empty()
            && self.squad_to_pool.is_empty()
    }

    /// Returns the total number of moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool_to_squad.len() + self.squad_to_squad.len() + self.squad_to_pool.len()
    }

    /// Returns the number of moves in one category.
    #[must_use]
    pub fn count(&self, category: MoveCategory) -> usize {
        match category {
            MoveCategory::PoolToSquad => self.pool_to_squad.len(),
            MoveCategory::SquadToSquad => self.squad_to_squad.len(),
            MoveCategory::SquadToPool => self.squad_to_pool.len(),
        }
    }

    /// Returns every move, category by category in dispatch order.
    #[must_use]
    pub fn moves(&self) -> Vec<Move> {
        self.pool_to_squad
            .iter()
            .cloned()
            .map(Move::PoolToSquad)
            .chain(self.squad_to_squad.iter().cloned().map(Move::SquadToSquad))
            .chain(self.squad_to_pool.iter().cloned().map(Move::SquadToPool))
            .collect()
    }

    fn push(&mut self, mv: Move) {
        match mv {
            Move::PoolToSquad(m) => self.pool_to_squad.push(m),
            Move::SquadToSquad(m) => self.squad_to_squad.push(m),
            Move::SquadToPool(m) => self.squad_to_pool.push(m),
        }
    }
}

/// Classifies a move of `ids` into `destination` against `snapshot`.
///
/// `snapshot` must be the state before any of these moves is applied; every
/// identifier is looked up in that same snapshot. Participants already in
/// the destination are dropped, as are repeated identifiers.
///
/// # Arguments
///
/// * `ids` - The participants to move, in selection order
/// * `destination` - The pool or a squad
/// * `snapshot` - The pre-move snapshot
///
/// # Errors
///
/// Returns an error if:
/// - `ids` is empty
/// - A participant or the destination squad is not in the snapshot
/// - The destination squad, or a source squad of a real move, is locked
pub fn classify(
    ids: &[ParticipantId],
    destination: &Container,
    snapshot: &Snapshot,
) -> Result<ClassifiedMoves, CoreError> {
    if ids.is_empty() {
        return Err(CoreError::EmptyMoveSet);
    }

    if let Container::Squad(squad_id) = destination {
        let squad = snapshot
            .squad(squad_id)
            .ok_or_else(|| CoreError::UnknownSquad(squad_id.clone()))?;
        if squad.locked {
            return Err(CoreError::SquadLocked(squad_id.clone()));
        }
    }

    let mut seen: HashSet<&ParticipantId> = HashSet::new();
    let mut classified: ClassifiedMoves = ClassifiedMoves::default();

    for id in ids {
        if !seen.insert(id) {
            continue;
        }

        let current: &Container = snapshot
            .container_of(id)
            .ok_or_else(|| CoreError::UnknownParticipant(id.clone()))?;

        let mv: Move = match (current, destination) {
            (Container::Pool, Container::Pool) => continue,
            (Container::Squad(from), Container::Squad(to)) if from == to => continue,
            (Container::Pool, Container::Squad(to)) => Move::PoolToSquad(PoolToSquad {
                participant_id: id.clone(),
                squad_id: to.clone(),
            }),
            (Container::Squad(from), Container::Squad(to)) => Move::SquadToSquad(SquadToSquad {
                participant_id: id.clone(),
                from_squad_id: from.clone(),
                to_squad_id: to.clone(),
            }),
            (Container::Squad(from), Container::Pool) => Move::SquadToPool(SquadToPool {
                participant_id: id.clone(),
                from_squad_id: from.clone(),
            }),
        };

        if let Some(from) = mv.from_squad_id() {
            if snapshot.squad(from).is_some_and(|s| s.locked) {
                return Err(CoreError::SquadLocked(from.clone()));
            }
        }

        classified.push(mv);
    }

    Ok(classified)
}
