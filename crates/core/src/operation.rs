// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::classify::MoveCategory;

/// The remote calls the coordinator can issue against the roster service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    /// Full roster read.
    FetchRoster,
    /// Batched pool to squad moves.
    MovePoolToSquad,
    /// Batched squad to squad moves.
    MoveSquadToSquad,
    /// Batched squad to pool moves.
    MoveSquadToPool,
    /// Removal of one squad member.
    KickFromSquad,
    /// Removal of one pool participant.
    KickFromPool,
}

impl RemoteOperation {
    /// Converts this operation to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FetchRoster => "fetch_war_roster",
            Self::MovePoolToSquad => "move_pool_to_squad",
            Self::MoveSquadToSquad => "move_squad_to_squad",
            Self::MoveSquadToPool => "move_squad_to_pool",
            Self::KickFromSquad => "kick_from_squad",
            Self::KickFromPool => "kick_from_pool",
        }
    }
}

impl std::fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<MoveCategory> for RemoteOperation {
    fn from(category: MoveCategory) -> Self {
        match category {
            MoveCategory::PoolToSquad => Self::MovePoolToSquad,
            MoveCategory::SquadToSquad => Self::MoveSquadToSquad,
            MoveCategory::SquadToPool => Self::MoveSquadToPool,
        }
    }
}
