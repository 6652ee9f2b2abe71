// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Every mutation request names the war, the operator issuing it and the
//! version the operator expects the roster to be at. `expected_version` is
//! `None` for a blind write after a conflict override.

use serde::{Deserialize, Serialize};
use war_roster::{PoolToSquad, SquadToSquad};
use war_roster_domain::{ParticipantId, RosterDocument, SquadId, VersionToken, WarId};

/// Query for a full roster read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRosterQuery {
    /// The war to read.
    pub war_id: WarId,
}

/// Response to a full roster read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterResponse {
    /// The war that was read.
    pub war_id: WarId,
    /// The roster, including its version token.
    pub roster: RosterDocument,
}

/// One pool to squad entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolToSquadEntry {
    /// The participant being moved.
    pub participant_id: ParticipantId,
    /// The destination squad.
    pub squad_id: SquadId,
}

impl From<&PoolToSquad> for PoolToSquadEntry {
    fn from(mv: &PoolToSquad) -> Self {
        Self {
            participant_id: mv.participant_id.clone(),
            squad_id: mv.squad_id.clone(),
        }
    }
}

impl From<PoolToSquadEntry> for PoolToSquad {
    fn from(entry: PoolToSquadEntry) -> Self {
        Self {
            participant_id: entry.participant_id,
            squad_id: entry.squad_id,
        }
    }
}

/// One squad to squad entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadToSquadEntry {
    /// The participant being moved.
    pub participant_id: ParticipantId,
    /// The squad it leaves.
    pub from_squad_id: SquadId,
    /// The squad it joins.
    pub to_squad_id: SquadId,
}

impl From<&SquadToSquad> for SquadToSquadEntry {
    fn from(mv: &SquadToSquad) -> Self {
        Self {
            participant_id: mv.participant_id.clone(),
            from_squad_id: mv.from_squad_id.clone(),
            to_squad_id: mv.to_squad_id.clone(),
        }
    }
}

impl From<SquadToSquadEntry> for SquadToSquad {
    fn from(entry: SquadToSquadEntry) -> Self {
        Self {
            participant_id: entry.participant_id,
            from_squad_id: entry.from_squad_id,
            to_squad_id: entry.to_squad_id,
        }
    }
}

/// Batched pool to squad moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePoolToSquadRequest {
    /// The war to modify.
    pub war_id: WarId,
    /// The operator issuing the write.
    pub operator_id: String,
    /// The version the operator last saw.
    #[serde(default)]
    pub expected_version: Option<VersionToken>,
    /// The moves, in selection order.
    pub moves: Vec<PoolToSquadEntry>,
}

/// Batched squad to squad moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSquadToSquadRequest {
    /// The war to modify.
    pub war_id: WarId,
    /// The operator issuing the write.
    pub operator_id: String,
    /// The version the operator last saw.
    #[serde(default)]
    pub expected_version: Option<VersionToken>,
    /// The moves, in selection order.
    pub moves: Vec<SquadToSquadEntry>,
}

/// Batched squad to pool moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSquadToPoolRequest {
    /// The war to modify.
    pub war_id: WarId,
    /// The operator issuing the write.
    pub operator_id: String,
    /// The version the operator last saw.
    #[serde(default)]
    pub expected_version: Option<VersionToken>,
    /// The participants returning to the pool, in selection order.
    pub participant_ids: Vec<ParticipantId>,
}

/// Removal of one squad member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickFromSquadRequest {
    /// The war to modify.
    pub war_id: WarId,
    /// The operator issuing the write.
    pub operator_id: String,
    /// The version the operator last saw.
    #[serde(default)]
    pub expected_version: Option<VersionToken>,
    /// The participant to remove.
    pub participant_id: ParticipantId,
    /// The squad it is removed from.
    pub squad_id: SquadId,
}

/// Removal of one pool participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickFromPoolRequest {
    /// The war to modify.
    pub war_id: WarId,
    /// The operator issuing the write.
    pub operator_id: String,
    /// The version the operator last saw.
    #[serde(default)]
    pub expected_version: Option<VersionToken>,
    /// The participant to remove.
    pub participant_id: ParticipantId,
}

/// Acknowledgement of an accepted mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationAck {
    /// The war that was modified.
    pub war_id: WarId,
    /// The roster's version after the mutation.
    pub version: VersionToken,
}

/// Machine-readable failure class carried by error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The expected version is stale.
    VersionMismatch,
    /// The request was refused as invalid.
    Rejected,
    /// The war does not exist.
    NotFound,
    /// Something failed on the service side.
    Internal,
}

/// Error body returned by the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Failure class.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// The roster's current version, present on a version mismatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_version: Option<VersionToken>,
}
