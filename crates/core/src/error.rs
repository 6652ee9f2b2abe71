// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use war_roster_domain::{DomainError, ParticipantId, SquadId};

/// Errors that can occur while planning or applying local edits.
///
/// These indicate a caller handed the engine something that does not match
/// the current snapshot; they are not user-facing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A move was requested with no participants.
    EmptyMoveSet,
    /// The participant is not part of the current snapshot.
    UnknownParticipant(ParticipantId),
    /// The destination squad is not part of the current snapshot.
    UnknownSquad(SquadId),
    /// The squad is locked and rejects moves in and out.
    SquadLocked(SquadId),
    /// A kick was confirmed without being requested first.
    NoPendingKick,
    /// A resolution was requested with no conflict open.
    NoOpenConflict,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::EmptyMoveSet => write!(f, "Move requested with no participants"),
            Self::UnknownParticipant(id) => {
                write!(f, "Participant '{id}' is not in the current roster")
            }
            Self::UnknownSquad(id) => write!(f, "Squad '{id}' is not in the current roster"),
            Self::SquadLocked(id) => write!(f, "Squad '{id}' is locked"),
            Self::NoPendingKick => write!(f, "No kick is awaiting confirmation"),
            Self::NoOpenConflict => write!(f, "No version conflict is open"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
