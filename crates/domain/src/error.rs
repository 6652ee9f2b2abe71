// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Container, ParticipantId, SquadId};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A participant appears in more than one container.
    DuplicateParticipant {
        /// The duplicated participant.
        participant_id: ParticipantId,
        /// The first container it was found in.
        first: Container,
        /// The second container it was found in.
        second: Container,
    },
    /// Two squads share the same identifier.
    DuplicateSquad(SquadId),
    /// A squad member has no participant record.
    MissingParticipantRecord(ParticipantId),
    /// The participant is not part of the snapshot.
    ParticipantNotFound(ParticipantId),
    /// The squad is not part of the snapshot.
    SquadNotFound(SquadId),
    /// The participant is not a member of the given squad.
    NotASquadMember {
        /// The participant.
        participant_id: ParticipantId,
        /// The squad that was expected to contain it.
        squad_id: SquadId,
    },
    /// Participant fields are empty or invalid.
    InvalidParticipant(String),
    /// Squad fields are empty or invalid.
    InvalidSquad(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateParticipant {
                participant_id,
                first,
                second,
            } => {
                write!(
                    f,
                    "Participant '{participant_id}' appears in both {first} and {second}"
                )
            }
            Self::DuplicateSquad(id) => write!(f, "Squad '{id}' is defined more than once"),
            Self::MissingParticipantRecord(id) => {
                write!(f, "No participant record for squad member '{id}'")
            }
            Self::ParticipantNotFound(id) => write!(f, "Participant '{id}' not found"),
            Self::SquadNotFound(id) => write!(f, "Squad '{id}' not found"),
            Self::NotASquadMember {
                participant_id,
                squad_id,
            } => {
                write!(
                    f,
                    "Participant '{participant_id}' is not a member of squad '{squad_id}'"
                )
            }
            Self::InvalidParticipant(msg) => write!(f, "Invalid participant: {msg}"),
            Self::InvalidSquad(msg) => write!(f, "Invalid squad: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
