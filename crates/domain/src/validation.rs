// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Container, Participant, ParticipantId, Squad};
use std::collections::{BTreeMap, HashSet};

/// Validates that a participant's basic field constraints are met.
///
/// # Errors
///
/// Returns an error if:
/// - The participant identifier is empty
/// - The participant name is empty
pub fn validate_participant(participant: &Participant) -> Result<(), DomainError> {
    if participant.id.value().trim().is_empty() {
        return Err(DomainError::InvalidParticipant(String::from(
            "Participant identifier cannot be empty",
        )));
    }

    if participant.name.trim().is_empty() {
        return Err(DomainError::InvalidParticipant(format!(
            "Participant '{}' has an empty name",
            participant.id
        )));
    }

    Ok(())
}

/// Validates that a squad's basic field constraints are met.
///
/// Membership is not checked here; see [`validate_partition`].
///
/// # Errors
///
/// Returns an error if the squad identifier or name is empty.
pub fn validate_squad(squad: &Squad) -> Result<(), DomainError> {
    if squad.id.value().trim().is_empty() {
        return Err(DomainError::InvalidSquad(String::from(
            "Squad identifier cannot be empty",
        )));
    }

    if squad.name.trim().is_empty() {
        return Err(DomainError::InvalidSquad(format!(
            "Squad '{}' has an empty name",
            squad.id
        )));
    }

    Ok(())
}

/// Validates the partition invariant and builds the container index.
///
/// Every participant identifier must appear in exactly one of the pool or
/// a single squad's member list, and squad identifiers must be unique.
///
/// # Arguments
///
/// * `squads` - The squads, in display order
/// * `pool` - The identifiers of participants in the unassigned pool
///
/// # Returns
///
/// The index mapping each participant to its container.
///
/// # Errors
///
/// Returns an error if:
/// - Two squads share an identifier
/// - A participant appears in more than one container (or twice in one)
pub fn validate_partition(
    squads: &[Squad],
    pool: &[ParticipantId],
) -> Result<BTreeMap<ParticipantId, Container>, DomainError> {
    let mut seen_squads: HashSet<&str> = HashSet::new();
    let mut index: BTreeMap<ParticipantId, Container> = BTreeMap::new();

    for id in pool {
        insert_unique(&mut index, id, Container::Pool)?;
    }

    for squad in squads {
        if !seen_squads.insert(squad.id.value()) {
            return Err(DomainError::DuplicateSquad(squad.id.clone()));
        }
        for id in squad.member_ids() {
            insert_unique(&mut index, id, Container::Squad(squad.id.clone()))?;
        }
    }

    Ok(index)
}

fn insert_unique(
    index: &mut BTreeMap<ParticipantId, Container>,
    id: &ParticipantId,
    container: Container,
) -> Result<(), DomainError> {
    if let Some(existing) = index.get(id) {
        return Err(DomainError::DuplicateParticipant {
            participant_id: id.clone(),
            first: existing.clone(),
            second: container,
        });
    }
    index.insert(id.clone(), container);
    Ok(())
}
