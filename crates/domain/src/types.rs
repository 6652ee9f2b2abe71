// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Declares an opaque string identifier with the common constructor,
/// accessor and `Display` implementations.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            value: String,
        }

        impl $name {
            /// Creates a new identifier from its string value.
            #[must_use]
            pub fn new(value: &str) -> Self {
                Self {
                    value: value.to_string(),
                }
            }

            /// Returns the identifier value.
            #[must_use]
            pub fn value(&self) -> &str {
                &self.value
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

string_id!(
    /// Identifies a participant across the whole roster directory.
    ParticipantId
);

string_id!(
    /// Identifies a squad within one war.
    SquadId
);

string_id!(
    /// Identifies the war whose roster is being coordinated.
    WarId
);

string_id!(
    /// Opaque value representing the service's last known roster state.
    ///
    /// The token is only ever produced by the remote service. Local edits
    /// never construct or alter one.
    VersionToken
);

string_id!(
    /// Free-form role label on a squad membership (lead, damage, tank, heal).
    ///
    /// Role tags carry no uniqueness constraint within a squad.
    RoleTag
);

/// A participant record as published by the member directory.
///
/// Participants are immutable from the coordinator's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The participant identifier.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
    /// Power/strength scalar used for sorting and squad totals.
    pub power: u64,
    /// Class tags (zero or more).
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Participant {
    /// Creates a new participant record.
    ///
    /// # Arguments
    ///
    /// * `id` - The participant identifier
    /// * `name` - The display name
    /// * `power` - The power/strength scalar
    /// * `classes` - Class tags
    #[must_use]
    pub const fn new(id: ParticipantId, name: String, power: u64, classes: Vec<String>) -> Self {
        Self {
            id,
            name,
            power,
            classes,
        }
    }
}

/// A participant's membership record inside exactly one squad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadAssignment {
    /// The assigned participant.
    pub participant_id: ParticipantId,
    /// Optional role label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleTag>,
}

impl SquadAssignment {
    /// Creates an assignment without a role tag.
    #[must_use]
    pub const fn new(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            role: None,
        }
    }

    /// Creates an assignment with a role tag.
    #[must_use]
    pub const fn with_role(participant_id: ParticipantId, role: RoleTag) -> Self {
        Self {
            participant_id,
            role: Some(role),
        }
    }
}

/// A named sub-team with an ordered member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squad {
    /// The squad identifier.
    pub id: SquadId,
    /// Display name.
    pub name: String,
    /// Members in assignment order.
    #[serde(default)]
    pub members: Vec<SquadAssignment>,
    /// Optional operator note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Locked squads reject moves in and out.
    #[serde(default)]
    pub locked: bool,
}

impl Squad {
    /// Creates an empty, unlocked squad.
    #[must_use]
    pub const fn new(id: SquadId, name: String) -> Self {
        Self {
            id,
            name,
            members: Vec::new(),
            note: None,
            locked: false,
        }
    }

    /// Returns whether the participant is a member of this squad.
    #[must_use]
    pub fn contains(&self, participant_id: &ParticipantId) -> bool {
        self.members
            .iter()
            .any(|m| &m.participant_id == participant_id)
    }

    /// Returns the member identifiers in order.
    pub fn member_ids(&self) -> impl Iterator<Item = &ParticipantId> {
        self.members.iter().map(|m| &m.participant_id)
    }
}

/// Where a participant currently lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "squad_id", rename_all = "snake_case")]
pub enum Container {
    /// The unassigned pool.
    Pool,
    /// A specific squad.
    Squad(SquadId),
}

impl Container {
    /// Returns the squad identifier if this container is a squad.
    #[must_use]
    pub const fn squad_id(&self) -> Option<&SquadId> {
        match self {
            Self::Pool => None,
            Self::Squad(id) => Some(id),
        }
    }

    /// Returns whether this container is the pool.
    #[must_use]
    pub const fn is_pool(&self) -> bool {
        matches!(self, Self::Pool)
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pool => write!(f, "pool"),
            Self::Squad(id) => write!(f, "squad '{id}'"),
        }
    }
}
