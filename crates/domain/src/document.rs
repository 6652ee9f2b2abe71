// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Participant, Squad, VersionToken};
use serde::{Deserialize, Serialize};

/// The wire form of a roster snapshot.
///
/// This is what the persistence service returns from a roster fetch and
/// what seed files contain. Squad members reference participants by
/// identifier; their full records travel in `assigned`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterDocument {
    /// Squads in display order.
    #[serde(default)]
    pub squads: Vec<Squad>,
    /// Participants not assigned to any squad.
    #[serde(default)]
    pub pool: Vec<Participant>,
    /// Participant records for every squad member.
    #[serde(default)]
    pub assigned: Vec<Participant>,
    /// The service's version token for this roster.
    pub version: VersionToken,
}
