// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};
use war_roster_domain::{Participant, Squad, WarId};

/// One war as it appears in a seed file.
///
/// Seeds carry no version: the database assigns revision 1 on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarSeed {
    /// The war identifier.
    pub war_id: WarId,
    /// Squads in display order.
    #[serde(default)]
    pub squads: Vec<Squad>,
    /// Participants not assigned to any squad.
    #[serde(default)]
    pub pool: Vec<Participant>,
    /// Participant records for every squad member.
    #[serde(default)]
    pub assigned: Vec<Participant>,
}

/// The top-level seed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFile {
    /// Wars to load.
    #[serde(default)]
    pub wars: Vec<WarSeed>,
}

impl SeedFile {
    /// Parses a seed document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, PersistenceError> {
        let contents: String = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
