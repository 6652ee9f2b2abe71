// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{RosterDatabase, WarSeed};
use war_roster_domain::{
    Participant, ParticipantId, Squad, SquadAssignment, SquadId, VersionToken, WarId,
};

pub const OPERATOR_ONE: &str = "op-1";
pub const OPERATOR_TWO: &str = "op-2";

pub fn war() -> WarId {
    WarId::new("war-1")
}

pub fn pid(id: &str) -> ParticipantId {
    ParticipantId::new(id)
}

pub fn sid(id: &str) -> SquadId {
    SquadId::new(id)
}

pub fn create_test_participant(id: &str) -> Participant {
    Participant::new(
        ParticipantId::new(id),
        format!("Player {id}"),
        100,
        Vec::new(),
    )
}

pub fn create_test_squad(id: &str, members: &[&str], locked: bool) -> Squad {
    let mut squad: Squad = Squad::new(SquadId::new(id), id.to_uppercase());
    squad.members = members
        .iter()
        .map(|m| SquadAssignment::new(ParticipantId::new(m)))
        .collect();
    squad.locked = locked;
    squad
}

/// Pool: A, B. Alpha: C. Bravo: D. Charlie (locked): E.
pub fn create_test_seed() -> WarSeed {
    WarSeed {
        war_id: war(),
        squads: vec![
            create_test_squad("alpha", &["C"], false),
            create_test_squad("bravo", &["D"], false),
            create_test_squad("charlie", &["E"], true),
        ],
        pool: vec![create_test_participant("A"), create_test_participant("B")],
        assigned: vec![
            create_test_participant("C"),
            create_test_participant("D"),
            create_test_participant("E"),
        ],
    }
}

pub fn create_test_database() -> (RosterDatabase, VersionToken) {
    let mut database: RosterDatabase = RosterDatabase::new();
    let version: VersionToken = database
        .insert_war(create_test_seed())
        .expect("seed should be valid");
    (database, version)
}
