// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{Participant, ParticipantId, Snapshot, Squad, SquadAssignment, SquadId, VersionToken};

pub fn participant(id: &str, power: u64) -> Participant {
    Participant::new(
        ParticipantId::new(id),
        format!("Player {id}"),
        power,
        vec![String::from("warrior")],
    )
}

pub fn squad(id: &str, members: &[&str]) -> Squad {
    let mut squad: Squad = Squad::new(SquadId::new(id), format!("Squad {id}"));
    squad.members = members
        .iter()
        .map(|m| SquadAssignment::new(ParticipantId::new(m)))
        .collect();
    squad
}

/// Pool holds A and B, Alpha holds C, Bravo holds D and E.
pub fn sample_snapshot() -> Snapshot {
    Snapshot::new(
        vec![squad("alpha", &["C"]), squad("bravo", &["D", "E"])],
        vec![participant("A", 100), participant("B", 250)],
        vec![
            participant("C", 300),
            participant("D", 50),
            participant("E", 75),
        ],
        VersionToken::new("v1"),
    )
    .expect("sample snapshot is valid")
}
