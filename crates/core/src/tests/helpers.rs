// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::SnapshotStore;
use time::OffsetDateTime;
use time::macros::datetime;
use war_roster_domain::{
    Container, Participant, ParticipantId, Snapshot, Squad, SquadAssignment, SquadId,
    VersionToken, WarId,
};

pub fn pid(id: &str) -> ParticipantId {
    ParticipantId::new(id)
}

pub fn ids(list: &[&str]) -> Vec<ParticipantId> {
    list.iter().map(|id| ParticipantId::new(id)).collect()
}

pub fn squad_of(id: &str) -> Container {
    Container::Squad(SquadId::new(id))
}

pub fn create_test_participant(id: &str) -> Participant {
    Participant::new(ParticipantId::new(id), format!("Player {id}"), 100, vec![])
}

pub fn create_test_squad(id: &str, name: &str, members: &[&str]) -> Squad {
    let mut squad: Squad = Squad::new(SquadId::new(id), String::from(name));
    squad.members = members
        .iter()
        .map(|m| SquadAssignment::new(ParticipantId::new(m)))
        .collect();
    squad
}

/// Builds test snapshots squad by squad.
#[derive(Debug, Default)]
pub struct TestRoster {
    squads: Vec<Squad>,
    assigned: Vec<Participant>,
    pool: Vec<Participant>,
}

impl TestRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn squad(mut self, id: &str, members: &[&str]) -> Self {
        self.squads
            .push(create_test_squad(id, &capitalize(id), members));
        self.assigned
            .extend(members.iter().map(|m| create_test_participant(m)));
        self
    }

    pub fn locked_squad(mut self, id: &str, members: &[&str]) -> Self {
        self = self.squad(id, members);
        if let Some(squad) = self.squads.last_mut() {
            squad.locked = true;
        }
        self
    }

    pub fn pool(mut self, members: &[&str]) -> Self {
        self.pool
            .extend(members.iter().map(|m| create_test_participant(m)));
        self
    }

    pub fn build(self) -> Snapshot {
        Snapshot::new(
            self.squads,
            self.pool,
            self.assigned,
            VersionToken::new("v1"),
        )
        .expect("test snapshot is valid")
    }
}

pub fn create_test_store(snapshot: Snapshot) -> SnapshotStore {
    SnapshotStore::new(WarId::new("war-1"), snapshot)
}

pub fn member_ids(snapshot: &Snapshot, squad: &str) -> Vec<String> {
    snapshot
        .squad(&SquadId::new(squad))
        .expect("squad exists")
        .member_ids()
        .map(|id| id.value().to_string())
        .collect()
}

pub fn pool_ids(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .pool_ids()
        .iter()
        .map(|id| id.value().to_string())
        .collect()
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-01 20:00 UTC)
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
