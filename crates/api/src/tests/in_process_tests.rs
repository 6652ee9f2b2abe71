// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sessions running against the reference database.

use super::helpers::{member_ids, pid, pool_ids, squad_of, test_start, war};
use crate::{
    InProcessRosterService, ManualClock, RemoteError, RosterService, SessionConfig, WarSession,
};
use war_roster::{RemoteOperation, Resolution};
use war_roster_domain::{Container, Participant, ParticipantId, Squad, SquadAssignment, SquadId};
use war_roster_persistence::{PersistenceError, RosterDatabase, WarSeed};

type Session = WarSession<InProcessRosterService, ManualClock>;

fn participant(id: &str) -> Participant {
    Participant::new(ParticipantId::new(id), format!("Player {id}"), 100, Vec::new())
}

/// Pool: A, B, C. Alpha: D. Bravo: empty.
fn create_test_service() -> InProcessRosterService {
    let mut alpha: Squad = Squad::new(SquadId::new("alpha"), String::from("Alpha"));
    alpha.members.push(SquadAssignment::new(ParticipantId::new("D")));
    let bravo: Squad = Squad::new(SquadId::new("bravo"), String::from("Bravo"));

    let mut database: RosterDatabase = RosterDatabase::new();
    database
        .insert_war(WarSeed {
            war_id: war(),
            squads: vec![alpha, bravo],
            pool: vec![participant("A"), participant("B"), participant("C")],
            assigned: vec![participant("D")],
        })
        .unwrap();
    InProcessRosterService::new(database)
}

async fn open(service: &InProcessRosterService, operator: &str) -> Session {
    WarSession::open(
        service.clone(),
        ManualClock::new(test_start()),
        SessionConfig::new(operator),
        war(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_open_fetches_seeded_roster() {
    let service: InProcessRosterService = create_test_service();

    let session: Session = open(&service, "op-1").await;

    assert_eq!(pool_ids(session.snapshot()), vec!["A", "B", "C"]);
    assert_eq!(session.snapshot().version().value(), "war-1@1");
}

#[tokio::test]
async fn test_mixed_batch_is_accepted_in_one_event() {
    let service: InProcessRosterService = create_test_service();
    let mut session: Session = open(&service, "op-1").await;

    // A from the pool and D from alpha both go to bravo.
    session.toggle(&pid("A"), false);
    session.toggle(&pid("D"), true);
    let report = session
        .move_selection(&squad_of("bravo"))
        .await
        .unwrap()
        .unwrap();

    assert!(report.is_success());
    let database = service.database();
    let stored = database.lock().await;
    let snapshot = stored.snapshot(&war()).unwrap();
    assert_eq!(member_ids(snapshot, "bravo"), vec!["A", "D"]);
    assert!(member_ids(snapshot, "alpha").is_empty());
}

#[tokio::test]
async fn test_consecutive_moves_by_one_operator_do_not_conflict() {
    let service: InProcessRosterService = create_test_service();
    let mut session: Session = open(&service, "op-1").await;

    session.toggle(&pid("A"), false);
    session.move_selection(&squad_of("alpha")).await.unwrap();
    session.toggle(&pid("A"), false);
    session.move_selection(&squad_of("bravo")).await.unwrap();
    session.toggle(&pid("A"), false);
    session.move_selection(&Container::Pool).await.unwrap();

    assert!(session.conflict().is_none());
    assert!(session.notices().is_empty());
}

#[tokio::test]
async fn test_second_operator_sees_conflict_then_refreshes() {
    let service: InProcessRosterService = create_test_service();
    let mut first: Session = open(&service, "op-1").await;
    let mut second: Session = open(&service, "op-2").await;

    first.toggle(&pid("A"), false);
    first.move_selection(&squad_of("alpha")).await.unwrap();

    second.toggle(&pid("B"), false);
    second.move_selection(&squad_of("bravo")).await.unwrap();

    assert!(first.conflict().is_none());
    assert_eq!(
        second.conflict().unwrap().operation,
        RemoteOperation::MovePoolToSquad
    );

    second.resolve_conflict(Resolution::Refresh).await.unwrap();

    assert_eq!(member_ids(second.snapshot(), "alpha"), vec!["D", "A"]);
    assert!(member_ids(second.snapshot(), "bravo").is_empty());
    assert_eq!(pool_ids(second.snapshot()), vec!["B", "C"]);
}

#[tokio::test]
async fn test_override_lets_second_operator_write() {
    let service: InProcessRosterService = create_test_service();
    let mut first: Session = open(&service, "op-1").await;
    let mut second: Session = open(&service, "op-2").await;

    first.toggle(&pid("A"), false);
    first.move_selection(&squad_of("alpha")).await.unwrap();
    second.toggle(&pid("B"), false);
    second.move_selection(&squad_of("bravo")).await.unwrap();

    second.resolve_conflict(Resolution::Override).await.unwrap();
    second.toggle(&pid("C"), false);
    let report = second
        .move_selection(&squad_of("bravo"))
        .await
        .unwrap()
        .unwrap();

    assert!(report.is_success());
    assert!(second.conflict().is_none());
    let database = service.database();
    let stored = database.lock().await;
    // B's rejected move never reached the service; C's blind write did.
    assert_eq!(
        member_ids(stored.snapshot(&war()).unwrap(), "bravo"),
        vec!["C"]
    );
}

#[tokio::test]
async fn test_unknown_war_is_rejected() {
    let service: InProcessRosterService = create_test_service();

    let result = service
        .fetch_war_roster(&war_roster_domain::WarId::new("missing"))
        .await;

    assert!(matches!(result, Err(RemoteError::Rejected { .. })));
}

#[test]
fn test_persistence_errors_map_to_remote_errors() {
    let mismatch: RemoteError = PersistenceError::VersionMismatch {
        expected: war_roster_domain::VersionToken::new("war-1@1"),
        current: war_roster_domain::VersionToken::new("war-1@2"),
    }
    .into();
    let invalid: RemoteError = PersistenceError::EmptyBatch.into();
    let io: RemoteError = PersistenceError::Io(String::from("disk")).into();

    assert!(matches!(mismatch, RemoteError::VersionMismatch { .. }));
    assert!(matches!(invalid, RemoteError::Rejected { .. }));
    assert!(matches!(io, RemoteError::Transient { .. }));
}
