// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{TestRoster, ids, pid, squad_of};
use crate::{
    ClassifiedMoves, CoreError, Move, MoveCategory, PoolToSquad, SquadToPool, SquadToSquad,
    classify,
};
use war_roster_domain::{Container, Snapshot, SquadId};

fn mixed_snapshot() -> Snapshot {
    TestRoster::new()
        .squad("alpha", &["A"])
        .squad("bravo", &["B"])
        .pool(&["P", "Q"])
        .build()
}

#[test]
fn test_pool_members_to_squad_are_pool_to_squad() {
    let snapshot: Snapshot = mixed_snapshot();

    let moves: ClassifiedMoves = classify(&ids(&["P", "Q"]), &squad_of("alpha"), &snapshot).unwrap();

    assert_eq!(
        moves.pool_to_squad,
        vec![
            PoolToSquad {
                participant_id: pid("P"),
                squad_id: SquadId::new("alpha"),
            },
            PoolToSquad {
                participant_id: pid("Q"),
                squad_id: SquadId::new("alpha"),
            },
        ]
    );
    assert!(moves.squad_to_squad.is_empty());
    assert!(moves.squad_to_pool.is_empty());
}

#[test]
fn test_member_of_other_squad_is_squad_to_squad() {
    let snapshot: Snapshot = mixed_snapshot();

    let moves: ClassifiedMoves = classify(&ids(&["A"]), &squad_of("bravo"), &snapshot).unwrap();

    assert_eq!(
        moves.squad_to_squad,
        vec![SquadToSquad {
            participant_id: pid("A"),
            from_squad_id: SquadId::new("alpha"),
            to_squad_id: SquadId::new("bravo"),
        }]
    );
    assert_eq!(moves.len(), 1);
}

#[test]
fn test_squad_member_to_pool_is_squad_to_pool() {
    let snapshot: Snapshot = mixed_snapshot();

    let moves: ClassifiedMoves = classify(&ids(&["B"]), &Container::Pool, &snapshot).unwrap();

    assert_eq!(
        moves.squad_to_pool,
        vec![SquadToPool {
            participant_id: pid("B"),
            from_squad_id: SquadId::new("bravo"),
        }]
    );
}

#[test]
fn test_moves_into_current_container_are_dropped() {
    let snapshot: Snapshot = mixed_snapshot();

    let to_pool: ClassifiedMoves = classify(&ids(&["P", "Q"]), &Container::Pool, &snapshot).unwrap();
    let to_alpha: ClassifiedMoves = classify(&ids(&["A"]), &squad_of("alpha"), &snapshot).unwrap();

    assert!(to_pool.is_empty());
    assert!(to_alpha.is_empty());
    for category in MoveCategory::DISPATCH_ORDER {
        assert_eq!(to_pool.count(category), 0);
    }
}

#[test]
fn test_mixed_batch_is_partitioned_against_pre_move_snapshot() {
    let snapshot: Snapshot = mixed_snapshot();

    // A is already in alpha, B moves squads, P leaves the pool.
    let moves: ClassifiedMoves =
        classify(&ids(&["B", "A", "P"]), &squad_of("alpha"), &snapshot).unwrap();

    assert_eq!(moves.count(MoveCategory::PoolToSquad), 1);
    assert_eq!(moves.count(MoveCategory::SquadToSquad), 1);
    assert_eq!(moves.count(MoveCategory::SquadToPool), 0);

    let categories: Vec<MoveCategory> = moves.moves().iter().map(Move::category).collect();
    assert_eq!(
        categories,
        vec![MoveCategory::PoolToSquad, MoveCategory::SquadToSquad]
    );
}

#[test]
fn test_repeated_identifiers_are_classified_once() {
    let snapshot: Snapshot = mixed_snapshot();

    let moves: ClassifiedMoves =
        classify(&ids(&["P", "P"]), &squad_of("bravo"), &snapshot).unwrap();

    assert_eq!(moves.len(), 1);
}

#[test]
fn test_empty_move_set_is_rejected() {
    let snapshot: Snapshot = mixed_snapshot();

    let result = classify(&[], &Container::Pool, &snapshot);

    assert_eq!(result, Err(CoreError::EmptyMoveSet));
}

#[test]
fn test_unknown_participant_is_rejected() {
    let snapshot: Snapshot = mixed_snapshot();

    let result = classify(&ids(&["Z"]), &Container::Pool, &snapshot);

    assert_eq!(result, Err(CoreError::UnknownParticipant(pid("Z"))));
}

#[test]
fn test_unknown_destination_squad_is_rejected() {
    let snapshot: Snapshot = mixed_snapshot();

    let result = classify(&ids(&["P"]), &squad_of("zulu"), &snapshot);

    assert_eq!(result, Err(CoreError::UnknownSquad(SquadId::new("zulu"))));
}

#[test]
fn test_locked_squads_reject_moves_in_and_out() {
    let snapshot: Snapshot = TestRoster::new()
        .locked_squad("alpha", &["A"])
        .squad("bravo", &[])
        .pool(&["P"])
        .build();

    let into_locked = classify(&ids(&["P"]), &squad_of("alpha"), &snapshot);
    let out_of_locked = classify(&ids(&["A"]), &squad_of("bravo"), &snapshot);

    assert_eq!(into_locked, Err(CoreError::SquadLocked(SquadId::new("alpha"))));
    assert_eq!(out_of_locked, Err(CoreError::SquadLocked(SquadId::new("alpha"))));
}

#[test]
fn test_move_accessors() {
    let mv: Move = Move::SquadToSquad(SquadToSquad {
        participant_id: pid("A"),
        from_squad_id: SquadId::new("alpha"),
        to_squad_id: SquadId::new("bravo"),
    });

    assert_eq!(mv.participant_id(), &pid("A"));
    assert_eq!(mv.from_squad_id(), Some(&SquadId::new("alpha")));
    assert_eq!(mv.to_squad_id(), Some(&SquadId::new("bravo")));
    assert_eq!(mv.destination(), squad_of("bravo"));

    let home: Move = Move::SquadToPool(SquadToPool {
        participant_id: pid("A"),
        from_squad_id: SquadId::new("alpha"),
    });
    assert_eq!(home.to_squad_id(), None);
    assert_eq!(home.destination(), Container::Pool);
}
