// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    Call, Harness, create_test_roster, create_test_session, create_test_squad, member_ids, pid,
    pool_ids, squad_of, timeout, version_mismatch,
};
use crate::{ApiError, RemoteError};
use war_roster::{Conflict, CoreError, RemoteOperation, Resolution, Routed};
use war_roster_domain::VersionToken;

fn moved_a_into_alpha_with_mismatch() -> Harness {
    let mut harness: Harness = create_test_session(create_test_roster(
        vec![create_test_squad("alpha", &[])],
        &["A", "B"],
        "v1",
    ));
    harness
        .service
        .fail_next(RemoteOperation::MovePoolToSquad, version_mismatch());
    harness.session.toggle(&pid("A"), false);
    harness
}

#[tokio::test]
async fn test_version_mismatch_opens_conflict() {
    let mut harness: Harness = moved_a_into_alpha_with_mismatch();

    harness
        .session
        .move_selection(&squad_of("alpha"))
        .await
        .unwrap();

    let conflict: &Conflict = harness.session.conflict().unwrap();
    assert_eq!(conflict.operation, RemoteOperation::MovePoolToSquad);
    assert_eq!(conflict.occurrences, 1);
    assert!(harness.session.notices().is_empty());
    // The optimistic edit stands until the operator decides.
    assert_eq!(member_ids(harness.session.snapshot(), "alpha"), vec!["A"]);
}

#[tokio::test]
async fn test_transient_failure_never_opens_conflict() {
    let mut harness: Harness = create_test_session(create_test_roster(
        vec![create_test_squad("alpha", &[])],
        &["A"],
        "v1",
    ));
    harness
        .service
        .fail_next(RemoteOperation::MovePoolToSquad, timeout());
    harness.session.toggle(&pid("A"), false);

    let plan = harness
        .session
        .stage_move(&squad_of("alpha"))
        .unwrap()
        .unwrap();
    let report = harness.session.dispatcher().dispatch(&plan).await;
    let routed: Vec<Routed> = harness.session.apply_report(&report);

    assert!(matches!(routed.as_slice(), [Routed::Notice(_)]));
    assert!(harness.session.conflict().is_none());
}

#[tokio::test]
async fn test_rejected_failure_becomes_notice() {
    let mut harness: Harness = create_test_session(create_test_roster(
        vec![create_test_squad("alpha", &[])],
        &["A"],
        "v1",
    ));
    harness.service.fail_next(
        RemoteOperation::MovePoolToSquad,
        RemoteError::Rejected {
            message: String::from("Squad 'alpha' is full"),
        },
    );
    harness.session.toggle(&pid("A"), false);

    harness
        .session
        .move_selection(&squad_of("alpha"))
        .await
        .unwrap();

    assert!(harness.session.conflict().is_none());
    assert!(harness.session.notices()[0].message.contains("full"));
}

#[tokio::test]
async fn test_refresh_resolution_discards_optimistic_edit() {
    let mut harness: Harness = moved_a_into_alpha_with_mismatch();
    harness
        .session
        .move_selection(&squad_of("alpha"))
        .await
        .unwrap();
    harness.service.set_roster(create_test_roster(
        vec![create_test_squad("alpha", &["B"])],
        &["A"],
        "v9",
    ));

    let closed: Conflict = harness
        .session
        .resolve_conflict(Resolution::Refresh)
        .await
        .unwrap();

    assert_eq!(closed.operation, RemoteOperation::MovePoolToSquad);
    assert!(harness.session.conflict().is_none());
    assert_eq!(pool_ids(harness.session.snapshot()), vec!["A"]);
    assert_eq!(member_ids(harness.session.snapshot(), "alpha"), vec!["B"]);
    assert_eq!(
        harness.session.snapshot().version(),
        &VersionToken::new("v9")
    );
    assert!(harness.session.pending_action().is_none());
}

#[tokio::test]
async fn test_override_resolution_keeps_edit_and_writes_blind() {
    let mut harness: Harness = moved_a_into_alpha_with_mismatch();
    harness
        .session
        .move_selection(&squad_of("alpha"))
        .await
        .unwrap();

    harness
        .session
        .resolve_conflict(Resolution::Override)
        .await
        .unwrap();

    assert!(harness.session.conflict().is_none());
    assert_eq!(member_ids(harness.session.snapshot(), "alpha"), vec!["A"]);
    assert_eq!(harness.session.expected_version(), None);
    assert_eq!(
        harness.session.snapshot().version(),
        &VersionToken::new("v1")
    );

    harness.session.toggle(&pid("B"), false);
    harness
        .session
        .move_selection(&squad_of("alpha"))
        .await
        .unwrap();

    let calls: Vec<Call> = harness.service.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].expected_version(), Some(&VersionToken::new("v1")));
    assert_eq!(calls[1].expected_version(), None);
}

#[tokio::test]
async fn test_failed_refresh_keeps_conflict_open() {
    let mut harness: Harness = moved_a_into_alpha_with_mismatch();
    harness
        .session
        .move_selection(&squad_of("alpha"))
        .await
        .unwrap();
    harness
        .service
        .fail_next(RemoteOperation::FetchRoster, timeout());

    let result = harness.session.resolve_conflict(Resolution::Refresh).await;

    assert!(matches!(
        result,
        Err(ApiError::Remote {
            operation: RemoteOperation::FetchRoster,
            ..
        })
    ));
    assert!(harness.session.conflict().is_some());
    assert_eq!(member_ids(harness.session.snapshot(), "alpha"), vec!["A"]);
}

#[tokio::test]
async fn test_resolving_without_conflict_is_refused() {
    let mut harness: Harness = create_test_session(create_test_roster(
        vec![create_test_squad("alpha", &[])],
        &["A"],
        "v1",
    ));

    let result = harness.session.resolve_conflict(Resolution::Override).await;

    assert_eq!(result, Err(ApiError::Core(CoreError::NoOpenConflict)));
}

#[tokio::test]
async fn test_repeated_mismatch_counts_on_open_conflict() {
    let mut harness: Harness = moved_a_into_alpha_with_mismatch();
    harness
        .session
        .move_selection(&squad_of("alpha"))
        .await
        .unwrap();
    harness
        .service
        .fail_next(RemoteOperation::MovePoolToSquad, version_mismatch());
    harness.session.toggle(&pid("B"), false);

    harness
        .session
        .move_selection(&squad_of("alpha"))
        .await
        .unwrap();

    assert_eq!(harness.session.conflict().unwrap().occurrences, 2);
}
