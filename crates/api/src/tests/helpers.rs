// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::{HashMap, VecDeque};
use std::future::{Future, Ready, ready};
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;
use time::macros::datetime;
use war_roster::RemoteOperation;
use war_roster_domain::{
    Participant, ParticipantId, RosterDocument, Snapshot, Squad, SquadAssignment, SquadId,
    VersionToken, WarId,
};

use crate::{
    Dispatcher, KickFromPoolRequest, KickFromSquadRequest, ManualClock, MovePoolToSquadRequest,
    MoveSquadToPoolRequest, MoveSquadToSquadRequest, MutationAck, RemoteError, RosterResponse,
    RosterService, SessionConfig, TransientKind, WarSession,
};

pub const OPERATOR: &str = "op-1";

/// A recorded call to the scripted service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch(WarId),
    PoolToSquad(MovePoolToSquadRequest),
    SquadToSquad(MoveSquadToSquadRequest),
    SquadToPool(MoveSquadToPoolRequest),
    KickFromSquad(KickFromSquadRequest),
    KickFromPool(KickFromPoolRequest),
}

impl Call {
    pub const fn operation(&self) -> RemoteOperation {
        match self {
            Self::Fetch(_) => RemoteOperation::FetchRoster,
            Self::PoolToSquad(_) => RemoteOperation::MovePoolToSquad,
            Self::SquadToSquad(_) => RemoteOperation::MoveSquadToSquad,
            Self::SquadToPool(_) => RemoteOperation::MoveSquadToPool,
            Self::KickFromSquad(_) => RemoteOperation::KickFromSquad,
            Self::KickFromPool(_) => RemoteOperation::KickFromPool,
        }
    }

    pub fn expected_version(&self) -> Option<&VersionToken> {
        match self {
            Self::Fetch(_) => None,
            Self::PoolToSquad(r) => r.expected_version.as_ref(),
            Self::SquadToSquad(r) => r.expected_version.as_ref(),
            Self::SquadToPool(r) => r.expected_version.as_ref(),
            Self::KickFromSquad(r) => r.expected_version.as_ref(),
            Self::KickFromPool(r) => r.expected_version.as_ref(),
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    roster: Option<RosterDocument>,
    calls: Vec<Call>,
    failures: HashMap<RemoteOperation, VecDeque<RemoteError>>,
    revision: u64,
}

/// A roster service that records every call and answers from a script.
///
/// Mutations succeed with versions `ack-1`, `ack-2`, ... unless a failure
/// was queued for that operation. Fetches return the configured roster.
#[derive(Debug, Clone, Default)]
pub struct ScriptedService {
    script: Arc<Mutex<Script>>,
}

impl ScriptedService {
    pub fn with_roster(roster: RosterDocument) -> Self {
        let service: Self = Self::default();
        service.set_roster(roster);
        service
    }

    pub fn set_roster(&self, roster: RosterDocument) {
        self.script.lock().unwrap().roster = Some(roster);
    }

    pub fn fail_next(&self, operation: RemoteOperation, error: RemoteError) {
        self.script
            .lock()
            .unwrap()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn operations(&self) -> Vec<RemoteOperation> {
        self.calls().iter().map(Call::operation).collect()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| !matches!(c, Call::Fetch(_)))
            .count()
    }

    fn take_failure(script: &mut Script, operation: RemoteOperation) -> Option<RemoteError> {
        script
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
    }

    fn mutate(&self, war_id: WarId, call: Call) -> Ready<Result<MutationAck, RemoteError>> {
        let mut script = self.script.lock().unwrap();
        let operation: RemoteOperation = call.operation();
        script.calls.push(call);
        if let Some(error) = Self::take_failure(&mut script, operation) {
            return ready(Err(error));
        }
        script.revision += 1;
        let version: VersionToken = VersionToken::new(&format!("ack-{}", script.revision));
        ready(Ok(MutationAck { war_id, version }))
    }
}

impl RosterService for ScriptedService {
    fn fetch_war_roster(
        &self,
        war_id: &WarId,
    ) -> impl Future<Output = Result<RosterResponse, RemoteError>> + Send {
        let mut script = self.script.lock().unwrap();
        script.calls.push(Call::Fetch(war_id.clone()));
        let result: Result<RosterResponse, RemoteError> =
            match Self::take_failure(&mut script, RemoteOperation::FetchRoster) {
                Some(error) => Err(error),
                None => script
                    .roster
                    .clone()
                    .map(|roster| RosterResponse {
                        war_id: war_id.clone(),
                        roster,
                    })
                    .ok_or_else(|| RemoteError::Rejected {
                        message: format!("War not found: {war_id}"),
                    }),
            };
        ready(result)
    }

    fn move_pool_to_squad(
        &self,
        request: MovePoolToSquadRequest,
    ) -> impl Future<Output = Result<MutationAck, RemoteError>> + Send {
        self.mutate(request.war_id.clone(), Call::PoolToSquad(request))
    }

    fn move_squad_to_squad(
        &self,
        request: MoveSquadToSquadRequest,
    ) -> impl Future<Output = Result<MutationAck, RemoteError>> + Send {
        self.mutate(request.war_id.clone(), Call::SquadToSquad(request))
    }

    fn move_squad_to_pool(
        &self,
        request: MoveSquadToPoolRequest,
    ) -> impl Future<Output = Result<MutationAck, RemoteError>> + Send {
        self.mutate(request.war_id.clone(), Call::SquadToPool(request))
    }

    fn kick_from_squad(
        &self,
        request: KickFromSquadRequest,
    ) -> impl Future<Output = Result<MutationAck, RemoteError>> + Send {
        self.mutate(request.war_id.clone(), Call::KickFromSquad(request))
    }

    fn kick_from_pool(
        &self,
        request: KickFromPoolRequest,
    ) -> impl Future<Output = Result<MutationAck, RemoteError>> + Send {
        self.mutate(request.war_id.clone(), Call::KickFromPool(request))
    }
}

pub fn version_mismatch() -> RemoteError {
    RemoteError::VersionMismatch {
        expected: VersionToken::new("v1"),
        current: VersionToken::new("v9"),
    }
}

pub fn timeout() -> RemoteError {
    RemoteError::Transient {
        kind: TransientKind::Timeout,
        message: String::from("no answer after 10s"),
    }
}

pub fn war() -> WarId {
    WarId::new("war-1")
}

pub fn pid(id: &str) -> ParticipantId {
    ParticipantId::new(id)
}

pub fn sid(id: &str) -> SquadId {
    SquadId::new(id)
}

pub fn squad_of(id: &str) -> war_roster_domain::Container {
    war_roster_domain::Container::Squad(sid(id))
}

pub fn create_test_participant(id: &str) -> Participant {
    Participant::new(pid(id), format!("Player {id}"), 100, Vec::new())
}

/// Builds a squad named after its capitalized identifier.
pub fn create_test_squad(id: &str, members: &[&str]) -> Squad {
    let mut chars = id.chars();
    let name: String = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default();
    let mut squad: Squad = Squad::new(sid(id), name);
    squad.members = members
        .iter()
        .map(|m| SquadAssignment::new(pid(m)))
        .collect();
    squad
}

/// Builds a roster; squad member records are generated from their ids.
pub fn create_test_roster(squads: Vec<Squad>, pool: &[&str], version: &str) -> RosterDocument {
    let assigned: Vec<Participant> = squads
        .iter()
        .flat_map(|s| s.member_ids())
        .map(|id| create_test_participant(id.value()))
        .collect();
    RosterDocument {
        squads,
        pool: pool.iter().map(|id| create_test_participant(id)).collect(),
        assigned,
        version: VersionToken::new(version),
    }
}

pub fn test_start() -> OffsetDateTime {
    datetime!(2026-03-01 20:00 UTC)
}

pub struct Harness {
    pub session: WarSession<ScriptedService, ManualClock>,
    pub service: ScriptedService,
    pub clock: ManualClock,
}

/// Builds a session over `roster` with a scripted service and a manual clock.
pub fn create_test_session(roster: RosterDocument) -> Harness {
    let service: ScriptedService = ScriptedService::with_roster(roster.clone());
    let clock: ManualClock = ManualClock::new(test_start());
    let snapshot: Snapshot = Snapshot::from_document(roster).unwrap();
    let session = WarSession::with_snapshot(
        Dispatcher::new(service.clone()),
        clock.clone(),
        SessionConfig::new(OPERATOR),
        war(),
        snapshot,
    );
    Harness {
        session,
        service,
        clock,
    }
}

pub fn member_ids(snapshot: &Snapshot, squad: &str) -> Vec<String> {
    snapshot
        .squad(&sid(squad))
        .unwrap()
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
