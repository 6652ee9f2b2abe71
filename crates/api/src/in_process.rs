// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request_response::{
    KickFromPoolRequest, KickFromSquadRequest, MovePoolToSquadRequest, MoveSquadToPoolRequest,
    MoveSquadToSquadRequest, MutationAck, RosterResponse,
};
use crate::service::{RemoteError, RosterService, TransientKind};
use std::sync::Arc;
use tokio::sync::Mutex;
use war_roster::{PoolToSquad, SquadToSquad};
use war_roster_domain::{RosterDocument, VersionToken, WarId};
use war_roster_persistence::{PersistenceError, RosterDatabase};

impl From<PersistenceError> for RemoteError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::VersionMismatch { expected, current } => {
                Self::VersionMismatch { expected, current }
            }
            PersistenceError::WarNotFound(_)
            | PersistenceError::DuplicateWar(_)
            | PersistenceError::InvalidMove(_)
            | PersistenceError::EmptyBatch
            | PersistenceError::DomainViolation(_) => Self::Rejected {
                message: err.to_string(),
            },
            PersistenceError::SerializationError(_) | PersistenceError::Io(_) => Self::Transient {
                kind: TransientKind::Server,
                message: err.to_string(),
            },
        }
    }
}

/// A roster service backed by a database in the same process.
///
/// Clones share the database, so several sessions (one per operator) can
/// edit the same wars and observe each other's revisions.
#[derive(Debug, Clone)]
pub struct InProcessRosterService {
    database: Arc<Mutex<RosterDatabase>>,
}

impl InProcessRosterService {
    /// Wraps a database.
    #[must_use]
    pub fn new(database: RosterDatabase) -> Self {
        Self::shared(Arc::new(Mutex::new(database)))
    }

    /// Wraps an already shared database.
    #[must_use]
    pub const fn shared(database: Arc<Mutex<RosterDatabase>>) -> Self {
        Self { database }
    }

    /// Returns the shared database handle.
    #[must_use]
    pub fn database(&self) -> Arc<Mutex<RosterDatabase>> {
        Arc::clone(&self.database)
    }
}

fn ack(
    war_id: WarId,
    result: Result<VersionToken, PersistenceError>,
) -> Result<MutationAck, RemoteError> {
    let version: VersionToken = result?;
    Ok(MutationAck { war_id, version })
}

impl RosterService for InProcessRosterService {
    async fn fetch_war_roster(&self, war_id: &WarId) -> Result<RosterResponse, RemoteError> {
        let database = self.database.lock().await;
        let roster: RosterDocument = database.fetch_roster(war_id)?;
        Ok(RosterResponse {
            war_id: war_id.clone(),
            roster,
        })
    }

    async fn move_pool_to_squad(
        &self,
        request: MovePoolToSquadRequest,
    ) -> Result<MutationAck, RemoteError> {
        let moves: Vec<PoolToSquad> = request.moves.into_iter().map(PoolToSquad::from).collect();
        let mut database = self.database.lock().await;
        let result = database.move_pool_to_squad(
            &request.war_id,
            &request.operator_id,
            request.expected_version.as_ref(),
            &moves,
        );
        ack(request.war_id, result)
    }

    async fn move_squad_to_squad(
        &self,
        request: MoveSquadToSquadRequest,
    ) -> Result<MutationAck, RemoteError> {
        let moves: Vec<SquadToSquad> = request.moves.into_iter().map(SquadToSquad::from).collect();
        let mut database = self.database.lock().await;
        let result = database.move_squad_to_squad(
            &request.war_id,
            &request.operator_id,
            request.expected_version.as_ref(),
            &moves,
        );
        ack(request.war_id, result)
    }

    async fn move_squad_to_pool(
        &self,
        request: MoveSquadToPoolRequest,
    ) -> Result<MutationAck, RemoteError> {
        let mut database = self.database.lock().await;
        let result = database.move_squad_to_pool(
            &request.war_id,
            &request.operator_id,
            request.expected_version.as_ref(),
            &request.participant_ids,
        );
        ack(request.war_id, result)
    }

    async fn kick_from_squad(
        &self,
        request: KickFromSquadRequest,
    ) -> Result<MutationAck, RemoteError> {
        let mut database = self.database.lock().await;
        let result = database.kick_from_squad(
            &request.war_id,
            &request.operator_id,
            request.expected_version.as_ref(),
            &request.participant_id,
            &request.squad_id,
        );
        ack(request.war_id, result)
    }

    async fn kick_from_pool(&self, request: KickFromPoolRequest) -> Result<MutationAck, RemoteError> {
        let mut database = self.database.lock().await;
        let result = database.kick_from_pool(
            &request.war_id,
            &request.operator_id,
            request.expected_version.as_ref(),
            &request.participant_id,
        );
        ack(request.war_id, result)
    }
}
