// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Remote dispatch of classified moves and confirmed kicks.
//!
//! A move event becomes up to three batched calls, one per non-empty
//! category. The calls run concurrently but are started in dispatch order:
//! pool to squad, then squad to squad, then squad to pool. A failure in one
//! category does not cancel the others; each outcome is reported on its own.

use crate::request_response::{
    KickFromPoolRequest, KickFromSquadRequest, MovePoolToSquadRequest, MoveSquadToPoolRequest,
    MoveSquadToSquadRequest, MutationAck, PoolToSquadEntry, RosterResponse, SquadToSquadEntry,
};
use crate::service::{RemoteError, RosterService};
use tracing::{debug, warn};
use war_roster::{ClassifiedMoves, KickRequest, MoveCategory, RemoteOperation};
use war_roster_domain::{Container, ParticipantId, Snapshot, VersionToken, WarId};

/// One move event, classified and ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPlan {
    /// The war being edited.
    pub war_id: WarId,
    /// The operator issuing the moves.
    pub operator_id: String,
    /// The version sent with every batch, `None` for a blind write.
    pub expected_version: Option<VersionToken>,
    /// The moves, grouped by category.
    pub moves: ClassifiedMoves,
}

impl DispatchPlan {
    /// Builds the pool to squad batch, if any.
    #[must_use]
    pub fn pool_to_squad_request(&self) -> Option<MovePoolToSquadRequest> {
        if self.moves.pool_to_squad.is_empty() {
            return None;
        }
        Some(MovePoolToSquadRequest {
            war_id: self.war_id.clone(),
            operator_id: self.operator_id.clone(),
            expected_version: self.expected_version.clone(),
            moves: self
                .moves
                .pool_to_squad
                .iter()
                .map(PoolToSquadEntry::from)
                .collect(),
        })
    }

    /// Builds the squad to squad batch, if any.
    #[must_use]
    pub fn squad_to_squad_request(&self) -> Option<MoveSquadToSquadRequest> {
        if self.moves.squad_to_squad.is_empty() {
            return None;
        }
        Some(MoveSquadToSquadRequest {
            war_id: self.war_id.clone(),
            operator_id: self.operator_id.clone(),
            expected_version: self.expected_version.clone(),
            moves: self
                .moves
                .squad_to_squad
                .iter()
                .map(SquadToSquadEntry::from)
                .collect(),
        })
    }

    /// Builds the squad to pool batch, if any.
    #[must_use]
    pub fn squad_to_pool_request(&self) -> Option<MoveSquadToPoolRequest> {
        if self.moves.squad_to_pool.is_empty() {
            return None;
        }
        Some(MoveSquadToPoolRequest {
            war_id: self.war_id.clone(),
            operator_id: self.operator_id.clone(),
            expected_version: self.expected_version.clone(),
            participant_ids: self
                .moves
                .squad_to_pool
                .iter()
                .map(|m| m.participant_id.clone())
                .collect(),
        })
    }
}

/// The result of one category's batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOutcome {
    /// The category.
    pub category: MoveCategory,
    /// How many moves the batch carried.
    pub moves: usize,
    /// The service's answer.
    pub result: Result<MutationAck, RemoteError>,
}

/// Per-category results of one move event, in dispatch order.
///
/// Categories with no moves are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// One entry per issued call.
    pub outcomes: Vec<CategoryOutcome>,
}

impl DispatchReport {
    /// Returns whether every issued call succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// Returns the failed calls.
    pub fn failures(&self) -> impl Iterator<Item = &CategoryOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Returns the outcome of one category, if it was issued.
    #[must_use]
    pub fn outcome(&self, category: MoveCategory) -> Option<&CategoryOutcome> {
        self.outcomes.iter().find(|o| o.category == category)
    }
}

/// A confirmed kick, already applied locally, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickDispatch {
    /// The war being edited.
    pub war_id: WarId,
    /// The operator issuing the kick.
    pub operator_id: String,
    /// The version sent with the kick.
    pub expected_version: Option<VersionToken>,
    /// What is being removed and from where.
    pub request: KickRequest,
    /// The local snapshot just before the removal, restored on failure.
    pub previous: Snapshot,
}

impl KickDispatch {
    /// Returns the participant being removed.
    #[must_use]
    pub const fn participant_id(&self) -> &ParticipantId {
        &self.request.participant_id
    }

    /// Returns the remote operation this kick is sent as.
    #[must_use]
    pub const fn operation(&self) -> RemoteOperation {
        match self.request.from {
            Container::Pool => RemoteOperation::KickFromPool,
            Container::Squad(_) => RemoteOperation::KickFromSquad,
        }
    }
}

/// Sends planned work to a roster service.
///
/// The dispatcher holds only a service handle, so it can be cloned out of a
/// session and awaited without borrowing the session.
#[derive(Debug, Clone)]
pub struct Dispatcher<S> {
    service: S,
}

impl<S: RosterService> Dispatcher<S> {
    /// Creates a dispatcher over a service handle.
    #[must_use]
    pub const fn new(service: S) -> Self {
        Self { service }
    }

    /// Returns the service handle.
    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Reads a war's full roster.
    ///
    /// # Errors
    ///
    /// Returns the service's error unchanged.
    pub async fn fetch(&self, war_id: &WarId) -> Result<RosterResponse, RemoteError> {
        debug!("Fetching roster for war {}", war_id);
        self.service.fetch_war_roster(war_id).await
    }

    /// Sends every non-empty category of a move event.
    pub async fn dispatch(&self, plan: &DispatchPlan) -> DispatchReport {
        let pool_to_squad = async {
            match plan.pool_to_squad_request() {
                Some(request) => Some(self.service.move_pool_to_squad(request).await),
                None => None,
            }
        };
        let squad_to_squad = async {
            match plan.squad_to_squad_request() {
                Some(request) => Some(self.service.move_squad_to_squad(request).await),
                None => None,
            }
        };
        let squad_to_pool = async {
            match plan.squad_to_pool_request() {
                Some(request) => Some(self.service.move_squad_to_pool(request).await),
                None => None,
            }
        };

        // join! polls in argument order, so the calls start in dispatch order.
        let (first, second, third) = futures::join!(pool_to_squad, squad_to_squad, squad_to_pool);

        let outcomes: Vec<CategoryOutcome> = [
            (MoveCategory::PoolToSquad, first),
            (MoveCategory::SquadToSquad, second),
            (MoveCategory::SquadToPool, third),
        ]
        .into_iter()
        .filter_map(|(category, result)| {
            result.map(|result| CategoryOutcome {
                category,
                moves: plan.moves.count(category),
                result,
            })
        })
        .collect();

        for outcome in &outcomes {
            match &outcome.result {
                Ok(ack) => debug!(
                    "{} batch of {} accepted at {}",
                    outcome.category, outcome.moves, ack.version
                ),
                Err(err) => warn!(
                    "{} batch of {} failed: {}",
                    outcome.category, outcome.moves, err
                ),
            }
        }

        DispatchReport { outcomes }
    }

    /// Sends a confirmed kick.
    ///
    /// # Errors
    ///
    /// Returns the service's error unchanged.
    pub async fn kick(&self, kick: &KickDispatch) -> Result<MutationAck, RemoteError> {
        let result: Result<MutationAck, RemoteError> = match &kick.request.from {
            Container::Squad(squad_id) => {
                self.service
                    .kick_from_squad(KickFromSquadRequest {
                        war_id: kick.war_id.clone(),
                        operator_id: kick.operator_id.clone(),
                        expected_version: kick.expected_version.clone(),
                        participant_id: kick.request.participant_id.clone(),
                        squad_id: squad_id.clone(),
                    })
                    .await
            }
            Container::Pool => {
                self.service
                    .kick_from_pool(KickFromPoolRequest {
                        war_id: kick.war_id.clone(),
                        operator_id: kick.operator_id.clone(),
                        expected_version: kick.expected_version.clone(),
                        participant_id: kick.request.participant_id.clone(),
                    })
                    .await
            }
        };

        if let Err(err) = &result {
            warn!(
                "{} of {} failed: {}",
                kick.operation(),
                kick.participant_id(),
                err
            );
        }
        result
    }
}
