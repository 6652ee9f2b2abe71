// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The remote roster service boundary.

use crate::request_response::{
    KickFromPoolRequest, KickFromSquadRequest, MovePoolToSquadRequest, MoveSquadToPoolRequest,
    MoveSquadToSquadRequest, MutationAck, RosterResponse,
};
use std::future::Future;
use thiserror::Error;
use war_roster::{Failure, FailureKind, RemoteOperation};
use war_roster_domain::{VersionToken, WarId};

/// Why a call failed without the service judging it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientKind {
    /// The call did not complete in time.
    Timeout,
    /// The service could not be reached.
    Offline,
    /// The service failed internally.
    Server,
}

impl std::fmt::Display for TransientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Offline => write!(f, "offline"),
            Self::Server => write!(f, "server error"),
        }
    }
}

/// A failed call to the roster service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The service's version-mismatch sentinel.
    #[error("Roster changed: expected version {expected}, service is at {current}")]
    VersionMismatch {
        /// The version the request carried.
        expected: VersionToken,
        /// The version the service holds.
        current: VersionToken,
    },

    /// Timeout, offline or server failure.
    #[error("Service unavailable ({kind}): {message}")]
    Transient {
        /// What went wrong.
        kind: TransientKind,
        /// Detail for the operator.
        message: String,
    },

    /// The service refused the request.
    #[error("Request rejected: {message}")]
    Rejected {
        /// Why it was refused.
        message: String,
    },
}

impl RemoteError {
    /// Returns how this failure is routed.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::VersionMismatch { .. } => FailureKind::VersionMismatch,
            Self::Transient { .. } => FailureKind::Transient,
            Self::Rejected { .. } => FailureKind::Rejected,
        }
    }

    /// Reduces this error to what the conflict resolver needs.
    #[must_use]
    pub fn into_failure(self, operation: RemoteOperation) -> Failure {
        Failure {
            operation,
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// The persistence service the coordinator talks to.
///
/// Implementations are expected to be cheap to clone (a handle over a
/// connection or shared state) so a dispatcher can be detached from the
/// session that owns it.
pub trait RosterService {
    /// Reads a war's full roster.
    fn fetch_war_roster(
        &self,
        war_id: &WarId,
    ) -> impl Future<Output = Result<RosterResponse, RemoteError>> + Send;

    /// Commits a batch of pool to squad moves.
    fn move_pool_to_squad(
        &self,
        request: MovePoolToSquadRequest,
    ) -> impl Future<Output = Result<MutationAck, RemoteError>> + Send;

    /// Commits a batch of squad to squad moves.
    fn move_squad_to_squad(
        &self,
        request: MoveSquadToSquadRequest,
    ) -> impl Future<Output = Result<MutationAck, RemoteError>> + Send;

    /// Commits a batch of squad to pool moves.
    fn move_squad_to_pool(
        &self,
        request: MoveSquadToPoolRequest,
    ) -> impl Future<Output = Result<MutationAck, RemoteError>> + Send;

    /// Removes a squad member from the war.
    fn kick_from_squad(
        &self,
        request: KickFromSquadRequest,
    ) -> impl Future<Output = Result<MutationAck, RemoteError>> + Send;

    /// Removes a pool participant from the war.
    fn kick_from_pool(
        &self,
        request: KickFromPoolRequest,
    ) -> impl Future<Output = Result<MutationAck, RemoteError>> + Send;
}
