// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::service::RemoteError;
use thiserror::Error;
use war_roster::{CoreError, RemoteOperation};
use war_roster_domain::DomainError;

/// Errors surfaced by a war session.
///
/// Remote failures that the session can fold into its own state (conflicts,
/// notices, kick rollbacks) are not reported here; this covers calls that
/// could not be completed at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The engine refused a local edit.
    #[error("Edit refused: {0}")]
    Core(#[from] CoreError),

    /// A roster from the service violates a domain rule.
    #[error("Invalid roster: {0}")]
    Domain(#[from] DomainError),

    /// A remote call failed.
    #[error("{operation} failed: {source}")]
    Remote {
        /// The call that failed.
        operation: RemoteOperation,
        /// The service's error.
        source: RemoteError,
    },

    /// The session config is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Wraps a remote failure with the call it came from.
    #[must_use]
    pub const fn remote(operation: RemoteOperation, source: RemoteError) -> Self {
        Self::Remote { operation, source }
    }
}
