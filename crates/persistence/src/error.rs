// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use war_roster_domain::{DomainError, VersionToken, WarId};

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The requested war does not exist.
    WarNotFound(WarId),
    /// A war with this identifier is already stored.
    DuplicateWar(WarId),
    /// The caller's expected version is stale.
    VersionMismatch {
        /// The version the caller expected.
        expected: VersionToken,
        /// The version currently stored.
        current: VersionToken,
    },
    /// The batch does not match the stored roster.
    InvalidMove(String),
    /// The batch was empty.
    EmptyBatch,
    /// Stored or seeded data violates a domain rule.
    DomainViolation(DomainError),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// A seed file could not be read.
    Io(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WarNotFound(id) => write!(f, "War not found: {id}"),
            Self::DuplicateWar(id) => write!(f, "War '{id}' already exists"),
            Self::VersionMismatch { expected, current } => {
                write!(
                    f,
                    "Version mismatch: expected {expected}, roster is at {current}"
                )
            }
            Self::InvalidMove(msg) => write!(f, "Invalid move: {msg}"),
            Self::EmptyBatch => write!(f, "Batch contains no moves"),
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
