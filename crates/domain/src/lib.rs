// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod document;
mod error;
mod snapshot;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use document::RosterDocument;
pub use error::DomainError;
pub use snapshot::Snapshot;
pub use types::{
    Container, Participant, ParticipantId, RoleTag, Squad, SquadAssignment, SquadId,
    VersionToken, WarId,
};
pub use validation::{validate_participant, validate_partition, validate_squad};
