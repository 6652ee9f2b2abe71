// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment and reconciliation engine.
//!
//! Everything in this crate is synchronous and side-effect free apart from
//! the values it is handed. Remote calls live one layer up; this crate
//! decides *what* to send and how to fold the answers back into the local
//! replica.

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

mod classify;
mod conflict;
mod error;
mod kick;
mod mutate;
mod notice;
mod operation;
mod selection;
mod store;
mod undo;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use classify::{
    ClassifiedMoves, Move, MoveCategory, PoolToSquad, SquadToPool, SquadToSquad, classify,
};
pub use conflict::{Conflict, ConflictResolver, Failure, FailureKind, Resolution, Routed};
pub use error::CoreError;
pub use kick::{KickGate, KickPlan, KickRequest, plan_kick};
pub use mutate::{MovePlan, apply_moves, plan_move, rollback_to};
pub use notice::{Notice, NoticeBoard};
pub use operation::RemoteOperation;
pub use selection::Selection;
pub use store::SnapshotStore;
pub use undo::{DEFAULT_UNDO_WINDOW, LastAction, Rollback, UndoController};
