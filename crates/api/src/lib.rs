// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session coordinator and remote service boundary.
//!
//! [`WarSession`] drives the engine in `war-roster` for one operator and
//! one war. It talks to the persistence service through the
//! [`RosterService`] trait; [`InProcessRosterService`] implements that
//! trait over the reference database for embedding and tests.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod clock;
mod config;
mod dispatch;
mod error;
mod in_process;
mod request_response;
mod service;
mod session;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{MAX_UNDO_WINDOW_MS, SessionConfig};
pub use dispatch::{CategoryOutcome, DispatchPlan, DispatchReport, Dispatcher, KickDispatch};
pub use error::ApiError;
pub use in_process::InProcessRosterService;
pub use request_response::{
    ErrorKind, ErrorResponse, FetchRosterQuery, KickFromPoolRequest, KickFromSquadRequest,
    MovePoolToSquadRequest, MoveSquadToPoolRequest, MoveSquadToSquadRequest, MutationAck,
    PoolToSquadEntry, RosterResponse, SquadToSquadEntry,
};
pub use service::{RemoteError, RosterService, TransientKind};
pub use session::{KickOutcome, PendingAction, WarSession};
