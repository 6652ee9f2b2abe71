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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{FromRef, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use war_roster::{PoolToSquad, SquadToSquad};
use war_roster_api::{
    ErrorKind, ErrorResponse, FetchRosterQuery, KickFromPoolRequest, KickFromSquadRequest,
    MovePoolToSquadRequest, MoveSquadToPoolRequest, MoveSquadToSquadRequest, MutationAck,
    RosterResponse,
};
use war_roster_domain::{RosterDocument, VersionToken, WarId};
use war_roster_persistence::{PersistenceError, RosterDatabase};

/// War Roster Server - HTTP surface for the war roster persistence service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON seed file of wars. If not provided, starts empty.
    #[arg(short, long)]
    seed: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The roster database. Every write holds the lock for the whole
    /// check-and-apply, so version checks are linearized per process.
    database: Arc<Mutex<RosterDatabase>>,
    /// Announces accepted mutations to live clients.
    live: Arc<LiveEventBroadcaster>,
}

impl AppState {
    fn new(database: RosterDatabase) -> Self {
        Self {
            database: Arc::new(Mutex::new(database)),
            live: Arc::new(LiveEventBroadcaster::new()),
        }
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live)
    }
}

/// Response listing the wars the server holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListWarsResponse {
    /// War identifiers in ascending order.
    wars: Vec<WarId>,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// Machine-readable failure class.
    kind: ErrorKind,
    /// The error message.
    message: String,
    /// The roster's current version, on a version mismatch.
    current_version: Option<VersionToken>,
}

impl HttpError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: ErrorKind::Rejected,
            message: message.to_string(),
            current_version: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            kind: self.kind,
            message: self.message,
            current_version: self.current_version,
        });
        (self.status, body).into_response()
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        let message: String = err.to_string();
        match err {
            PersistenceError::VersionMismatch { current, .. } => Self {
                status: StatusCode::CONFLICT,
                kind: ErrorKind::VersionMismatch,
                message,
                current_version: Some(current),
            },
            PersistenceError::WarNotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                kind: ErrorKind::NotFound,
                message,
                current_version: None,
            },
            PersistenceError::InvalidMove(_)
            | PersistenceError::DomainViolation(_)
            | PersistenceError::DuplicateWar(_) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                kind: ErrorKind::Rejected,
                message,
                current_version: None,
            },
            PersistenceError::EmptyBatch => Self::bad_request(&message),
            PersistenceError::SerializationError(_) | PersistenceError::Io(_) => {
                error!(error = %message, "Persistence error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    kind: ErrorKind::Internal,
                    message,
                    current_version: None,
                }
            }
        }
    }
}

/// Rejects requests that do not name their operator.
///
/// The operator identifier attributes revisions, so the version check
/// cannot work without it.
fn require_operator(operator_id: &str) -> Result<(), HttpError> {
    if operator_id.trim().is_empty() {
        return Err(HttpError::bad_request("operator_id must not be empty"));
    }
    Ok(())
}

/// Handler for GET `/wars` endpoint.
async fn handle_list_wars(AxumState(app_state): AxumState<AppState>) -> Json<ListWarsResponse> {
    let database = app_state.database.lock().await;
    let wars: Vec<WarId> = database.war_ids();
    drop(database);

    info!(count = wars.len(), "Listed wars");
    Json(ListWarsResponse { wars })
}

/// Handler for GET `/roster` endpoint.
///
/// Returns the full roster of one war, including its version token.
async fn handle_fetch_roster(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<FetchRosterQuery>,
) -> Result<Json<RosterResponse>, HttpError> {
    info!(war_id = %query.war_id, "Handling fetch_roster request");

    let database = app_state.database.lock().await;
    let roster: RosterDocument = database.fetch_roster(&query.war_id)?;
    drop(database);

    Ok(Json(RosterResponse {
        war_id: query.war_id,
        roster,
    }))
}

/// Handler for POST `/moves/pool_to_squad` endpoint.
async fn handle_move_pool_to_squad(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<MovePoolToSquadRequest>,
) -> Result<Json<MutationAck>, HttpError> {
    info!(
        war_id = %req.war_id,
        operator_id = %req.operator_id,
        count = req.moves.len(),
        "Handling move_pool_to_squad request"
    );
    require_operator(&req.operator_id)?;

    let moves: Vec<PoolToSquad> = req.moves.into_iter().map(PoolToSquad::from).collect();
    let mut database = app_state.database.lock().await;
    let version: VersionToken = database.move_pool_to_squad(
        &req.war_id,
        &req.operator_id,
        req.expected_version.as_ref(),
        &moves,
    )?;
    drop(database);

    Ok(Json(announce_change(
        &app_state,
        req.war_id,
        version,
        "move_pool_to_squad",
        req.operator_id,
    )))
}

/// Handler for POST `/moves/squad_to_squad` endpoint.
async fn handle_move_squad_to_squad(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<MoveSquadToSquadRequest>,
) -> Result<Json<MutationAck>, HttpError> {
    info!(
        war_id = %req.war_id,
        operator_id = %req.operator_id,
        count = req.moves.len(),
        "Handling move_squad_to_squad request"
    );
    require_operator(&req.operator_id)?;

    let moves: Vec<SquadToSquad> = req.moves.into_iter().map(SquadToSquad::from).collect();
    let mut database = app_state.database.lock().await;
    let version: VersionToken = database.move_squad_to_squad(
        &req.war_id,
        &req.operator_id,
        req.expected_version.as_ref(),
        &moves,
    )?;
    drop(database);

    Ok(Json(announce_change(
        &app_state,
        req.war_id,
        version,
        "move_squad_to_squad",
        req.operator_id,
    )))
}

/// Handler for POST `/moves/squad_to_pool` endpoint.
async fn handle_move_squad_to_pool(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<MoveSquadToPoolRequest>,
) -> Result<Json<MutationAck>, HttpError> {
    info!(
        war_id = %req.war_id,
        operator_id = %req.operator_id,
        count = req.participant_ids.len(),
        "Handling move_squad_to_pool request"
    );
    require_operator(&req.operator_id)?;

    let mut database = app_state.database.lock().await;
    let version: VersionToken = database.move_squad_to_pool(
        &req.war_id,
        &req.operator_id,
        req.expected_version.as_ref(),
        &req.participant_ids,
    )?;
    drop(database);

    Ok(Json(announce_change(
        &app_state,
        req.war_id,
        version,
        "move_squad_to_pool",
        req.operator_id,
    )))
}

/// Handler for POST `/kicks/squad` endpoint.
///
/// Removes a squad member from the war.
async fn handle_kick_from_squad(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<KickFromSquadRequest>,
) -> Result<Json<MutationAck>, HttpError> {
    info!(
        war_id = %req.war_id,
        operator_id = %req.operator_id,
        participant_id = %req.participant_id,
        squad_id = %req.squad_id,
        "Handling kick_from_squad request"
    );
    require_operator(&req.operator_id)?;

    let mut database = app_state.database.lock().await;
    let version: VersionToken = database.kick_from_squad(
        &req.war_id,
        &req.operator_id,
        req.expected_version.as_ref(),
        &req.participant_id,
        &req.squad_id,
    )?;
    drop(database);

    app_state.live.broadcast(&LiveEvent::MemberKicked {
        war_id: req.war_id.clone(),
        version: version.clone(),
        participant_id: req.participant_id,
        operator_id: req.operator_id,
    });

    Ok(Json(MutationAck {
        war_id: req.war_id,
        version,
    }))
}

/// Handler for POST `/kicks/pool` endpoint.
///
/// Removes a pool participant from the war.
async fn handle_kick_from_pool(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<KickFromPoolRequest>,
) -> Result<Json<MutationAck>, HttpError> {
    info!(
        war_id = %req.war_id,
        operator_id = %req.operator_id,
        participant_id = %req.participant_id,
        "Handling kick_from_pool request"
    );
    require_operator(&req.operator_id)?;

    let mut database = app_state.database.lock().await;
    let version: VersionToken = database.kick_from_pool(
        &req.war_id,
        &req.operator_id,
        req.expected_version.as_ref(),
        &req.participant_id,
    )?;
    drop(database);

    app_state.live.broadcast(&LiveEvent::MemberKicked {
        war_id: req.war_id.clone(),
        version: version.clone(),
        participant_id: req.participant_id,
        operator_id: req.operator_id,
    });

    Ok(Json(MutationAck {
        war_id: req.war_id,
        version,
    }))
}

fn announce_change(
    app_state: &AppState,
    war_id: WarId,
    version: VersionToken,
    operation: &str,
    operator_id: String,
) -> MutationAck {
    info!(war_id = %war_id, version = %version, operation, "Committed roster change");
    app_state.live.broadcast(&LiveEvent::RosterChanged {
        war_id: war_id.clone(),
        version: version.clone(),
        operation: operation.to_string(),
        operator_id,
    });
    MutationAck { war_id, version }
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/wars", get(handle_list_wars))
        .route("/roster", get(handle_fetch_roster))
        .route("/moves/pool_to_squad", post(handle_move_pool_to_squad))
        .route("/moves/squad_to_squad", post(handle_move_squad_to_squad))
        .route("/moves/squad_to_pool", post(handle_move_squad_to_pool))
        .route("/kicks/squad", post(handle_kick_from_squad))
        .route("/kicks/pool", post(handle_kick_from_pool))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing War Roster Server");

    let database: RosterDatabase = if let Some(seed_path) = &args.seed {
        info!("Loading wars from seed file: {}", seed_path);
        RosterDatabase::load_seed_file(seed_path)?
    } else {
        warn!("No seed file given, starting with no wars");
        RosterDatabase::new()
    };

    let app: Router = build_router(AppState::new(database));

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
