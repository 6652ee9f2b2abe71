// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live roster change notifications.
//!
//! Every accepted mutation is announced to connected WebSocket clients so
//! other operators know their snapshot is stale. Events only say *that*
//! something changed; clients refetch the roster over HTTP for the
//! authoritative layout. Nothing is accepted from clients on this channel.

use axum::{
    extract::{
        Query, State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{
    SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use war_roster_domain::{ParticipantId, VersionToken, WarId};

/// Events buffered per subscriber before the slowest ones start lagging.
const EVENT_BUFFER_SIZE: usize = 100;

/// A roster change announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A move batch was committed.
    RosterChanged {
        /// The war that changed.
        war_id: WarId,
        /// The new version token.
        version: VersionToken,
        /// The operation that was committed.
        operation: String,
        /// The operator who committed it.
        operator_id: String,
    },
    /// A participant was removed from the war.
    MemberKicked {
        /// The war that changed.
        war_id: WarId,
        /// The new version token.
        version: VersionToken,
        /// The removed participant.
        participant_id: ParticipantId,
        /// The operator who removed them.
        operator_id: String,
    },
    /// Sent once when a client connects.
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

/// Fans live events out to every connected client.
#[derive(Debug, Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a broadcaster with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event. Dropped silently when nobody is listening.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveEvent {
    /// Returns the war the event concerns, `None` for connection events.
    #[must_use]
    pub const fn war_id(&self) -> Option<&WarId> {
        match self {
            Self::RosterChanged { war_id, .. } | Self::MemberKicked { war_id, .. } => {
                Some(war_id)
            }
            Self::Connected { .. } => None,
        }
    }

    /// Returns whether a client watching `filter` should see this event.
    ///
    /// No filter means every war.
    #[must_use]
    pub fn concerns(&self, filter: Option<&WarId>) -> bool {
        match (filter, self.war_id()) {
            (Some(wanted), Some(war_id)) => wanted == war_id,
            _ => true,
        }
    }
}

/// Optional `/live` query narrowing the stream to one war.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveQuery {
    /// The war to watch. Every war when absent.
    pub war_id: Option<WarId>,
}

/// Handler for GET `/live`.
///
/// Upgrades the connection and streams live events until the client leaves.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
    Query(query): Query<LiveQuery>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster, query.war_id))
}

async fn handle_socket(
    socket: WebSocket,
    broadcaster: Arc<LiveEventBroadcaster>,
    filter: Option<WarId>,
) {
    match &filter {
        Some(war_id) => info!(war_id = %war_id, "Client watching war"),
        None => info!("Client watching every war"),
    }

    let (mut sender, receiver) = socket.split();
    let rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event: LiveEvent = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };
    if send_event(&mut sender, &connected_event).await.is_err() {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(forward_events(sender, rx, filter));
    let mut recv_task = tokio::spawn(drain_client(receiver));

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    info!("Client left the live event stream");
}

/// Sends one event as a JSON text frame.
///
/// Serialization failures are logged and skipped; only a closed socket is
/// reported as an error.
async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &LiveEvent,
) -> Result<(), ()> {
    match serde_json::to_string(event) {
        Ok(json) => sender.send(Message::Text(json.into())).await.map_err(|_| ()),
        Err(e) => {
            error!(?e, "Failed to serialize live event");
            Ok(())
        }
    }
}

async fn forward_events(
    mut sender: SplitSink<WebSocket, Message>,
    mut rx: broadcast::Receiver<LiveEvent>,
    filter: Option<WarId>,
) {
    loop {
        let event: LiveEvent = match rx.recv().await {
            Ok(event) => event,
            // A lagging client must refetch anyway; it keeps the stream.
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Live client lagged, events dropped");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => return,
        };
        if !event.concerns(filter.as_ref()) {
            continue;
        }
        if send_event(&mut sender, &event).await.is_err() {
            debug!("Live client went away");
            return;
        }
    }
}

/// Reads until the client closes. Nothing the client sends is acted on.
async fn drain_client(mut receiver: SplitStream<WebSocket>) {
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(_) | Message::Binary(_)) => {
                warn!("Ignoring message from live client");
            }
            Ok(Message::Close(_)) => {
                debug!("Live client sent close frame");
                return;
            }
            Ok(Message::Ping(_) | Message::Pong(_)) => {}
            Err(e) => {
                error!(?e, "WebSocket receive error");
                return;
            }
        }
    }
}
