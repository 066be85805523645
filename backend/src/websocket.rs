//! WebSocket handlers for real-time updates
//!
//! This module streams execution events to connected dashboard clients so cards
//! and toasts update without polling. Supports ping/pong for connection keepalive.

use crate::api::agents::AgentResponse;
use crate::api::ApiContext;
use crate::executor::ExecutionEvent;
use crate::state::Agent;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Interval between server-initiated pings
const PING_INTERVAL_SECS: u64 = 30;

/// Control messages exchanged with the client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum WebSocketMessage {
    /// Ping message for connection keepalive
    #[serde(rename = "ping")]
    Ping,
    /// Pong message responding to ping
    #[serde(rename = "pong")]
    Pong,
}

/// WebSocket upgrade handler
///
/// Sends the current registry as an `initial_state` message, then forwards
/// every [`ExecutionEvent`](crate::executor::ExecutionEvent) as JSON.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(ctx): State<ApiContext>,
) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, ctx))
}

// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, ctx: ApiContext) {
    let (mut sender, mut receiver) = socket.split();

    info!("WebSocket client connected");

    // Subscribe before taking the snapshot so no event falls in between
    let events = ctx.coordinator.subscribe();

    let initial_state = initial_state_message(ctx.state.read().await.agents());

    if let Err(e) = sender.send(Message::Text(initial_state)).await {
        error!("Failed to send initial state: {}", e);
        return;
    }

    // Use a channel so several tasks can write to the socket
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    // Task to forward messages from channel to sender
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(msg).await {
                error!("Failed to send message: {}", e);
                break;
            }
        }
    });

    // Task to forward execution events
    let mut event_task = tokio::spawn(forward_events(events, tx.clone()));

    // Task to send periodic pings
    let ping_tx = tx.clone();
    let mut ping_task = tokio::spawn(async move {
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(PING_INTERVAL_SECS)).await;
            if ping_tx.send(Message::Ping(vec![])).is_err() {
                break;
            }
        }
    });

    // Receive messages
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => match serde_json::from_str::<WebSocketMessage>(&text) {
                    Ok(WebSocketMessage::Ping) => {
                        if let Ok(pong_msg) = serde_json::to_string(&WebSocketMessage::Pong) {
                            if tx.send(Message::Text(pong_msg)).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(other) => warn!("Received unhandled WebSocket message: {:?}", other),
                    Err(_) => warn!("Ignoring malformed WebSocket message"),
                },
                Ok(Message::Close(_)) => {
                    info!("WebSocket client disconnected");
                    break;
                }
                Ok(Message::Pong(_)) => {
                    // Client responded to ping
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for any task to complete
    tokio::select! {
        _ = &mut send_task => {}
        _ = &mut event_task => {}
        _ = &mut ping_task => {}
        _ = &mut recv_task => {}
    }
    send_task.abort();
    event_task.abort();
    ping_task.abort();
    recv_task.abort();

    info!("WebSocket connection closed");
}

/// First message sent to a client: the registry in display order
fn initial_state_message(agents: &[Agent]) -> String {
    let agents: Vec<AgentResponse> = agents.iter().map(AgentResponse::from).collect();
    serde_json::json!({
        "type": "initial_state",
        "agents": agents,
    })
    .to_string()
}

/// Forward execution events to the socket writer until either side closes
async fn forward_events(
    mut events: broadcast::Receiver<ExecutionEvent>,
    tx: mpsc::UnboundedSender<Message>,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        error!("Failed to serialize execution event: {}", e);
                        continue;
                    }
                };
                if tx.send(Message::Text(text)).is_err() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "WebSocket client lagging, dropped execution events");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
