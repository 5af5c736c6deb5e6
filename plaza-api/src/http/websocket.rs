//! WebSocket handler for the broadcast channel
//!
//! Each connection moves through Connecting (upgrade), Open (registered in
//! the hub, history replayed, inbound events processed), and Closed
//! (deregistered). Identity is handled upstream: inbound events carry an
//! already-authenticated actor id and the records read from the store are
//! trusted.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, info};

use crate::http::AppState;
use plaza_core::models::{generate_id, ClientEvent, ServerEvent};

/// WebSocket handler for the site-wide chat channel
///
/// GET /api/chat/ws
pub async fn websocket_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    // Limit max message size to 64KB (default is 64MB which is excessive for chat)
    ws.max_message_size(64 * 1024)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = generate_id();

    info!(connection_id = %connection_id, "WebSocket connection established");

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut rx = state.hub.subscribe(connection_id.clone());

    // Writer task: hub events -> JSON text frames
    let writer_connection_id = connection_id.clone();
    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "Failed to encode server event");
                    continue;
                }
            };

            if let Err(e) = ws_sender.send(Message::Text(text.into())).await {
                debug!(
                    connection_id = %writer_connection_id,
                    error = %e,
                    "Failed to send WebSocket message"
                );
                break;
            }
        }
    });

    // History replay goes to the new connection only, never broadcast.
    // A failed history query already degraded to an empty backlog; the
    // connection stays open either way.
    let history = state.chat_service.replay().await;
    state
        .hub
        .send_to(&connection_id, ServerEvent::Messages(history));

    // Read loop: the connection is Open until the peer closes or errors
    while let Some(frame) = ws_receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(ClientEvent::Message {
                    content,
                    author_id,
                    parent_id,
                }) => {
                    state
                        .chat_service
                        .handle_incoming(content, author_id, parent_id)
                        .await;
                }
                Err(e) => {
                    debug!(
                        connection_id = %connection_id,
                        error = %e,
                        "Ignoring malformed client frame"
                    );
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {
                // Ignore binary, ping, and pong frames
            }
            Err(e) => {
                debug!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    // Closed: deregister; any event arriving for this connection is a no-op
    state.hub.unsubscribe(&connection_id);
    writer.abort();

    info!(connection_id = %connection_id, "WebSocket connection closed");
}
