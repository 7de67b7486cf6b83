//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{Connection, ConnectionIdFactory, RoomKey},
    ui::state::AppState,
    usecase::RoomHandle,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub room: Option<String>,
}

/// `GET /connect?room=<key>`
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    upgrade(ws, state, query.room).await
}

/// `GET /connect/{room}`
pub async fn websocket_path_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    upgrade(ws, state, Some(room)).await
}

async fn upgrade(
    ws: WebSocketUpgrade,
    state: Arc<AppState>,
    raw_room: Option<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let key = match RoomKey::resolve(raw_room, &state.directory.config().default_room) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let room = state.directory.handle_for(&key).await;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, room)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// Messages for this connection are produced by the room's coordinator and written here
/// in the order they were queued.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, room: RoomHandle) {
    let id = ConnectionIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    if let Err(e) = room.connect(Connection::new(id.clone(), tx)) {
        tracing::error!("Failed to admit connection '{}': {}", id, e);
        return;
    }
    tracing::info!("Connection '{}' opened in room '{}'", id, room.key());

    let (sender, mut receiver) = socket.split();

    let recv_room = room.clone();
    let recv_id = id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_id, e);
                    break;
                }
            };

            let text = match msg {
                Message::Text(text) => text.to_string(),
                // Binary frames are read as UTF-8; an undecodable frame is forwarded empty,
                // which the coordinator rejects as an invalid message
                Message::Binary(bytes) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::debug!("Undecodable binary frame from '{}': {}", recv_id, e);
                        String::new()
                    }
                },
                Message::Close(_) => {
                    tracing::debug!("Connection '{}' requested close", recv_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => continue,
            };

            if let Err(e) = recv_room.message(recv_id.clone(), text) {
                tracing::warn!("Dropping message from '{}': {}", recv_id, e);
                break;
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Err(e) = room.disconnect(id.clone()) {
        tracing::warn!("Failed to report disconnect of '{}': {}", id, e);
    }
    tracing::info!("Connection '{}' closed", id);
}
