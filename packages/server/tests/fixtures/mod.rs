//! Shared fixtures for integration tests: an in-process server and WebSocket clients.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use sleuth_server::{
    domain::RoomKey,
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::Server,
    usecase::{RoomConfig, RoomDirectory},
};
use sleuth_shared::time::SystemClock;
use tokio::{net::TcpListener, sync::oneshot};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Server bound to an ephemeral port, shut down on drop
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start(pacing_delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let directory = Arc::new(RoomDirectory::new(
            RoomConfig {
                default_room: RoomKey::default(),
                pacing_delay,
            },
            Arc::new(WebSocketMessagePusher::new()),
            Arc::new(SystemClock),
        ));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(Server::new(directory).serve(listener, async {
            let _ = shutdown_rx.await;
        }));

        Self {
            addr,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn room_url(&self, room: &str) -> String {
        format!("ws://{}/connect?room={}", self.addr, room)
    }

    pub fn default_room_url(&self) -> String {
        format!("ws://{}/connect", self.addr)
    }

    pub fn room_path_url(&self, room: &str) -> String {
        format!("ws://{}/connect/{}", self.addr, room)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// WebSocket client speaking the room protocol
pub struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl TestClient {
    pub async fn connect(url: &str) -> Self {
        let (ws, _) = connect_async(url)
            .await
            .expect("Failed to connect WebSocket");
        Self { ws }
    }

    /// Connect and join, returning the client and its own `player-joined` message
    pub async fn join(url: &str, name: &str) -> (Self, Value) {
        let mut client = Self::connect(url).await;
        client.send_json(json!({"type": "join", "name": name})).await;
        let joined = client.recv_json().await;
        assert_eq!(joined["type"], "player-joined");
        (client, joined)
    }

    pub async fn send_json(&mut self, value: Value) {
        self.send_text(&value.to_string()).await;
    }

    pub async fn send_text(&mut self, text: &str) {
        self.ws
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send message");
    }

    pub async fn send_binary(&mut self, bytes: &[u8]) {
        self.ws
            .send(Message::Binary(bytes.to_vec().into()))
            .await
            .expect("Failed to send binary message");
    }

    /// Next JSON message, skipping control frames
    pub async fn recv_json(&mut self) -> Value {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.ws.next())
                .await
                .expect("Timed out waiting for a message")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).expect("Server sent invalid JSON");
            }
        }
    }

    /// Next message's `type`
    pub async fn recv_type(&mut self) -> String {
        let message = self.recv_json().await;
        message["type"]
            .as_str()
            .expect("Message has no type")
            .to_string()
    }

    /// `true` if no text message arrives within `window`
    pub async fn is_silent_for(&mut self, window: Duration) -> bool {
        loop {
            match tokio::time::timeout(window, self.ws.next()).await {
                Err(_) => return true,
                Ok(Some(Ok(Message::Text(_)))) => return false,
                Ok(Some(Ok(_))) => continue,
                Ok(_) => return true,
            }
        }
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }
}
