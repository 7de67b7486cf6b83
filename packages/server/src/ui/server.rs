//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::RoomDirectory;

use super::{
    handler::{
        get_room_detail, get_rooms, health_check, websocket_handler, websocket_path_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Room coordinator server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let directory = Arc::new(RoomDirectory::new(config, pusher, clock));
/// Server::new(directory).run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// RoomDirectory（ルームごとのコーディネーター）
    directory: Arc<RoomDirectory>,
}

impl Server {
    pub fn new(directory: Arc<RoomDirectory>) -> Self {
        Self { directory }
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            directory: self.directory.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/connect", get(websocket_handler))
            .route("/connect/{room}", get(websocket_path_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_key}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails while accepting connections.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }

    /// Run the room coordinator server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Room server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/connect?room=<name>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
