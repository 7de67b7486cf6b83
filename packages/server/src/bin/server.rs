//! Room coordinator server for the Sleuth social deduction game.
//!
//! Players connect to `/connect?room=<name>`, send `join`, and the room's admin sends
//! `start` to deal roles.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sleuth-server
//! cargo run --bin sleuth-server -- --host 0.0.0.0 --port 3000 --pacing-delay-ms 500
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use sleuth_server::{
    domain::RoomKey,
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::Server,
    usecase::{RoomConfig, RoomDirectory},
};
use sleuth_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "sleuth-server")]
#[command(about = "Room coordinator server for the Sleuth party game", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Room used by connections that name none
    #[arg(long, default_value = sleuth_server::domain::DEFAULT_ROOM_KEY)]
    default_room: String,

    /// Pause between announcing a round and dealing roles, in milliseconds
    #[arg(long, default_value_t = 2000)]
    pacing_delay_ms: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let default_room = match RoomKey::new(args.default_room) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("Invalid --default-room: {}", e);
            std::process::exit(2);
        }
    };
    let config = RoomConfig {
        default_room,
        pacing_delay: Duration::from_millis(args.pacing_delay_ms),
    };
    tracing::info!(
        "Default room '{}', pacing delay {:?}",
        config.default_room,
        config.pacing_delay
    );

    // Initialize dependencies in order:
    // 1. MessagePusher
    // 2. RoomDirectory
    // 3. Server
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let directory = Arc::new(RoomDirectory::new(
        config,
        message_pusher,
        Arc::new(SystemClock),
    ));

    let server = Server::new(directory);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
