//! UI layer: axum routes over the room directory.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
