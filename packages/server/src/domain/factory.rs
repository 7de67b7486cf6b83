//! Domain factories for creating value objects.

use super::ConnectionId;

/// Factory for generating ConnectionId instances.
///
/// Every accepted WebSocket gets a fresh id; ids are random UUID v4 strings and are never reused.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}
