//! Per-room settings shared by every coordinator.

use std::time::Duration;

use crate::domain::RoomKey;

/// Pause between `roles-assigning` and role delivery
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Room used when a connection request names none
    pub default_room: RoomKey,
    /// Pause between announcing a round and delivering roles
    pub pacing_delay: Duration,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            default_room: RoomKey::default(),
            pacing_delay: DEFAULT_PACING_DELAY,
        }
    }
}
