//! Shared application state.

use std::sync::Arc;

use crate::usecase::RoomDirectory;

/// Shared application state
pub struct AppState {
    /// Every room's coordinator, keyed by room name
    pub directory: Arc<RoomDirectory>,
}
