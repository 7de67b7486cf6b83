//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room summary for `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub player_count: usize,
    pub round_in_progress: bool,
    pub created_at: String,
}

/// Room detail for `GET /api/rooms/{room_key}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub admin_id: Option<String>,
    pub round_in_progress: bool,
    pub rounds_played: u64,
    pub players: Vec<PlayerDetailDto>,
    pub created_at: String,
}

/// Player entry of a room detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDetailDto {
    pub id: String,
    pub name: String,
    pub is_admin: bool,
    pub joined_at: String,
}
