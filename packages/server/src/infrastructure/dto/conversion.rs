//! Conversion logic from domain models to DTOs.

use sleuth_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{LeaveOutcome, Player, PlayerSummary, RoomPhase, RoomSnapshot};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<&LeaveOutcome> for dto::PlayerLeftMessage {
    fn from(outcome: &LeaveOutcome) -> Self {
        Self {
            r#type: dto::MessageType::PlayerLeft,
            id: outcome.player.id().to_string(),
            name: outcome.player.name.to_string(),
            count: outcome.count,
        }
    }
}

impl dto::PlayerJoinedMessage {
    /// Build the broadcast for an accepted join
    pub fn from_join(player: &Player, is_admin: bool, count: usize) -> Self {
        Self {
            r#type: dto::MessageType::PlayerJoined,
            id: player.id().to_string(),
            name: player.name.to_string(),
            is_admin,
            count,
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<RoomSnapshot> for http::RoomSummaryDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            id: snapshot.key.into_string(),
            player_count: snapshot.players.len(),
            round_in_progress: snapshot.phase == RoomPhase::RoundPending,
            created_at: timestamp_to_jst_rfc3339(snapshot.created_at.value()),
        }
    }
}

impl From<PlayerSummary> for http::PlayerDetailDto {
    fn from(player: PlayerSummary) -> Self {
        Self {
            id: player.id.into_string(),
            name: player.name,
            is_admin: player.is_admin,
            joined_at: timestamp_to_jst_rfc3339(player.joined_at.value()),
        }
    }
}

impl From<RoomSnapshot> for http::RoomDetailDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            id: snapshot.key.into_string(),
            admin_id: snapshot.admin_id.map(|id| id.into_string()),
            round_in_progress: snapshot.phase == RoomPhase::RoundPending,
            rounds_played: snapshot.rounds_played,
            players: snapshot.players.into_iter().map(Into::into).collect(),
            created_at: timestamp_to_jst_rfc3339(snapshot.created_at.value()),
        }
    }
}
