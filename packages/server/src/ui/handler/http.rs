//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use futures_util::future::join_all;

use crate::{
    domain::RoomKey,
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let handles = state.directory.list().await;
    // ラウンド中のルームは game-started まで応答しないため、全ルームへ同時に問い合わせる
    let snapshots = join_all(handles.iter().map(|handle| handle.snapshot())).await;

    let mut summaries = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        match snapshot {
            // Domain Model から DTO への変換
            Ok(snapshot) => summaries.push(RoomSummaryDto::from(snapshot)),
            Err(e) => tracing::warn!("Skipping room in listing: {}", e),
        }
    }
    Json(summaries)
}

/// Get room detail by key
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_key): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let key = RoomKey::new(room_key).map_err(|_| StatusCode::BAD_REQUEST)?;
    let handle = state
        .directory
        .get(&key)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;
    match handle.snapshot().await {
        Ok(snapshot) => Ok(Json(RoomDetailDto::from(snapshot))),
        Err(e) => {
            tracing::error!("Failed to inspect room '{}': {}", key, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
