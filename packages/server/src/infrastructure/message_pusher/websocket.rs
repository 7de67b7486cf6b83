//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `PusherChannel` へのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! UI 層は sender を生成して `Connection` に持たせ、ルームのコーディネーターに渡します。
//! この実装は `Connection` が持つ sender を使って送信するだけで、接続の一覧は保持しません。
//! 接続の一覧はルームごとの `ConnectionRegistry` が唯一の持ち主です。

use async_trait::async_trait;

use crate::domain::{Connection, MessagePushError, MessagePusher};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
///
/// // 接続に送信
/// pusher.push_to(&connection, "{\"type\":\"roles-assigning\"}").await?;
/// ```
#[derive(Debug, Default)]
pub struct WebSocketMessagePusher;

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn push_to(&self, target: &Connection, content: &str) -> Result<(), MessagePushError> {
        target
            .channel()
            .send(content.to_string())
            .map_err(|_| MessagePushError::ConnectionClosed(target.id().to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", target.id());
        Ok(())
    }

    async fn broadcast(&self, targets: &[Connection], content: &str) -> usize {
        let mut delivered = 0;
        for target in targets {
            // ブロードキャストでは一部の送信失敗を許容
            match self.push_to(target, content).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::debug!("Skipping broadcast target: {}", e),
            }
        }
        delivered
    }
}
