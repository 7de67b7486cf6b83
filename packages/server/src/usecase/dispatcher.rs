//! Broadcast/Unicast Dispatcher.
//!
//! Serializes outbound records and hands them to the [`MessagePusher`]. Sends are
//! best-effort: failures are logged and never reach the caller, since a closing
//! connection is cleaned up by its own disconnect event.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{Connection, MessagePusher};

pub struct Dispatcher {
    pusher: Arc<dyn MessagePusher>,
}

impl Dispatcher {
    pub fn new(pusher: Arc<dyn MessagePusher>) -> Self {
        Self { pusher }
    }

    /// Send `message` to one connection
    pub async fn unicast<T: Serialize + ?Sized>(&self, target: &Connection, message: &T) {
        let Some(content) = Self::serialize(message) else {
            return;
        };
        if let Err(e) = self.pusher.push_to(target, &content).await {
            tracing::debug!("Unicast dropped: {}", e);
        }
    }

    /// Send `message` to every connection in `targets`, returning how many accepted it
    pub async fn broadcast<T: Serialize + ?Sized>(
        &self,
        targets: &[Connection],
        message: &T,
    ) -> usize {
        let Some(content) = Self::serialize(message) else {
            return 0;
        };
        let delivered = self.pusher.broadcast(targets, &content).await;
        if delivered < targets.len() {
            tracing::debug!(
                "Broadcast reached {} of {} connections",
                delivered,
                targets.len()
            );
        }
        delivered
    }

    fn serialize<T: Serialize + ?Sized>(message: &T) -> Option<String> {
        match serde_json::to_string(message) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::error!("Failed to serialize outbound message: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, MessagePushError, MockMessagePusher},
        infrastructure::dto::websocket::{ErrorMessage, NoticeMessage},
    };
    use tokio::sync::mpsc;

    fn create_test_connection(id: &str) -> Connection {
        let (tx, _rx) = mpsc::unbounded_channel();
        Connection::new(ConnectionId::new(id.to_string()).unwrap(), tx)
    }

    #[tokio::test]
    async fn test_unicast_serializes_and_pushes_once() {
        // テスト項目: unicast はメッセージを JSON にして 1 回だけ送信する
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .withf(|target, content| {
                target.id().as_str() == "alice"
                    && content == r#"{"type":"error","message":"Invalid message"}"#
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let dispatcher = Dispatcher::new(Arc::new(pusher));

        // when (操作):
        dispatcher
            .unicast(
                &create_test_connection("alice"),
                &ErrorMessage::new("Invalid message"),
            )
            .await;

        // then (期待する結果): モックの期待回数で検証
    }

    #[tokio::test]
    async fn test_unicast_failure_is_swallowed() {
        // テスト項目: 送信失敗は呼び出し元に伝播しない
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .times(1)
            .returning(|target, _| Err(MessagePushError::ConnectionClosed(target.id().to_string())));
        let dispatcher = Dispatcher::new(Arc::new(pusher));

        // when (操作):
        dispatcher
            .unicast(
                &create_test_connection("gone"),
                &NoticeMessage::you_are_now_admin(),
            )
            .await;

        // then (期待する結果): パニックもエラーも発生しない
    }

    #[tokio::test]
    async fn test_broadcast_reports_delivered_count() {
        // テスト項目: broadcast は全対象に同じ内容を渡し、届いた数を返す
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|targets, content| {
                targets.len() == 3 && content == r#"{"type":"roles-assigning"}"#
            })
            .times(1)
            .returning(|_, _| 2);
        let dispatcher = Dispatcher::new(Arc::new(pusher));
        let targets = vec![
            create_test_connection("alice"),
            create_test_connection("bob"),
            create_test_connection("charlie"),
        ];

        // when (操作):
        let delivered = dispatcher
            .broadcast(&targets, &NoticeMessage::roles_assigning())
            .await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
    }
}
