//! MessagePusher trait 定義
//!
//! ルームのコーディネーターが接続へメッセージを届けるためのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{entity::Connection, error::MessagePushError};

/// 接続へシリアライズ済みメッセージを送る
///
/// 送信は fire-and-forget。閉じた接続への送信失敗はルームの状態に影響しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 1 つの接続へ送信
    async fn push_to(&self, target: &Connection, content: &str) -> Result<(), MessagePushError>;

    /// 複数の接続へ送信し、届いた数を返す。個々の失敗は無視される
    async fn broadcast(&self, targets: &[Connection], content: &str) -> usize;
}
