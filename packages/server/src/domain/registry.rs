//! Connection Registry: the live, join-ordered set of players in one room.
//!
//! Iteration order is join order. Admin succession depends on it, so the registry is a
//! `Vec` scanned linearly rather than a hash map; rooms hold a handful of players.

use super::{
    entity::{Connection, Player},
    error::RegistryError,
    value_object::ConnectionId,
};

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    players: Vec<Player>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player at the end of the join order.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateId` if a player with the same id is present.
    pub fn add(&mut self, player: Player) -> Result<(), RegistryError> {
        if self.contains(player.id()) {
            return Err(RegistryError::DuplicateId(player.id().to_string()));
        }
        self.players.push(player);
        Ok(())
    }

    /// Remove a player. Absent ids are not an error: disconnects may race with earlier removal.
    pub fn remove(&mut self, id: &ConnectionId) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id() == id)?;
        Some(self.players.remove(index))
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.get(id).is_some()
    }

    /// Players in join order
    pub fn all(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Earliest-joined player still present
    pub fn first(&self) -> Option<&Player> {
        self.players.first()
    }

    /// Owned copy of the players, used as a round's participant snapshot
    pub fn snapshot(&self) -> Vec<Player> {
        self.players.clone()
    }

    /// Connections of every registered player, used as a broadcast target list
    pub fn connections(&self) -> Vec<Connection> {
        self.players.iter().map(|p| p.connection.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Timestamp};
    use tokio::sync::mpsc;

    fn create_test_player(id: &str) -> Player {
        let (tx, _rx) = mpsc::unbounded_channel();
        Player::new(
            Connection::new(ConnectionId::new(id.to_string()).unwrap(), tx),
            DisplayName::from_input(Some(id.to_string())).unwrap(),
            Timestamp::new(0),
        )
    }

    fn ids(registry: &ConnectionRegistry) -> Vec<&str> {
        registry.all().map(|p| p.id().as_str()).collect()
    }

    #[test]
    fn test_add_keeps_join_order() {
        // テスト項目: 追加したプレイヤーは参加順に並ぶ
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();

        // when (操作):
        registry.add(create_test_player("charlie")).unwrap();
        registry.add(create_test_player("alice")).unwrap();
        registry.add(create_test_player("bob")).unwrap();

        // then (期待する結果):
        assert_eq!(ids(&registry), vec!["charlie", "alice", "bob"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.first().unwrap().id().as_str(), "charlie");
    }

    #[test]
    fn test_add_duplicate_id_fails() {
        // テスト項目: 同じ ID のプレイヤーは二重登録できない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        registry.add(create_test_player("alice")).unwrap();

        // when (操作):
        let result = registry.add(create_test_player("alice"));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegistryError::DuplicateId("alice".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_returns_player_and_preserves_order() {
        // テスト項目: 削除したプレイヤーが返され、残りの順序は保たれる
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        for id in ["alice", "bob", "charlie"] {
            registry.add(create_test_player(id)).unwrap();
        }

        // when (操作):
        let removed = registry.remove(&ConnectionId::new("bob".to_string()).unwrap());

        // then (期待する結果):
        assert_eq!(removed.unwrap().id().as_str(), "bob");
        assert_eq!(ids(&registry), vec!["alice", "charlie"]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        // テスト項目: 存在しないプレイヤーの削除はエラーにならず何も変えない（冪等性）
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        registry.add(create_test_player("alice")).unwrap();
        let alice = ConnectionId::new("alice".to_string()).unwrap();
        registry.remove(&alice);

        // when (操作):
        let removed_again = registry.remove(&alice);

        // then (期待する結果):
        assert!(removed_again.is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot_is_independent_of_later_mutation() {
        // テスト項目: スナップショットはその後の追加・削除の影響を受けない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        registry.add(create_test_player("alice")).unwrap();
        registry.add(create_test_player("bob")).unwrap();

        // when (操作):
        let snapshot = registry.snapshot();
        registry.remove(&ConnectionId::new("alice".to_string()).unwrap());
        registry.add(create_test_player("dave")).unwrap();

        // then (期待する結果):
        let snapshot_ids: Vec<&str> = snapshot.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(snapshot_ids, vec!["alice", "bob"]);
        assert_eq!(registry.connections().len(), 2);
    }
}
