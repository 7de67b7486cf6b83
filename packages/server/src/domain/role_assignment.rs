//! Role Assignment Engine.
//!
//! Shuffles a participant snapshot uniformly and partitions it into one
//! investigator, one antagonist and bystanders for everyone else. The engine is
//! pure apart from the random source it is handed.

use rand::Rng;

use super::{
    entity::{Player, Role},
    error::RoundError,
    value_object::ConnectionId,
};

/// Fewest players a round can be started with
pub const MIN_PLAYERS: usize = 3;

/// Roles for one round, listed in the participant snapshot's join order
#[derive(Debug, Clone)]
pub struct RoleAssignment {
    assignments: Vec<(Player, Role)>,
}

impl RoleAssignment {
    pub fn iter(&self) -> impl Iterator<Item = &(Player, Role)> {
        self.assignments.iter()
    }

    pub fn role_of(&self, id: &ConnectionId) -> Option<Role> {
        self.assignments
            .iter()
            .find(|(player, _)| player.id() == id)
            .map(|(_, role)| *role)
    }

    /// Number of participants in the round
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Fisher-Yates shuffle: sweep from the last index down to 1, swapping each slot
/// with a uniformly chosen index in `[0, i]`. Every permutation is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Assign roles to `participants`.
///
/// # Errors
///
/// Returns `RoundError::InsufficientPlayers` when fewer than [`MIN_PLAYERS`] take part.
pub fn assign_roles<R: Rng + ?Sized>(
    participants: &[Player],
    rng: &mut R,
) -> Result<RoleAssignment, RoundError> {
    if participants.len() < MIN_PLAYERS {
        return Err(RoundError::InsufficientPlayers {
            required: MIN_PLAYERS,
            actual: participants.len(),
        });
    }

    let mut order: Vec<usize> = (0..participants.len()).collect();
    shuffle(&mut order, rng);

    let mut roles = vec![Role::Bystander; participants.len()];
    roles[order[0]] = Role::Investigator;
    roles[order[1]] = Role::Antagonist;

    let assignments = participants.iter().cloned().zip(roles).collect();
    Ok(RoleAssignment { assignments })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Connection, DisplayName, Timestamp};
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::{HashMap, HashSet};
    use tokio::sync::mpsc;

    fn create_test_players(count: usize) -> Vec<Player> {
        (0..count)
            .map(|i| {
                let (tx, _rx) = mpsc::unbounded_channel();
                Player::new(
                    Connection::new(ConnectionId::new(format!("p{i}")).unwrap(), tx),
                    DisplayName::from_input(None).unwrap(),
                    Timestamp::new(i as i64),
                )
            })
            .collect()
    }

    fn count_roles(assignment: &RoleAssignment) -> HashMap<Role, usize> {
        let mut counts = HashMap::new();
        for (_, role) in assignment.iter() {
            *counts.entry(*role).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_assign_roles_rejects_fewer_than_three() {
        // テスト項目: 参加者が 3 人未満ならエラーになる
        // given (前提条件):
        let mut rng = StdRng::seed_from_u64(1);

        for count in 0..MIN_PLAYERS {
            // when (操作):
            let result = assign_roles(&create_test_players(count), &mut rng);

            // then (期待する結果):
            assert_eq!(
                result.unwrap_err(),
                RoundError::InsufficientPlayers {
                    required: 3,
                    actual: count
                }
            );
        }
    }

    #[test]
    fn test_assign_roles_partitions_three_players() {
        // テスト項目: 3 人の場合、CID・Killer・Player がちょうど 1 人ずつ割り当てられる
        // given (前提条件):
        let players = create_test_players(3);
        let mut rng = StdRng::seed_from_u64(42);

        // when (操作):
        let assignment = assign_roles(&players, &mut rng).unwrap();

        // then (期待する結果):
        let counts = count_roles(&assignment);
        assert_eq!(counts.get(&Role::Investigator), Some(&1));
        assert_eq!(counts.get(&Role::Antagonist), Some(&1));
        assert_eq!(counts.get(&Role::Bystander), Some(&1));
    }

    #[test]
    fn test_assignment_keeps_snapshot_order() {
        // テスト項目: 割り当て結果は参加者スナップショットの参加順に並ぶ
        // given (前提条件):
        let players = create_test_players(5);
        let mut rng = StdRng::seed_from_u64(7);

        // when (操作):
        let assignment = assign_roles(&players, &mut rng).unwrap();

        // then (期待する結果):
        let order: Vec<&str> = assignment.iter().map(|(p, _)| p.id().as_str()).collect();
        assert_eq!(order, vec!["p0", "p1", "p2", "p3", "p4"]);
        assert!(assignment.role_of(players[0].id()).is_some());
    }

    #[test]
    fn test_investigator_distribution_is_roughly_uniform() {
        // テスト項目: 1000 ラウンド繰り返すと、各プレイヤーが CID になる割合はおよそ 1/5
        // given (前提条件):
        let players = create_test_players(5);
        let mut rng = StdRng::seed_from_u64(2024);
        let rounds = 1000;
        let mut investigator_counts: HashMap<String, usize> = HashMap::new();

        // when (操作):
        for _ in 0..rounds {
            let assignment = assign_roles(&players, &mut rng).unwrap();
            for (player, role) in assignment.iter() {
                if *role == Role::Investigator {
                    *investigator_counts
                        .entry(player.id().to_string())
                        .or_insert(0) += 1;
                }
            }
        }

        // then (期待する結果): 期待値 200 回、許容範囲 140..=260
        assert_eq!(investigator_counts.len(), 5);
        for (id, count) in &investigator_counts {
            assert!(
                (140..=260).contains(count),
                "{id} was CID {count} times out of {rounds}"
            );
        }
    }

    #[test]
    fn test_shuffle_produces_every_permutation_evenly() {
        // テスト項目: 3 要素のシャッフルで 6 通りの並びがほぼ均等に出現する
        // given (前提条件):
        let mut rng = StdRng::seed_from_u64(99);
        let trials = 6000;
        let mut seen: HashMap<[u8; 3], usize> = HashMap::new();

        // when (操作):
        for _ in 0..trials {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *seen.entry(items).or_insert(0) += 1;
        }

        // then (期待する結果): 期待値 1000 回、許容範囲 850..=1150
        assert_eq!(seen.len(), 6);
        for count in seen.values() {
            assert!((850..=1150).contains(count), "permutation seen {count} times");
        }
    }

    proptest! {
        /// Every participant gets exactly one role: one CID, one Killer, the rest Player
        #[test]
        fn prop_roles_partition_participants(count in MIN_PLAYERS..20usize, seed in any::<u64>()) {
            let players = create_test_players(count);
            let mut rng = StdRng::seed_from_u64(seed);

            let assignment = assign_roles(&players, &mut rng)?;

            let recipients: HashSet<&str> = assignment.iter().map(|(p, _)| p.id().as_str()).collect();
            let expected: HashSet<&str> = players.iter().map(|p| p.id().as_str()).collect();
            prop_assert_eq!(assignment.len(), count);
            prop_assert_eq!(recipients, expected);

            let counts = count_roles(&assignment);
            prop_assert_eq!(counts.get(&Role::Investigator).copied(), Some(1));
            prop_assert_eq!(counts.get(&Role::Antagonist).copied(), Some(1));
            prop_assert_eq!(counts.get(&Role::Bystander).copied().unwrap_or(0), count - 2);
        }
    }
}
