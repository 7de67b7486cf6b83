//! Room aggregate: the canonical state of one room.
//!
//! Every method validates first and mutates last, so a rejected command leaves the
//! room exactly as it was.

use rand::Rng;
use serde::Serialize;

use super::{
    admin::{AdminAuthority, Succession},
    entity::Player,
    error::{RegistryError, RoundError},
    registry::ConnectionRegistry,
    role_assignment::{RoleAssignment, assign_roles},
    value_object::{ConnectionId, RoomKey, Timestamp},
};

/// Lifecycle phase of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomPhase {
    /// No players
    Empty,
    /// Players present, accepting joins and a start command
    Open,
    /// Roles are being computed and delivered
    RoundPending,
}

/// Outcome of an accepted join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub is_admin: bool,
    /// Roster size after the join
    pub count: usize,
}

/// Outcome of a departure of a registered player
#[derive(Debug, Clone)]
pub struct LeaveOutcome {
    pub player: Player,
    /// Roster size after the departure
    pub count: usize,
    pub succession: Succession,
}

/// Read-only view of a player for inspection endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSummary {
    pub id: ConnectionId,
    pub name: String,
    pub is_admin: bool,
    pub joined_at: Timestamp,
}

/// Point-in-time copy of a room's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub key: RoomKey,
    pub created_at: Timestamp,
    pub phase: RoomPhase,
    pub admin_id: Option<ConnectionId>,
    pub rounds_played: u64,
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug)]
pub struct Room {
    key: RoomKey,
    created_at: Timestamp,
    registry: ConnectionRegistry,
    admin: AdminAuthority,
    round_in_progress: bool,
    rounds_played: u64,
}

impl Room {
    /// Create a new empty room
    pub fn new(key: RoomKey, created_at: Timestamp) -> Self {
        Self {
            key,
            created_at,
            registry: ConnectionRegistry::new(),
            admin: AdminAuthority::new(),
            round_in_progress: false,
            rounds_played: 0,
        }
    }

    pub fn key(&self) -> &RoomKey {
        &self.key
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn admin(&self) -> &AdminAuthority {
        &self.admin
    }

    pub fn phase(&self) -> RoomPhase {
        if self.round_in_progress {
            RoomPhase::RoundPending
        } else if self.registry.is_empty() {
            RoomPhase::Empty
        } else {
            RoomPhase::Open
        }
    }

    /// Register a player and settle admin status.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateId` if the connection already joined.
    pub fn join(&mut self, player: Player) -> Result<JoinOutcome, RegistryError> {
        let id = player.id().clone();
        self.registry.add(player)?;
        let is_admin = self.admin.on_join(&id);
        Ok(JoinOutcome {
            is_admin,
            count: self.registry.len(),
        })
    }

    /// Remove a player and settle admin succession. `None` if the id was not registered.
    pub fn leave(&mut self, id: &ConnectionId) -> Option<LeaveOutcome> {
        let player = self.registry.remove(id)?;
        let succession = self.admin.on_leave(id, &self.registry);
        Some(LeaveOutcome {
            player,
            count: self.registry.len(),
            succession,
        })
    }

    /// Validate a start command and compute roles over the current roster.
    ///
    /// On success the room enters `RoundPending` until [`Room::finish_round`].
    ///
    /// # Errors
    ///
    /// `RoundInProgress`, `PermissionDenied` or `InsufficientPlayers`, checked in that order.
    pub fn begin_round<R: Rng + ?Sized>(
        &mut self,
        requester: &ConnectionId,
        rng: &mut R,
    ) -> Result<RoleAssignment, RoundError> {
        if self.round_in_progress {
            return Err(RoundError::RoundInProgress);
        }
        if !self.admin.is_admin(requester) {
            return Err(RoundError::PermissionDenied);
        }
        let participants = self.registry.snapshot();
        let assignment = assign_roles(&participants, rng)?;
        self.round_in_progress = true;
        Ok(assignment)
    }

    /// Return to `Open` after roles were delivered
    pub fn finish_round(&mut self) {
        if self.round_in_progress {
            self.round_in_progress = false;
            self.rounds_played += 1;
        }
    }

    /// Drop a pending round without counting it, for a round whose delivery was cut short
    pub fn abort_round(&mut self) {
        self.round_in_progress = false;
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            key: self.key.clone(),
            created_at: self.created_at,
            phase: self.phase(),
            admin_id: self.admin.current().cloned(),
            rounds_played: self.rounds_played,
            players: self
                .registry
                .all()
                .map(|p| PlayerSummary {
                    id: p.id().clone(),
                    name: p.name.to_string(),
                    is_admin: self.admin.is_admin(p.id()),
                    joined_at: p.joined_at,
                })
                .collect(),
        }
    }
}
