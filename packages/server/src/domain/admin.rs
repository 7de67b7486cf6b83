//! Admin Authority: which connection may start rounds, and who inherits that on departure.

use super::{registry::ConnectionRegistry, value_object::ConnectionId};

/// Result of a player leaving, as seen by the admin authority
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Succession {
    /// The departing player was not admin
    Unchanged,
    /// Admin passed to the earliest-joined remaining player
    Succeeded(ConnectionId),
    /// Nobody is left; the room has no admin until the next join
    Vacated,
}

/// Holds the single admin id, cross-referenced against the registry.
#[derive(Debug, Default)]
pub struct AdminAuthority {
    admin_id: Option<ConnectionId>,
}

impl AdminAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a join. Returns `true` if the joiner became admin.
    pub fn on_join(&mut self, id: &ConnectionId) -> bool {
        if self.admin_id.is_none() {
            self.admin_id = Some(id.clone());
            return true;
        }
        false
    }

    /// Record a departure. `remaining` must already exclude the departing player.
    pub fn on_leave(&mut self, id: &ConnectionId, remaining: &ConnectionRegistry) -> Succession {
        if !self.is_admin(id) {
            return Succession::Unchanged;
        }
        match remaining.first() {
            Some(next) => {
                let next_id = next.id().clone();
                self.admin_id = Some(next_id.clone());
                Succession::Succeeded(next_id)
            }
            None => {
                self.admin_id = None;
                Succession::Vacated
            }
        }
    }

    pub fn is_admin(&self, id: &ConnectionId) -> bool {
        self.admin_id.as_ref() == Some(id)
    }

    pub fn current(&self) -> Option<&ConnectionId> {
        self.admin_id.as_ref()
    }
}
