//! Core domain models: connections, players and roles.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::value_object::{ConnectionId, DisplayName, Timestamp};

/// Outbound channel of one connection.
///
/// Serialized messages written here are forwarded to the socket by the connection's writer task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// A live connection: its id and the channel used to reach it
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    channel: PusherChannel,
}

impl Connection {
    pub fn new(id: ConnectionId, channel: PusherChannel) -> Self {
        Self { id, channel }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn channel(&self) -> &PusherChannel {
        &self.channel
    }
}

/// A player who has joined a room.
///
/// Admin status is not stored here; it lives in [`super::AdminAuthority`].
#[derive(Debug, Clone)]
pub struct Player {
    /// The player's connection (owned by the registry entry)
    pub connection: Connection,
    /// Name shown to other players
    pub name: DisplayName,
    /// When the join was accepted
    pub joined_at: Timestamp,
}

impl Player {
    pub fn new(connection: Connection, name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            connection,
            name,
            joined_at,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        self.connection.id()
    }
}

/// Role handed to a player for one round.
///
/// Serialized with the tags the game clients render: `CID`, `Killer`, `Player`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "CID")]
    Investigator,
    #[serde(rename = "Killer")]
    Antagonist,
    #[serde(rename = "Player")]
    Bystander,
}

impl Role {
    /// Wire tag of the role
    pub fn tag(&self) -> &'static str {
        match self {
            Role::Investigator => "CID",
            Role::Antagonist => "Killer",
            Role::Bystander => "Player",
        }
    }
}
