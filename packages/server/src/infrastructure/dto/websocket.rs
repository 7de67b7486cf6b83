//! WebSocket message DTOs.
//!
//! Every record carries a kebab-case `type` tag. Inbound messages are parsed into
//! [`ClientMessage`]; outbound records are serialized at the dispatcher boundary.

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Tag of an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    PlayerJoined,
    YouAreNowAdmin,
    PlayerLeft,
    Error,
    RolesAssigning,
    Role,
    GameStarted,
}

/// Inbound message from a client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    Join {
        #[serde(default)]
        name: Option<String>,
    },
    Start,
    /// Any other `type`; ignored by the coordinator
    #[serde(other)]
    Unknown,
}

/// A player was registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerJoinedMessage {
    pub r#type: MessageType,
    pub id: String,
    pub name: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub count: usize,
}

/// A registered player disconnected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLeftMessage {
    pub r#type: MessageType,
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// User-visible rejection, sent only to the offending connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub r#type: MessageType,
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            r#type: MessageType::Error,
            message: message.into(),
        }
    }
}

/// Message with no payload besides its tag (`you-are-now-admin`, `roles-assigning`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeMessage {
    pub r#type: MessageType,
}

impl NoticeMessage {
    pub fn you_are_now_admin() -> Self {
        Self {
            r#type: MessageType::YouAreNowAdmin,
        }
    }

    pub fn roles_assigning() -> Self {
        Self {
            r#type: MessageType::RolesAssigning,
        }
    }
}

/// A participant's role for the current round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMessage {
    pub r#type: MessageType,
    pub role: Role,
}

impl RoleMessage {
    pub fn new(role: Role) -> Self {
        Self {
            r#type: MessageType::Role,
            role,
        }
    }
}

/// All roles were delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStartedMessage {
    pub r#type: MessageType,
    pub count: usize,
}

impl GameStartedMessage {
    pub fn new(count: usize) -> Self {
        Self {
            r#type: MessageType::GameStarted,
            count,
        }
    }
}
