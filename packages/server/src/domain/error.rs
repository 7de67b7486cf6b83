//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// ConnectionId too long error
    #[error("ConnectionId cannot exceed {max} characters (got {actual})")]
    ConnectionIdTooLong { max: usize, actual: usize },

    /// RoomKey validation error
    #[error("Room name cannot be empty")]
    RoomKeyEmpty,

    /// RoomKey too long error
    #[error("Room name cannot exceed {max} characters (got {actual})")]
    RoomKeyTooLong { max: usize, actual: usize },

    /// DisplayName too long error
    #[error("Name cannot exceed {max} characters (got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },
}

/// Errors raised by the connection registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A player with the same connection id is already registered
    #[error("Player '{0}' is already registered")]
    DuplicateId(String),
}

/// Rejections of a start-round command.
///
/// The `Display` text is sent verbatim to the requesting player.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("Only admin can start the game")]
    PermissionDenied,

    #[error("Need at least {required} players to start the game")]
    InsufficientPlayers { required: usize, actual: usize },

    #[error("A round is already in progress")]
    RoundInProgress,
}

/// Errors raised while pushing a message to a connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// The receiving side of the connection has gone away
    #[error("Connection '{0}' is closed")]
    ConnectionClosed(String),
}
