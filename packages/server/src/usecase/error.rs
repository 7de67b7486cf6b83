//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::{RoundError, ValueObjectError};

/// Rejection of one inbound command.
///
/// Every variant is recoverable: its `Display` text is unicast to the sender as an
/// `error` message and the room state is left untouched.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Payload is not a well-formed message
    #[error("Invalid message")]
    Protocol(#[from] serde_json::Error),

    /// A second `join` from a connection that already joined
    #[error("Already joined")]
    AlreadyJoined,

    #[error(transparent)]
    InvalidName(#[from] ValueObjectError),

    #[error(transparent)]
    Round(#[from] RoundError),
}

/// Errors raised when talking to a room actor
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The room's event loop is no longer running
    #[error("Room '{0}' is not accepting events")]
    RoomUnavailable(String),
}
