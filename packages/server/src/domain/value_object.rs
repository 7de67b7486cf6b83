//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

const MAX_ID_LENGTH: usize = 100;

/// Maximum number of characters in a player's display name
pub const MAX_DISPLAY_NAME_LENGTH: usize = 32;

/// Name used when a player joins without one
pub const DEFAULT_DISPLAY_NAME: &str = "Player";

/// Room a connection lands in when it names none
pub const DEFAULT_ROOM_KEY: &str = "default-room";

/// Connection identifier value object.
///
/// Identifies one WebSocket connection for its whole lifetime. Ids are never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a new ConnectionId.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or longer than 100 characters.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        let len = id.len();
        if len > MAX_ID_LENGTH {
            return Err(ValueObjectError::ConnectionIdTooLong {
                max: MAX_ID_LENGTH,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Build a ConnectionId from a freshly generated UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room key value object.
///
/// The name a room is addressed by. One coordinator exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomKey(String);

impl RoomKey {
    /// Create a new RoomKey.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or longer than 100 characters.
    pub fn new(key: String) -> Result<Self, ValueObjectError> {
        if key.is_empty() {
            return Err(ValueObjectError::RoomKeyEmpty);
        }
        let len = key.len();
        if len > MAX_ID_LENGTH {
            return Err(ValueObjectError::RoomKeyTooLong {
                max: MAX_ID_LENGTH,
                actual: len,
            });
        }
        Ok(Self(key))
    }

    /// Resolve a raw key from a request, falling back to `default` when it is absent or blank.
    pub fn resolve(raw: Option<String>, default: &RoomKey) -> Result<Self, ValueObjectError> {
        match raw {
            Some(key) if !key.trim().is_empty() => Self::new(key.trim().to_string()),
            _ => Ok(default.clone()),
        }
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for RoomKey {
    fn default() -> Self {
        Self(DEFAULT_ROOM_KEY.to_string())
    }
}

impl TryFrom<String> for RoomKey {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name value object.
///
/// Always non-blank: missing or whitespace-only input becomes [`DEFAULT_DISPLAY_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    /// Build a display name from the optional `name` field of a join request.
    ///
    /// # Errors
    ///
    /// Returns `DisplayNameTooLong` if the trimmed name exceeds 32 characters.
    pub fn from_input(raw: Option<String>) -> Result<Self, ValueObjectError> {
        let trimmed = raw.as_deref().map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Ok(Self(DEFAULT_DISPLAY_NAME.to_string()));
        }
        let len = trimmed.chars().count();
        if len > MAX_DISPLAY_NAME_LENGTH {
            return Err(ValueObjectError::DisplayNameTooLong {
                max: MAX_DISPLAY_NAME_LENGTH,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (JST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
