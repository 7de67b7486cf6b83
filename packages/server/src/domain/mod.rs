//! Domain layer: room state and the rules that govern it.

pub mod admin;
pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod registry;
pub mod role_assignment;
pub mod room;
pub mod value_object;

pub use admin::{AdminAuthority, Succession};
pub use entity::{Connection, Player, PusherChannel, Role};
pub use error::{MessagePushError, RegistryError, RoundError, ValueObjectError};
pub use factory::ConnectionIdFactory;
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use message_pusher::MessagePusher;
pub use registry::ConnectionRegistry;
pub use role_assignment::{MIN_PLAYERS, RoleAssignment, assign_roles, shuffle};
pub use room::{JoinOutcome, LeaveOutcome, PlayerSummary, Room, RoomPhase, RoomSnapshot};
pub use value_object::{
    ConnectionId, DEFAULT_DISPLAY_NAME, DEFAULT_ROOM_KEY, DisplayName, MAX_DISPLAY_NAME_LENGTH, RoomKey, Timestamp,
};
