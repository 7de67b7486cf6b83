//! UseCase layer: room coordination on top of the domain model.

pub mod config;
pub mod coordinator;
pub mod dispatcher;
pub mod error;
pub mod room_directory;

pub use config::{DEFAULT_PACING_DELAY, RoomConfig};
pub use coordinator::{RoomCoordinator, RoomEvent};
pub use dispatcher::Dispatcher;
pub use error::{CommandError, DirectoryError};
pub use room_directory::{RoomDirectory, RoomHandle};
