//! Room session coordinator for a social deduction game.
//!
//! Players connect over WebSocket to a named room, join it, and the room's admin
//! starts rounds in which every player is dealt a secret role.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
