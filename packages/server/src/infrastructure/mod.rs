//! Infrastructure layer: wire formats and the transport behind `MessagePusher`.

pub mod dto;
pub mod message_pusher;
