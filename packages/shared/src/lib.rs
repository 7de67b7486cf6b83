//! Utilities shared by the Sleuth binaries: logging setup and JST time helpers.

pub mod logger;
pub mod time;
