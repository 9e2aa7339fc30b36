//! Request handlers

pub mod lobby;
pub mod play;

pub use lobby::*;
pub use play::*;
