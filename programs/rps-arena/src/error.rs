//! Failures at the request boundary
//!
//! Rejected moves and unknown modes are not errors here: they are ordinary
//! response statuses. These cover the store and corrupt snapshots.

use rps_logic::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("session store failure: {0}")]
    Store(String),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}
