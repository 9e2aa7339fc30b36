//! Starting and discarding matches

use rps_logic::{MatchSession, SessionError, VariantKind};
use serde::{Deserialize, Serialize};
use crate::error::ArenaError;
use crate::state::{ArenaConfig, SessionStore};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartMatchParams {
    pub mode_key: String,
    /// Falls back to the arena default when absent
    #[serde(default)]
    pub win_threshold: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum StartResponse {
    Started,
    InvalidMode,
    InvalidThreshold,
}

/// Start a new match, replacing any match stored under the same id
///
/// A rejected mode or threshold leaves the store untouched.
pub fn start_match<S: SessionStore>(
    store: &mut S,
    config: &ArenaConfig,
    match_id: &str,
    params: &StartMatchParams,
) -> Result<StartResponse, ArenaError> {
    let match_config = config.match_config(params.win_threshold);

    let mut session = MatchSession::new();
    match session.start_with_config(&params.mode_key, &match_config) {
        Ok(()) => {}
        Err(SessionError::InvalidMode(key)) => {
            log::warn!("Match {}: unknown mode {:?}", match_id, key);
            return Ok(StartResponse::InvalidMode);
        }
        Err(SessionError::InvalidThreshold) => {
            log::warn!("Match {}: rejected win threshold {}", match_id, match_config.win_threshold);
            return Ok(StartResponse::InvalidThreshold);
        }
        Err(e) => return Err(e.into()),
    }

    let state = session.snapshot().ok_or(SessionError::SessionNotActive)?;
    store.save(match_id, &state)?;

    log::info!(
        "Match {} started: {} ({}), first to {}",
        match_id,
        state.variant_kind.name(),
        state.variant_kind.label(),
        state.win_threshold,
    );

    Ok(StartResponse::Started)
}

/// Drop whatever is stored for a match
pub fn reset_match<S: SessionStore>(store: &mut S, match_id: &str) -> Result<(), ArenaError> {
    store.clear(match_id)?;
    log::info!("Match {} reset", match_id);
    Ok(())
}

/// Variants a client can offer, as `(key, label)` pairs
pub fn available_modes() -> Vec<(&'static str, &'static str)> {
    VariantKind::ALL
        .iter()
        .map(|kind| (kind.mode_key(), kind.label()))
        .collect()
}
