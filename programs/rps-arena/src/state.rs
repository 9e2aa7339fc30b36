//! Session storage and arena configuration

use std::collections::HashMap;
use rps_logic::{MatchConfig, MatchState, DEFAULT_MEMORY_CAPACITY};
use serde::{Deserialize, Serialize};
use crate::error::ArenaError;

/// Key-value store holding one match snapshot per match id
///
/// Last write wins; callers serialize access per match id if they need more.
pub trait SessionStore {
    fn load(&self, match_id: &str) -> Result<Option<MatchState>, ArenaError>;

    fn save(&mut self, match_id: &str, state: &MatchState) -> Result<(), ArenaError>;

    fn clear(&mut self, match_id: &str) -> Result<(), ArenaError>;
}

/// In-process store keeping each snapshot as its flat JSON record
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stored JSON record for a match
    pub fn raw(&self, match_id: &str) -> Option<&str> {
        self.records.get(match_id).map(String::as_str)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, match_id: &str) -> Result<Option<MatchState>, ArenaError> {
        match self.records.get(match_id) {
            Some(json) => Ok(Some(MatchState::from_json(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, match_id: &str, state: &MatchState) -> Result<(), ArenaError> {
        let json = state.to_json()?;
        self.records.insert(match_id.to_string(), json);
        Ok(())
    }

    fn clear(&mut self, match_id: &str) -> Result<(), ArenaError> {
        self.records.remove(match_id);
        Ok(())
    }
}

/// Arena-wide settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArenaConfig {
    /// Used when a start request does not name a threshold
    pub default_win_threshold: u32,
    /// Observed moves kept by the predictive opponent
    pub memory_capacity: usize,
}

impl ArenaConfig {
    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Match settings for a start request
    pub fn match_config(&self, win_threshold: Option<u32>) -> MatchConfig {
        MatchConfig {
            win_threshold: win_threshold.unwrap_or(self.default_win_threshold),
            memory_capacity: self.memory_capacity,
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            default_win_threshold: 3,
            memory_capacity: DEFAULT_MEMORY_CAPACITY,
        }
    }
}
