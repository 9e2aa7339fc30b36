//! RPS Arena - request boundary for Rock-Paper-Scissors matches
//!
//! Each request loads one match snapshot from an injected [`SessionStore`],
//! performs at most one transition and writes the result back. Routing,
//! form parsing and rendering belong to the embedding application.

mod state;
mod instructions;
mod error;

pub use error::ArenaError;
pub use instructions::*;
pub use state::{ArenaConfig, MemoryStore, SessionStore};

/// Request handlers bound to a store and configuration
#[derive(Clone, Debug, Default)]
pub struct Arena<S: SessionStore> {
    store: S,
    config: ArenaConfig,
}

impl<S: SessionStore> Arena<S> {
    pub fn new(store: S, config: ArenaConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Start a match under `match_id`
    pub fn start_match(
        &mut self,
        match_id: &str,
        params: &StartMatchParams,
    ) -> Result<StartResponse, ArenaError> {
        instructions::lobby::start_match(&mut self.store, &self.config, match_id, params)
    }

    /// Submit the moves for the next round
    pub fn submit_round(
        &mut self,
        match_id: &str,
        params: &SubmitRoundParams,
    ) -> Result<SubmitResponse, ArenaError> {
        instructions::play::submit_round(&mut self.store, match_id, params)
    }

    /// Snapshot for rendering
    pub fn query_state(&self, match_id: &str) -> Result<Option<MatchView>, ArenaError> {
        instructions::play::query_state(&self.store, match_id)
    }

    /// Discard the stored match
    pub fn reset_match(&mut self, match_id: &str) -> Result<(), ArenaError> {
        instructions::lobby::reset_match(&mut self.store, match_id)
    }
}
