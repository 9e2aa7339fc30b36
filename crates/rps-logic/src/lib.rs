//! Match Logic for Rock-Paper-Scissors
//!
//! Round resolution, scoring, the two computer opponents and the per-match
//! state machine. This crate does no I/O: callers load a [`MatchState`],
//! run one transition on a [`MatchSession`] and store the result.
//!
//! Compiled to:
//! - Native (for the request boundary in `rps-arena`)
//! - WASM (for a browser frontend holding the snapshot itself)

mod moves;
mod referee;
mod strategy;
mod game;
mod session;

#[cfg(feature = "wasm")]
mod wasm;

pub use moves::{is_valid_move, Move, RoundOutcome};
pub use referee::{MatchScore, Referee};
pub use strategy::{
    CyclicOpponent, OpponentMemory, OpponentState, OpponentStrategy, PredictiveOpponent,
    DEFAULT_MEMORY_CAPACITY,
};
pub use game::{create_variant, GameVariant, MatchConfig, PlayedRound, SecondMover, VariantKind};
pub use session::{
    LastRound, MatchRecord, MatchSession, MatchState, RoundReport, SessionError, SessionPhase,
    Verdict,
};

/// Outcome of a single pair of moves
pub fn judge(first: Move, second: Move) -> RoundOutcome {
    RoundOutcome::resolve(first, second)
}
