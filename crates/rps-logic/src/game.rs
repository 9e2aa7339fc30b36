//! Game variants and the variant factory

use serde::{Deserialize, Serialize};
use crate::moves::{Move, RoundOutcome};
use crate::referee::Referee;
use crate::session::SessionError;
use crate::strategy::{
    CyclicOpponent, OpponentState, OpponentStrategy, PredictiveOpponent, DEFAULT_MEMORY_CAPACITY,
};

/// Which kind of match is being played
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantKind {
    /// Human vs human
    PvP,
    /// Human vs the cyclic opponent
    SimpleAI,
    /// Human vs the predictive opponent
    AdaptiveAI,
}

impl VariantKind {
    pub const ALL: [VariantKind; 3] = [VariantKind::PvP, VariantKind::SimpleAI, VariantKind::AdaptiveAI];

    /// Accepts the short key (`a`, `b`, `c`) or the variant name
    pub fn from_mode_key(key: &str) -> Option<Self> {
        match key {
            "a" | "PvP" => Some(VariantKind::PvP),
            "b" | "SimpleAI" => Some(VariantKind::SimpleAI),
            "c" | "AdaptiveAI" => Some(VariantKind::AdaptiveAI),
            _ => None,
        }
    }

    pub fn mode_key(self) -> &'static str {
        match self {
            VariantKind::PvP => "a",
            VariantKind::SimpleAI => "b",
            VariantKind::AdaptiveAI => "c",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VariantKind::PvP => "PvP",
            VariantKind::SimpleAI => "SimpleAI",
            VariantKind::AdaptiveAI => "AdaptiveAI",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VariantKind::PvP => "human vs human",
            VariantKind::SimpleAI => "human vs cyclic opponent",
            VariantKind::AdaptiveAI => "human vs predictive opponent",
        }
    }
}

/// Where the second move of a round comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecondMover {
    /// Read from the round submission
    FromSubmission,
    /// Computed by the match's opponent strategy
    Opponent,
}

/// Match length and opponent sizing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    /// Wins needed to take the match
    pub win_threshold: u32,
    /// Observed moves kept by the predictive opponent
    pub memory_capacity: usize,
}

impl MatchConfig {
    /// First to 3, memory of 10
    pub fn standard() -> Self {
        Self { win_threshold: 3, memory_capacity: DEFAULT_MEMORY_CAPACITY }
    }

    pub fn first_to(win_threshold: u32) -> Self {
        Self { win_threshold, ..Self::standard() }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// A resolved round: both moves and who took it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedRound {
    pub first_move: Move,
    pub second_move: Move,
    pub outcome: RoundOutcome,
}

/// Binds the referee to a second-mover policy
///
/// Holds no match data; everything mutable lives in the match state and is
/// passed in per round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameVariant {
    kind: VariantKind,
}

impl GameVariant {
    pub fn new(kind: VariantKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> VariantKind {
        self.kind
    }

    pub fn second_mover(&self) -> SecondMover {
        match self.kind {
            VariantKind::PvP => SecondMover::FromSubmission,
            VariantKind::SimpleAI | VariantKind::AdaptiveAI => SecondMover::Opponent,
        }
    }

    /// Fresh opponent state for a new match, `None` for PvP
    pub fn new_opponent(&self, config: &MatchConfig) -> Option<OpponentState> {
        match self.kind {
            VariantKind::PvP => None,
            VariantKind::SimpleAI => Some(OpponentState::Cyclic(CyclicOpponent::new())),
            VariantKind::AdaptiveAI => Some(OpponentState::Predictive(PredictiveOpponent::new(
                config.memory_capacity,
            ))),
        }
    }

    /// Resolve one round
    ///
    /// `second` is only consulted for PvP. For the computer variants the
    /// opponent picks first, then observes the player's move after the
    /// referee has scored the round.
    pub fn play_round(
        &self,
        referee: &mut Referee,
        opponent: Option<&mut OpponentState>,
        first: Move,
        second: Option<Move>,
    ) -> Result<PlayedRound, SessionError> {
        let (second_move, opponent) = match (self.second_mover(), opponent) {
            (SecondMover::FromSubmission, _) => {
                let second_move = second
                    .ok_or_else(|| SessionError::InvalidMove("missing second move".to_string()))?;
                (second_move, None)
            }
            (SecondMover::Opponent, Some(opponent)) => (opponent.next_move(), Some(opponent)),
            (SecondMover::Opponent, None) => {
                return Err(SessionError::CorruptSnapshot(format!(
                    "{} match has no opponent state",
                    self.kind.name()
                )));
            }
        };

        let outcome = referee.record_round(first, second_move);
        if let Some(opponent) = opponent {
            opponent.record_observed_move(first);
        }

        Ok(PlayedRound { first_move: first, second_move, outcome })
    }
}

/// Build the variant for a mode key, or `None` if the key is not recognized
pub fn create_variant(mode_key: &str) -> Option<GameVariant> {
    VariantKind::from_mode_key(mode_key).map(GameVariant::new)
}
