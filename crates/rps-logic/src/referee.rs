//! Round resolution and cumulative scoring

use serde::{Deserialize, Serialize};
use crate::moves::{Move, RoundOutcome};

/// Cumulative score of a match
///
/// Exactly one field increments per resolved round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub first_player_wins: u32,
    pub second_player_wins: u32,
    pub ties: u32,
}

impl MatchScore {
    /// Rounds covered by the score, saturating at `u32::MAX`
    pub fn rounds_played(&self) -> u32 {
        self.checked_rounds_played().unwrap_or(u32::MAX)
    }

    /// Rounds covered by the score, `None` if the counters overflow
    pub fn checked_rounds_played(&self) -> Option<u32> {
        self.first_player_wins
            .checked_add(self.second_player_wins)?
            .checked_add(self.ties)
    }
}

impl std::fmt::Display for MatchScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Score: {} - {}", self.first_player_wins, self.second_player_wins)?;
        write!(f, "Ties: {}", self.ties)
    }
}

/// Applies the beats-relation and keeps the score
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Referee {
    score: MatchScore,
}

impl Referee {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume refereeing from a persisted score
    pub fn with_score(score: MatchScore) -> Self {
        Self { score }
    }

    pub fn score(&self) -> MatchScore {
        self.score
    }

    /// Resolve one round and credit the winner (or the tie counter)
    pub fn record_round(&mut self, first: Move, second: Move) -> RoundOutcome {
        let outcome = RoundOutcome::resolve(first, second);
        match outcome {
            RoundOutcome::FirstPlayer => self.score.first_player_wins += 1,
            RoundOutcome::SecondPlayer => self.score.second_player_wins += 1,
            RoundOutcome::Tie => self.score.ties += 1,
        }
        outcome
    }

    /// True once either player has `threshold` wins
    pub fn is_match_over(&self, threshold: u32) -> bool {
        self.score.first_player_wins >= threshold || self.score.second_player_wins >= threshold
    }
}
