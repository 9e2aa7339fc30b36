//! Moves, the beats-relation and round outcomes

use serde::{Deserialize, Serialize};

/// A move in Rock-Paper-Scissors
///
/// Serialized as its single-letter wire code (`k`, `p`, `s`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    #[serde(rename = "k")]
    Rock,
    #[serde(rename = "p")]
    Paper,
    #[serde(rename = "s")]
    Scissors,
}

impl Move {
    /// All moves in rotation order
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Parse a wire code. Exact match only: no trimming, no case folding.
    pub fn from_code(code: &str) -> Option<Move> {
        match code {
            "k" => Some(Move::Rock),
            "p" => Some(Move::Paper),
            "s" => Some(Move::Scissors),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Move::Rock => "k",
            Move::Paper => "p",
            Move::Scissors => "s",
        }
    }

    /// Display label, as stored in the last round result
    pub fn label(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }

    /// Rock beats Scissors, Scissors beats Paper, Paper beats Rock
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Scissors, Move::Paper)
                | (Move::Paper, Move::Rock)
        )
    }

    /// The move that beats this one
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// True only for the three canonical move codes
pub fn is_valid_move(code: &str) -> bool {
    Move::from_code(code).is_some()
}

/// Who took a round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    FirstPlayer,
    SecondPlayer,
    Tie,
}

impl RoundOutcome {
    /// Apply the beats-relation to a pair of moves
    pub fn resolve(first: Move, second: Move) -> Self {
        if first == second {
            RoundOutcome::Tie
        } else if first.beats(second) {
            RoundOutcome::FirstPlayer
        } else {
            RoundOutcome::SecondPlayer
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            RoundOutcome::FirstPlayer => "Player 1 won the round!",
            RoundOutcome::SecondPlayer => "Player 2 won the round!",
            RoundOutcome::Tie => "Tie!",
        }
    }
}
