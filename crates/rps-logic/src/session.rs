//! Match session state machine and its persisted snapshot
//!
//! A session is rebuilt from a [`MatchState`] on every request, performs at
//! most one transition, and hands the updated state back to the caller for
//! storage. The session itself never touches a store.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::game::{create_variant, GameVariant, MatchConfig, PlayedRound, VariantKind};
use crate::moves::{Move, RoundOutcome};
use crate::referee::{MatchScore, Referee};
use crate::strategy::{CyclicOpponent, OpponentMemory, OpponentState, PredictiveOpponent};

/// Errors raised by session transitions
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown game mode: {0:?}")]
    InvalidMode(String),

    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("no match in progress")]
    SessionNotActive,

    #[error("match already started")]
    AlreadyStarted,

    #[error("win threshold must be at least 1")]
    InvalidThreshold,

    #[error("corrupt match snapshot: {0}")]
    CorruptSnapshot(String),
}

/// Lifecycle of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Over,
}

/// The last resolved round, as shown to players
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRound {
    pub first_move_label: String,
    pub second_move_label: String,
    pub outcome: RoundOutcome,
}

impl From<&PlayedRound> for LastRound {
    fn from(round: &PlayedRound) -> Self {
        Self {
            first_move_label: round.first_move.label().to_string(),
            second_move_label: round.second_move.label().to_string(),
            outcome: round.outcome,
        }
    }
}

/// Final result of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    FirstPlayer,
    SecondPlayer,
    Computer,
    /// Nobody reached the threshold
    Undecided,
}

impl Verdict {
    pub fn describe(self) -> &'static str {
        match self {
            Verdict::FirstPlayer => "Player 1 won the match!",
            Verdict::SecondPlayer => "Player 2 won the match!",
            Verdict::Computer => "The computer won the match!",
            Verdict::Undecided => "Match abandoned",
        }
    }
}

/// Everything a match needs to survive between requests
///
/// Serializes to the flat persisted layout (see [`MatchRecord`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MatchRecord", try_from = "MatchRecord")]
pub struct MatchState {
    pub variant_kind: VariantKind,
    pub score: MatchScore,
    /// 1-based number of the next round to play
    pub round_number: u32,
    pub last_round_result: Option<LastRound>,
    pub game_over: bool,
    pub win_threshold: u32,
    /// `None` for PvP
    pub opponent: Option<OpponentState>,
}

impl MatchState {
    pub fn verdict(&self) -> Verdict {
        if self.score.first_player_wins >= self.win_threshold {
            Verdict::FirstPlayer
        } else if self.score.second_player_wins >= self.win_threshold {
            match self.variant_kind {
                VariantKind::PvP => Verdict::SecondPlayer,
                VariantKind::SimpleAI | VariantKind::AdaptiveAI => Verdict::Computer,
            }
        } else {
            Verdict::Undecided
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn check_consistency(&self) -> Result<(), SessionError> {
        if self.round_number == 0 {
            return Err(SessionError::CorruptSnapshot("roundNumber must be at least 1".to_string()));
        }
        if self.win_threshold == 0 {
            return Err(SessionError::CorruptSnapshot("winThreshold must be at least 1".to_string()));
        }
        let rounds = self.score.checked_rounds_played().ok_or_else(|| {
            SessionError::CorruptSnapshot("score counters overflow".to_string())
        })?;
        if rounds != self.round_number - 1 {
            return Err(SessionError::CorruptSnapshot(format!(
                "score covers {} rounds but roundNumber is {}",
                rounds, self.round_number
            )));
        }
        let over = Referee::with_score(self.score).is_match_over(self.win_threshold);
        if over != self.game_over {
            return Err(SessionError::CorruptSnapshot(
                "gameOver disagrees with the score".to_string(),
            ));
        }
        let opponent_matches = matches!(
            (self.variant_kind, &self.opponent),
            (VariantKind::PvP, None)
                | (VariantKind::SimpleAI, Some(OpponentState::Cyclic(_)))
                | (VariantKind::AdaptiveAI, Some(OpponentState::Predictive(_)))
        );
        if !opponent_matches {
            return Err(SessionError::CorruptSnapshot(format!(
                "opponent state does not fit a {} match",
                self.variant_kind.name()
            )));
        }
        Ok(())
    }
}

/// Flat persisted layout of a [`MatchState`]
///
/// Opponent keys are only present for the variant that owns them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "variantKind")]
    pub variant_kind: VariantKind,
    #[serde(rename = "score.firstPlayerWins")]
    pub first_player_wins: u32,
    #[serde(rename = "score.secondPlayerWins")]
    pub second_player_wins: u32,
    #[serde(rename = "score.ties")]
    pub ties: u32,
    #[serde(rename = "roundNumber")]
    pub round_number: u32,
    #[serde(rename = "lastRoundResult")]
    pub last_round_result: Option<LastRound>,
    #[serde(rename = "gameOver")]
    pub game_over: bool,
    #[serde(rename = "winThreshold")]
    pub win_threshold: u32,
    #[serde(rename = "opponentMemory", default, skip_serializing_if = "Option::is_none")]
    pub opponent_memory: Option<Vec<Option<Move>>>,
    #[serde(rename = "opponentMemoryCursor", default, skip_serializing_if = "Option::is_none")]
    pub opponent_memory_cursor: Option<usize>,
    #[serde(rename = "opponentCycleIndex", default, skip_serializing_if = "Option::is_none")]
    pub opponent_cycle_index: Option<u8>,
}

impl From<MatchState> for MatchRecord {
    fn from(state: MatchState) -> Self {
        let mut record = MatchRecord {
            variant_kind: state.variant_kind,
            first_player_wins: state.score.first_player_wins,
            second_player_wins: state.score.second_player_wins,
            ties: state.score.ties,
            round_number: state.round_number,
            last_round_result: state.last_round_result,
            game_over: state.game_over,
            win_threshold: state.win_threshold,
            opponent_memory: None,
            opponent_memory_cursor: None,
            opponent_cycle_index: None,
        };
        match state.opponent {
            Some(OpponentState::Cyclic(opponent)) => {
                record.opponent_cycle_index = Some(opponent.index());
            }
            Some(OpponentState::Predictive(opponent)) => {
                record.opponent_memory = Some(opponent.memory().slots().to_vec());
                record.opponent_memory_cursor = Some(opponent.memory().cursor());
            }
            None => {}
        }
        record
    }
}

impl TryFrom<MatchRecord> for MatchState {
    type Error = SessionError;

    fn try_from(record: MatchRecord) -> Result<Self, Self::Error> {
        let has_cycle = record.opponent_cycle_index.is_some();
        let has_memory = record.opponent_memory.is_some() || record.opponent_memory_cursor.is_some();
        let foreign_keys = match record.variant_kind {
            VariantKind::PvP => has_cycle || has_memory,
            VariantKind::SimpleAI => has_memory,
            VariantKind::AdaptiveAI => has_cycle,
        };
        if foreign_keys {
            return Err(SessionError::CorruptSnapshot(format!(
                "opponent keys that do not belong to a {} match",
                record.variant_kind.name()
            )));
        }

        let opponent = match record.variant_kind {
            VariantKind::PvP => None,
            VariantKind::SimpleAI => {
                let index = record.opponent_cycle_index.ok_or_else(|| {
                    SessionError::CorruptSnapshot("missing opponentCycleIndex".to_string())
                })?;
                let opponent = CyclicOpponent::from_index(index).ok_or_else(|| {
                    SessionError::CorruptSnapshot(format!("opponentCycleIndex {} out of range", index))
                })?;
                Some(OpponentState::Cyclic(opponent))
            }
            VariantKind::AdaptiveAI => {
                let (slots, cursor) = record
                    .opponent_memory
                    .zip(record.opponent_memory_cursor)
                    .ok_or_else(|| {
                        SessionError::CorruptSnapshot("missing opponent memory".to_string())
                    })?;
                let memory = OpponentMemory::from_parts(slots, cursor).ok_or_else(|| {
                    SessionError::CorruptSnapshot(format!("inconsistent opponent memory at cursor {}", cursor))
                })?;
                Some(OpponentState::Predictive(PredictiveOpponent::with_memory(memory)))
            }
        };

        let state = MatchState {
            variant_kind: record.variant_kind,
            score: MatchScore {
                first_player_wins: record.first_player_wins,
                second_player_wins: record.second_player_wins,
                ties: record.ties,
            },
            round_number: record.round_number,
            last_round_result: record.last_round_result,
            game_over: record.game_over,
            win_threshold: record.win_threshold,
            opponent,
        };
        state.check_consistency()?;
        Ok(state)
    }
}

/// Outcome of a successful round submission
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    /// Number of the round just played
    pub round: u32,
    pub first_move: Move,
    pub second_move: Move,
    pub outcome: RoundOutcome,
    pub score: MatchScore,
    pub game_over: bool,
}

/// Per-match state machine: NotStarted -> InProgress -> Over
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchSession {
    state: Option<MatchState>,
}

impl MatchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from a stored snapshot
    pub fn restore(state: MatchState) -> Result<Self, SessionError> {
        state.check_consistency()?;
        Ok(Self { state: Some(state) })
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.state {
            None => SessionPhase::NotStarted,
            Some(state) if state.game_over => SessionPhase::Over,
            Some(_) => SessionPhase::InProgress,
        }
    }

    pub fn state(&self) -> Option<&MatchState> {
        self.state.as_ref()
    }

    /// Copy of the current state, `None` before the match starts
    pub fn snapshot(&self) -> Option<MatchState> {
        self.state.clone()
    }

    /// Start a match with the standard opponent memory
    pub fn start(&mut self, mode_key: &str, win_threshold: u32) -> Result<(), SessionError> {
        self.start_with_config(mode_key, &MatchConfig::first_to(win_threshold))
    }

    pub fn start_with_config(&mut self, mode_key: &str, config: &MatchConfig) -> Result<(), SessionError> {
        if self.state.is_some() {
            return Err(SessionError::AlreadyStarted);
        }
        if config.win_threshold == 0 {
            return Err(SessionError::InvalidThreshold);
        }
        let variant = create_variant(mode_key)
            .ok_or_else(|| SessionError::InvalidMode(mode_key.to_string()))?;

        self.state = Some(MatchState {
            variant_kind: variant.kind(),
            score: MatchScore::default(),
            round_number: 1,
            last_round_result: None,
            game_over: false,
            win_threshold: config.win_threshold,
            opponent: variant.new_opponent(config),
        });
        log::debug!(
            "Started {} match, first to {}",
            variant.kind().name(),
            config.win_threshold
        );
        Ok(())
    }

    /// Play one round
    ///
    /// `second_move` is required for PvP and ignored otherwise. On any error
    /// the state is left untouched.
    pub fn submit_round(
        &mut self,
        first_move: &str,
        second_move: Option<&str>,
    ) -> Result<RoundReport, SessionError> {
        let state = match self.state.as_ref() {
            Some(state) if !state.game_over => state,
            _ => return Err(SessionError::SessionNotActive),
        };
        let variant = GameVariant::new(state.variant_kind);
        let following = state.round_number.checked_add(1).ok_or_else(|| {
            SessionError::CorruptSnapshot("roundNumber overflow".to_string())
        })?;

        let first = Move::from_code(first_move)
            .ok_or_else(|| SessionError::InvalidMove(format!("{:?}", first_move)))?;
        let second = second_move.map(|code| {
            Move::from_code(code).ok_or_else(|| SessionError::InvalidMove(format!("{:?}", code)))
        });
        let second = match (variant.kind(), second) {
            (VariantKind::PvP, Some(parsed)) => Some(parsed?),
            // The computer picks its own move; whatever was submitted is ignored
            (_, _) => None,
        };

        // Work on a copy so a failed round leaves the session as it was
        let mut next = state.clone();
        let mut referee = Referee::with_score(next.score);
        let round = variant.play_round(&mut referee, next.opponent.as_mut(), first, second)?;

        next.score = referee.score();
        next.last_round_result = Some(LastRound::from(&round));
        let played = next.round_number;
        next.round_number = following;
        next.game_over = referee.is_match_over(next.win_threshold);

        log::debug!(
            "Round {}: {} vs {} -> {:?}",
            played,
            round.first_move,
            round.second_move,
            round.outcome
        );
        if next.game_over {
            log::debug!("Match over after round {}: {:?}", played, next.verdict());
        }

        let report = RoundReport {
            round: played,
            first_move: round.first_move,
            second_move: round.second_move,
            outcome: round.outcome,
            score: next.score,
            game_over: next.game_over,
        };
        self.state = Some(next);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn started(mode_key: &str, win_threshold: u32) -> MatchSession {
        let mut session = MatchSession::new();
        session.start(mode_key, win_threshold).unwrap();
        session
    }

    #[test]
    fn test_start_initializes_state() {
        let session = started("a", 3);
        assert_eq!(session.phase(), SessionPhase::InProgress);
        let state = session.snapshot().unwrap();
        assert_eq!(state.variant_kind, VariantKind::PvP);
        assert_eq!(state.score, MatchScore::default());
        assert_eq!(state.round_number, 1);
        assert_eq!(state.last_round_result, None);
        assert!(!state.game_over);
        assert!(state.opponent.is_none());
    }

    #[test]
    fn test_start_invalid_mode_stays_not_started() {
        let mut session = MatchSession::new();
        assert_eq!(session.start("x", 3), Err(SessionError::InvalidMode("x".to_string())));
        assert_eq!(session.start("", 3), Err(SessionError::InvalidMode(String::new())));
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn test_start_zero_threshold_rejected() {
        let mut session = MatchSession::new();
        assert_eq!(session.start("a", 0), Err(SessionError::InvalidThreshold));
        assert_eq!(session.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut session = started("b", 3);
        assert_eq!(session.start("a", 3), Err(SessionError::AlreadyStarted));
        assert_eq!(session.state().unwrap().variant_kind, VariantKind::SimpleAI);
    }

    #[test]
    fn test_submit_before_start() {
        let mut session = MatchSession::new();
        assert_eq!(session.submit_round("k", Some("s")), Err(SessionError::SessionNotActive));
        assert_eq!(session.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn test_pvp_first_to_three() {
        let mut session = started("a", 3);
        for round in 1..=3 {
            let report = session.submit_round("k", Some("s")).unwrap();
            assert_eq!(report.round, round);
            assert_eq!(report.outcome, RoundOutcome::FirstPlayer);
        }
        let state = session.snapshot().unwrap();
        assert_eq!(state.score, MatchScore { first_player_wins: 3, second_player_wins: 0, ties: 0 });
        assert!(state.game_over);
        assert_eq!(state.round_number, 4);
        assert_eq!(session.phase(), SessionPhase::Over);
        assert_eq!(state.verdict(), Verdict::FirstPlayer);
    }

    #[test]
    fn test_over_is_terminal() {
        let mut session = started("a", 1);
        let report = session.submit_round("s", Some("k")).unwrap();
        assert!(report.game_over);
        let before = session.snapshot();
        assert_eq!(session.submit_round("k", Some("s")), Err(SessionError::SessionNotActive));
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.phase(), SessionPhase::Over);
        assert_eq!(session.state().unwrap().verdict(), Verdict::SecondPlayer);
    }

    #[test]
    fn test_invalid_first_move_leaves_state() {
        let mut session = started("a", 3);
        let before = session.snapshot();
        for code in ["x", "", "K", "kivi"] {
            assert!(matches!(session.submit_round(code, Some("k")), Err(SessionError::InvalidMove(_))));
        }
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_pvp_invalid_or_missing_second_move() {
        let mut session = started("a", 3);
        let before = session.snapshot();
        assert!(matches!(session.submit_round("k", Some("x")), Err(SessionError::InvalidMove(_))));
        assert!(matches!(session.submit_round("k", None), Err(SessionError::InvalidMove(_))));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_pvp_tie_records_last_round() {
        let mut session = started("a", 3);
        let report = session.submit_round("k", Some("k")).unwrap();
        assert_eq!(report.outcome, RoundOutcome::Tie);
        let state = session.snapshot().unwrap();
        assert_eq!(state.score.ties, 1);
        assert_eq!(state.round_number, 2);
        assert_eq!(
            state.last_round_result,
            Some(LastRound {
                first_move_label: "Rock".to_string(),
                second_move_label: "Rock".to_string(),
                outcome: RoundOutcome::Tie,
            })
        );
    }

    #[test]
    fn test_simple_ai_cycles() {
        let mut session = started("b", 10);
        let seconds: Vec<_> = (0..4)
            .map(|_| session.submit_round("k", None).unwrap().second_move)
            .collect();
        assert_eq!(seconds, vec![Move::Paper, Move::Scissors, Move::Rock, Move::Paper]);
    }

    #[test]
    fn test_simple_ai_ignores_bad_second_move() {
        let mut session = started("b", 3);
        let report = session.submit_round("k", Some("garbage")).unwrap();
        assert_eq!(report.second_move, Move::Paper);
    }

    #[test]
    fn test_computer_verdict() {
        let mut session = started("b", 1);
        // Cyclic opponent opens with Paper
        session.submit_round("k", None).unwrap();
        assert_eq!(session.state().unwrap().verdict(), Verdict::Computer);
    }

    #[test]
    fn test_adaptive_memory_saturates() {
        let mut session = started("c", 100);
        for _ in 0..12 {
            session.submit_round("k", None).unwrap();
        }
        match &session.state().unwrap().opponent {
            Some(OpponentState::Predictive(p)) => {
                assert_eq!(p.memory().cursor(), 10);
                assert!(p.memory().is_full());
            }
            other => panic!("unexpected opponent {:?}", other),
        }
    }

    #[test]
    fn test_adaptive_nine_rocks_small_memory() {
        let mut session = MatchSession::new();
        let config = MatchConfig { win_threshold: 100, memory_capacity: 5 };
        session.start_with_config("c", &config).unwrap();
        for _ in 0..9 {
            session.submit_round("k", None).unwrap();
        }
        let record = MatchRecord::from(session.snapshot().unwrap());
        assert_eq!(record.opponent_memory_cursor, Some(5));
        assert_eq!(record.opponent_memory, Some(vec![Some(Move::Rock); 5]));
    }

    #[test]
    fn test_adaptive_learns_repeated_rock() {
        let mut session = started("c", 100);
        // Opening moves before a pattern exists
        assert_eq!(session.submit_round("k", None).unwrap().second_move, Move::Rock);
        assert_eq!(session.submit_round("k", None).unwrap().second_move, Move::Rock);
        // Rock followed Rock: counter with Paper
        assert_eq!(session.submit_round("k", None).unwrap().second_move, Move::Paper);
    }

    #[test]
    fn test_flat_layout_keys() {
        let mut session = started("c", 3);
        session.submit_round("p", None).unwrap();
        let value = serde_json::to_value(session.snapshot().unwrap()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "gameOver",
                "lastRoundResult",
                "opponentMemory",
                "opponentMemoryCursor",
                "roundNumber",
                "score.firstPlayerWins",
                "score.secondPlayerWins",
                "score.ties",
                "variantKind",
                "winThreshold",
            ]
        );
        assert_eq!(object["variantKind"], "AdaptiveAI");
        assert_eq!(object["opponentMemoryCursor"], 1);
        assert_eq!(object["opponentMemory"][0], "p");
        assert!(object["opponentMemory"][1].is_null());
        assert_eq!(object["lastRoundResult"]["firstMoveLabel"], "Paper");
    }

    #[test]
    fn test_flat_layout_simple_ai_and_pvp() {
        let session = started("b", 3);
        let value = serde_json::to_value(session.snapshot().unwrap()).unwrap();
        assert_eq!(value["opponentCycleIndex"], 0);
        assert!(value.get("opponentMemory").is_none());
        assert!(value["lastRoundResult"].is_null());

        let session = started("a", 3);
        let value = serde_json::to_value(session.snapshot().unwrap()).unwrap();
        assert!(value.get("opponentCycleIndex").is_none());
        assert!(value.get("opponentMemoryCursor").is_none());
    }

    #[test]
    fn test_corrupt_snapshots_rejected() {
        let session = started("b", 3);
        let mut value = serde_json::to_value(session.snapshot().unwrap()).unwrap();
        value["opponentCycleIndex"] = serde_json::json!(7);
        assert!(serde_json::from_value::<MatchState>(value.clone()).is_err());

        value.as_object_mut().unwrap().remove("opponentCycleIndex");
        assert!(serde_json::from_value::<MatchState>(value).is_err());

        let mut state = session.snapshot().unwrap();
        state.opponent = None;
        assert!(matches!(MatchSession::restore(state), Err(SessionError::CorruptSnapshot(_))));

        let mut state = session.snapshot().unwrap();
        state.round_number = 0;
        assert!(matches!(MatchSession::restore(state), Err(SessionError::CorruptSnapshot(_))));
    }

    #[test]
    fn test_overflowing_score_rejected() {
        let json = r#"{
            "variantKind": "PvP",
            "score.firstPlayerWins": 4294967295,
            "score.secondPlayerWins": 0,
            "score.ties": 1,
            "roundNumber": 1,
            "lastRoundResult": null,
            "gameOver": true,
            "winThreshold": 3
        }"#;
        assert!(MatchState::from_json(json).is_err());

        let mut state = started("a", 3).snapshot().unwrap();
        state.score = MatchScore { first_player_wins: u32::MAX, second_player_wins: 0, ties: 1 };
        state.game_over = true;
        assert!(matches!(MatchSession::restore(state), Err(SessionError::CorruptSnapshot(_))));
    }

    #[test]
    fn test_round_number_overflow_leaves_state() {
        let mut state = started("a", u32::MAX).snapshot().unwrap();
        state.score.ties = u32::MAX - 1;
        state.round_number = u32::MAX;
        let mut session = MatchSession::restore(state.clone()).unwrap();
        assert!(matches!(
            session.submit_round("k", Some("k")),
            Err(SessionError::CorruptSnapshot(_))
        ));
        assert_eq!(session.snapshot(), Some(state));
    }

    #[test]
    fn test_foreign_opponent_keys_rejected() {
        let pvp = serde_json::to_value(started("a", 3).snapshot().unwrap()).unwrap();
        let mut value = pvp.clone();
        value["opponentCycleIndex"] = serde_json::json!(0);
        assert!(serde_json::from_value::<MatchState>(value).is_err());
        let mut value = pvp;
        value["opponentMemoryCursor"] = serde_json::json!(0);
        assert!(serde_json::from_value::<MatchState>(value).is_err());

        let mut simple = serde_json::to_value(started("b", 3).snapshot().unwrap()).unwrap();
        simple["opponentMemory"] = serde_json::json!([null, null]);
        assert!(serde_json::from_value::<MatchState>(simple).is_err());

        let mut adaptive = serde_json::to_value(started("c", 3).snapshot().unwrap()).unwrap();
        adaptive["opponentCycleIndex"] = serde_json::json!(1);
        assert!(serde_json::from_value::<MatchState>(adaptive).is_err());
    }

    #[test]
    fn test_restore_over_session() {
        let mut session = started("a", 1);
        session.submit_round("k", Some("s")).unwrap();
        let restored = MatchSession::restore(session.snapshot().unwrap()).unwrap();
        assert_eq!(restored.phase(), SessionPhase::Over);
    }

    fn any_code() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["k", "p", "s", "x", "K", ""])
    }

    proptest! {
        #[test]
        fn snapshot_round_trips(
            mode in prop::sample::select(vec!["a", "b", "c"]),
            threshold in 1u32..6,
            rounds in prop::collection::vec((any_code(), prop::option::of(any_code())), 0..30),
        ) {
            let mut session = MatchSession::new();
            session.start(mode, threshold).unwrap();
            let mut resolved = 0u32;
            for (first, second) in rounds {
                if session.submit_round(first, second).is_ok() {
                    resolved += 1;
                }

                let state = session.snapshot().unwrap();
                prop_assert_eq!(state.score.rounds_played(), resolved);
                prop_assert_eq!(state.round_number, resolved + 1);

                let restored = MatchSession::restore(state.clone()).unwrap();
                prop_assert_eq!(restored.snapshot(), Some(state.clone()));

                let json = state.to_json().unwrap();
                prop_assert_eq!(MatchState::from_json(&json).unwrap(), state);
            }
        }
    }
}
