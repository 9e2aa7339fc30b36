//! Playing rounds and reading match state

use rps_logic::{
    MatchScore, MatchSession, MatchState, Move, RoundOutcome, SessionError, SessionPhase, Verdict,
};
use serde::{Deserialize, Serialize};
use crate::error::ArenaError;
use crate::state::SessionStore;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRoundParams {
    pub first_move: String,
    /// Required for PvP, ignored against the computer
    #[serde(default)]
    pub second_move: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round: u32,
    pub first_move: Move,
    pub second_move: Move,
    pub outcome: RoundOutcome,
    pub updated_score: MatchScore,
    pub game_over: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum SubmitResponse {
    RoundRecorded(RoundSummary),
    InvalidMove,
    SessionNotActive,
}

/// Load the match, play one round and store the result
///
/// Rejected submissions are not written back.
pub fn submit_round<S: SessionStore>(
    store: &mut S,
    match_id: &str,
    params: &SubmitRoundParams,
) -> Result<SubmitResponse, ArenaError> {
    let state = match store.load(match_id)? {
        Some(state) => state,
        None => {
            log::warn!("Match {}: round submitted with no match stored", match_id);
            return Ok(SubmitResponse::SessionNotActive);
        }
    };
    let mut session = MatchSession::restore(state)?;

    let report = match session.submit_round(&params.first_move, params.second_move.as_deref()) {
        Ok(report) => report,
        Err(SessionError::InvalidMove(reason)) => {
            log::warn!("Match {}: {}", match_id, SessionError::InvalidMove(reason));
            return Ok(SubmitResponse::InvalidMove);
        }
        Err(SessionError::SessionNotActive) => {
            log::warn!("Match {}: round submitted after the match ended", match_id);
            return Ok(SubmitResponse::SessionNotActive);
        }
        Err(e) => return Err(e.into()),
    };

    let state = session.snapshot().ok_or(SessionError::SessionNotActive)?;
    store.save(match_id, &state)?;

    log::info!(
        "Match {} round {}: {} vs {} ({})",
        match_id,
        report.round,
        report.first_move,
        report.second_move,
        report.outcome.describe(),
    );
    if report.game_over {
        log::info!("Match {} over: {}", match_id, state.verdict().describe());
    }

    Ok(SubmitResponse::RoundRecorded(RoundSummary {
        round: report.round,
        first_move: report.first_move,
        second_move: report.second_move,
        outcome: report.outcome,
        updated_score: report.score,
        game_over: report.game_over,
    }))
}

/// Everything a renderer needs for one match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub mode_label: String,
    pub phase: SessionPhase,
    /// Present once the match is over
    pub verdict: Option<Verdict>,
    pub state: MatchState,
}

/// Current snapshot of a match, `None` if nothing is stored
pub fn query_state<S: SessionStore>(
    store: &S,
    match_id: &str,
) -> Result<Option<MatchView>, ArenaError> {
    let Some(state) = store.load(match_id)? else {
        return Ok(None);
    };
    let phase = MatchSession::restore(state.clone())?.phase();

    Ok(Some(MatchView {
        mode_label: state.variant_kind.label().to_string(),
        phase,
        verdict: (phase == SessionPhase::Over).then(|| state.verdict()),
        state,
    }))
}
