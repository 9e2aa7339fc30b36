//! WASM bindings for a browser frontend
//!
//! The frontend keeps the match snapshot (flat JSON layout) and passes it back
//! on every call, so each binding is a single stateless transition.

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{is_valid_move, MatchConfig, MatchSession, MatchState, RoundReport, VariantKind};

fn parse_state(state_json: &str) -> Result<MatchState, JsError> {
    MatchState::from_json(state_json)
        .map_err(|e| JsError::new(&format!("Invalid match state: {}", e)))
}

/// Start a match and return its snapshot as JSON
///
/// # Arguments
/// * `mode_key` - `a`/`b`/`c` or `PvP`/`SimpleAI`/`AdaptiveAI`
/// * `win_threshold` - Wins needed to take the match
#[wasm_bindgen]
pub fn start_match(mode_key: &str, win_threshold: u32) -> Result<String, JsError> {
    let mut session = MatchSession::new();
    session
        .start_with_config(mode_key, &MatchConfig::first_to(win_threshold))
        .map_err(|e| JsError::new(&e.to_string()))?;

    let state = session
        .snapshot()
        .ok_or_else(|| JsError::new("Match did not start"))?;
    state
        .to_json()
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayedRoundResult {
    state: MatchState,
    report: RoundReport,
}

/// Play one round against a stored snapshot
///
/// Returns `{state, report}`; `state` is the snapshot to keep for the next call.
#[wasm_bindgen]
pub fn play_round(
    state_json: &str,
    first_move: &str,
    second_move: Option<String>,
) -> Result<JsValue, JsError> {
    let mut session = MatchSession::restore(parse_state(state_json)?)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let report = session
        .submit_round(first_move, second_move.as_deref())
        .map_err(|e| JsError::new(&e.to_string()))?;
    let state = session
        .snapshot()
        .ok_or_else(|| JsError::new("Match state lost"))?;

    serde_wasm_bindgen::to_value(&PlayedRoundResult { state, report })
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct StateSummary {
    mode: String,
    score: String,
    round_number: u32,
    game_over: bool,
    verdict: Option<String>,
}

/// Human-readable summary of a snapshot
#[wasm_bindgen]
pub fn describe_state(state_json: &str) -> Result<JsValue, JsError> {
    let state = parse_state(state_json)?;
    let summary = StateSummary {
        mode: state.variant_kind.label().to_string(),
        score: state.score.to_string(),
        round_number: state.round_number,
        game_over: state.game_over,
        verdict: state.game_over.then(|| state.verdict().describe().to_string()),
    };

    serde_wasm_bindgen::to_value(&summary)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct VariantInfo {
    id: String,
    key: String,
    label: String,
}

/// All playable variants
#[wasm_bindgen]
pub fn get_variant_types() -> Result<JsValue, JsError> {
    let types: Vec<VariantInfo> = VariantKind::ALL
        .iter()
        .map(|kind| VariantInfo {
            id: kind.name().to_string(),
            key: kind.mode_key().to_string(),
            label: kind.label().to_string(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Check a move code before submitting it
#[wasm_bindgen]
pub fn is_valid_move_code(code: &str) -> bool {
    is_valid_move(code)
}
