//! WASM bindings for frontend outcome and leaderboard display

#![cfg(feature = "wasm")]

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use crate::{rank, resolve, win_rate_bps, Move, Profile};

fn parse_move(index: u8) -> Result<Move, JsError> {
    Move::from_index(index)
        .ok_or_else(|| JsError::new(&format!("Invalid move {} (0 = Rock, 1 = Paper, 2 = Scissors)", index)))
}

/// Resolve a match from the player's point of view
///
/// Returns "Win", "Lose" or "Tie".
#[wasm_bindgen]
pub fn resolve_moves(player_move: u8, opponent_move: u8) -> Result<String, JsError> {
    let outcome = resolve(parse_move(player_move)?, parse_move(opponent_move)?);
    Ok(format!("{:?}", outcome))
}

/// Win rate in basis points (10000 = 100%), floor division
#[wasm_bindgen]
pub fn get_win_rate_bps(wins: u64, total_matches: u64) -> u64 {
    win_rate_bps(wins, total_matches)
}

/// Profile snapshot as fetched from chain by a client
#[derive(Deserialize)]
struct ProfileSnapshot {
    identity: String,
    name: String,
    wins: u64,
    best_streak: u64,
    #[serde(default = "registered")]
    exists: bool,
}

fn registered() -> bool {
    true
}

/// Rank profile snapshots with the on-chain rules
///
/// # Arguments
/// * `profiles_json` - JSON array of `{identity, name, wins, best_streak, exists?}`
///   in registration order
///
/// # Returns
/// Array of `{identity, name, wins, best_streak}`, best first
#[wasm_bindgen]
pub fn rank_profiles(profiles_json: &str) -> Result<JsValue, JsError> {
    let snapshots: Vec<ProfileSnapshot> = serde_json::from_str(profiles_json)
        .map_err(|e| JsError::new(&format!("Invalid profiles: {}", e)))?;

    let profiles: Vec<(String, Profile)> = snapshots
        .into_iter()
        .map(|s| {
            let profile = Profile {
                name: s.name,
                wins: s.wins,
                best_streak: s.best_streak,
                exists: s.exists,
                ..Profile::default()
            };
            (s.identity, profile)
        })
        .collect();

    let ranking = rank(profiles.iter().map(|(id, p)| (id, p)));

    serde_wasm_bindgen::to_value(&ranking)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct MoveInfo {
    index: u8,
    name: String,
    beats: String,
}

/// Get all move kinds with the move each one defeats
#[wasm_bindgen]
pub fn get_move_types() -> Result<JsValue, JsError> {
    let types: Vec<MoveInfo> = Move::ALL
        .iter()
        .map(|m| MoveInfo {
            index: m.index(),
            name: m.name().to_string(),
            beats: m.beats().name().to_string(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
