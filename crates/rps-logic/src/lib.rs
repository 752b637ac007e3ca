//! Game Logic for RPS Arena
//!
//! Core rules for the single-player Rock/Paper/Scissors ledger.
//! This crate is compiled to:
//! - Native (for the on-chain program and off-chain indexers)
//! - WASM (for frontend ranking and outcome display)

mod arena;
mod error;
mod history;
mod leaderboard;
mod moves;
mod profile;
mod random;

#[cfg(feature = "wasm")]
mod wasm;

pub use arena::{Arena, ArenaEvent, ChainContext, PlayResult};
pub use error::ArenaError;
pub use history::{MatchHistory, MatchRecord};
pub use leaderboard::{rank, rank_of, RankingEntry};
pub use moves::{Move, Outcome};
pub use profile::{validate_name, win_rate_bps, ChoiceStats, PlayerStats, Profile, StreakUpdate};
pub use random::{move_from_digest, Entropy, MixedEntropy, MoveSource, ScriptedMoves, SeededRng};

/// Account key a profile is registered under
pub type Identity = [u8; 32];

/// Most recent matches kept per player
pub const HISTORY_CAPACITY: usize = 10;

/// A `PerfectStreak` milestone is reached at every multiple of this many consecutive wins
pub const PERFECT_STREAK_INTERVAL: u64 = 10;

/// Win rate denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Maximum profile name length in bytes
pub const MAX_NAME_LEN: usize = 32;

/// Outcome of a match from the acting player's point of view.
///
/// Moves are cyclic with period 3: a move beats the one two steps after it,
/// so Rock beats Scissors, Paper beats Rock and Scissors beats Paper.
pub fn resolve(player: Move, opponent: Move) -> Outcome {
    if player == opponent {
        Outcome::Tie
    } else if opponent == player.beats() {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}
