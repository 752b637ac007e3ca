use anchor_lang::prelude::*;

use crate::state::{MatchOutcome, MoveKind};

#[event]
pub struct ProfileCreated {
    pub player: Pubkey,
    pub name: String,
}

#[event]
pub struct MatchPlayed {
    pub player: Pubkey,
    pub player_move: MoveKind,
    pub opponent_move: MoveKind,
    pub outcome: MatchOutcome,
}

/// A win raised the player's best streak
#[event]
pub struct BestStreakBeaten {
    pub player: Pubkey,
    pub best_streak: u64,
}

/// Consecutive wins reached a multiple of 10
#[event]
pub struct PerfectStreak {
    pub player: Pubkey,
    pub streak: u64,
}

#[event]
pub struct StatsReset {
    pub player: Pubkey,
}
