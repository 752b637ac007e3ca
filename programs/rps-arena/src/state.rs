//! Account state definitions

use anchor_lang::prelude::*;
use rps_logic::{MatchHistory, MatchRecord, Move, Outcome, Profile, HISTORY_CAPACITY, MAX_NAME_LEN};

/// Global registry: nonce and registration order
///
/// Grows by one key (realloc) per registered player.
#[account]
#[derive(Default)]
pub struct Registry {
    /// Incremented once per `play`, across all players
    pub nonce: u64,
    /// Player keys in registration order
    pub players: Vec<Pubkey>,
    /// PDA bump seed
    pub bump: u8,
}

impl Registry {
    pub const SEED: &'static [u8] = b"registry";

    /// Space with an empty players vec
    pub const BASE_SPACE: usize = 8 + // discriminator
        8 +   // nonce
        4 +   // players vec len
        1 +   // bump
        16;   // padding

    pub fn space(player_count: usize) -> usize {
        Self::BASE_SPACE + player_count * 32
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MoveKind {
    #[default]
    Rock,
    Paper,
    Scissors,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MatchOutcome {
    Win,
    Lose,
    #[default]
    Tie,
}

impl From<Move> for MoveKind {
    fn from(m: Move) -> Self {
        match m {
            Move::Rock => MoveKind::Rock,
            Move::Paper => MoveKind::Paper,
            Move::Scissors => MoveKind::Scissors,
        }
    }
}

impl From<MoveKind> for Move {
    fn from(m: MoveKind) -> Self {
        match m {
            MoveKind::Rock => Move::Rock,
            MoveKind::Paper => Move::Paper,
            MoveKind::Scissors => Move::Scissors,
        }
    }
}

impl From<Outcome> for MatchOutcome {
    fn from(o: Outcome) -> Self {
        match o {
            Outcome::Win => MatchOutcome::Win,
            Outcome::Lose => MatchOutcome::Lose,
            Outcome::Tie => MatchOutcome::Tie,
        }
    }
}

impl From<MatchOutcome> for Outcome {
    fn from(o: MatchOutcome) -> Self {
        match o {
            MatchOutcome::Win => Outcome::Win,
            MatchOutcome::Lose => Outcome::Lose,
            MatchOutcome::Tie => Outcome::Tie,
        }
    }
}

/// One stored match
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MatchEntry {
    pub player_move: MoveKind,
    pub opponent_move: MoveKind,
    pub outcome: MatchOutcome,
}

impl From<MatchRecord> for MatchEntry {
    fn from(r: MatchRecord) -> Self {
        Self {
            player_move: r.player_move.into(),
            opponent_move: r.opponent_move.into(),
            outcome: r.outcome.into(),
        }
    }
}

impl From<MatchEntry> for MatchRecord {
    fn from(e: MatchEntry) -> Self {
        Self {
            player_move: e.player_move.into(),
            opponent_move: e.opponent_move.into(),
            outcome: e.outcome.into(),
        }
    }
}

/// Player profile, one PDA per wallet
#[account]
#[derive(Default)]
pub struct PlayerProfile {
    /// Wallet that owns this profile
    pub authority: Pubkey,
    /// Display name (max 32 UTF-8 bytes), kept across resets
    pub name: String,
    pub wins: u64,
    pub losses: u64,
    pub ties: u64,
    pub current_streak: u64,
    pub best_streak: u64,
    /// Set on creation, never cleared
    pub exists: bool,
    /// Matches played per move kind (Rock, Paper, Scissors)
    pub played_per_move: [u64; 3],
    /// Matches won per move kind
    pub won_per_move: [u64; 3],
    /// Ring buffer of the last HISTORY_CAPACITY matches
    pub history: [MatchEntry; HISTORY_CAPACITY],
    /// Next slot to write
    pub history_head: u8,
    /// Number of valid slots
    pub history_len: u8,
    /// Position in registry.players
    pub registration_index: u32,
    /// Unix timestamp of profile creation
    pub created_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl PlayerProfile {
    pub const SEED: &'static [u8] = b"profile";

    pub const LEN: usize = 8 + // discriminator
        32 +  // authority
        4 + MAX_NAME_LEN + // name
        8 +   // wins
        8 +   // losses
        8 +   // ties
        8 +   // current_streak
        8 +   // best_streak
        1 +   // exists
        24 +  // played_per_move
        24 +  // won_per_move
        3 * HISTORY_CAPACITY + // history
        1 +   // history_head
        1 +   // history_len
        4 +   // registration_index
        8 +   // created_at
        1 +   // bump
        16;   // padding

    /// Game-logic view of this account
    pub fn to_logic(&self) -> Profile {
        let mut records = [MatchRecord::default(); HISTORY_CAPACITY];
        for (slot, entry) in records.iter_mut().zip(self.history.iter()) {
            *slot = (*entry).into();
        }

        Profile {
            name: self.name.clone(),
            wins: self.wins,
            losses: self.losses,
            ties: self.ties,
            current_streak: self.current_streak,
            best_streak: self.best_streak,
            exists: self.exists,
            choice_stats: rps_logic::ChoiceStats {
                played: self.played_per_move,
                won: self.won_per_move,
            },
            history: MatchHistory::from_raw(records, self.history_head, self.history_len),
        }
    }

    /// Stored history length, clamped the same way `to_logic` reads it
    pub fn match_count(&self) -> u8 {
        self.history_len.min(HISTORY_CAPACITY as u8)
    }

    /// Write game-logic state back; account metadata is left alone
    pub fn apply(&mut self, profile: &Profile) {
        self.name = profile.name.clone();
        self.wins = profile.wins;
        self.losses = profile.losses;
        self.ties = profile.ties;
        self.current_streak = profile.current_streak;
        self.best_streak = profile.best_streak;
        self.exists = profile.exists;
        self.played_per_move = profile.choice_stats.played;
        self.won_per_move = profile.choice_stats.won;

        let (records, head, len) = profile.history.raw();
        for (entry, record) in self.history.iter_mut().zip(records.iter()) {
            *entry = (*record).into();
        }
        self.history_head = head;
        self.history_len = len;
    }
}

// ─────────────────────────────
// Instruction return values
// ─────────────────────────────

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayResult {
    pub opponent_move: MoveKind,
    pub outcome: MatchOutcome,
    pub current_streak: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerStats {
    pub name: String,
    pub wins: u64,
    pub losses: u64,
    pub ties: u64,
    pub total_matches: u64,
    /// 10000 = 100%
    pub win_rate_bps: u64,
    pub current_streak: u64,
    pub best_streak: u64,
}

impl From<rps_logic::PlayerStats> for PlayerStats {
    fn from(s: rps_logic::PlayerStats) -> Self {
        Self {
            name: s.name,
            wins: s.wins,
            losses: s.losses,
            ties: s.ties,
            total_matches: s.total_matches,
            win_rate_bps: s.win_rate_bps,
            current_streak: s.current_streak,
            best_streak: s.best_streak,
        }
    }
}

/// Stored profile fields; `exists == false` for a wallet that never registered
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct RawProfile {
    pub name: String,
    pub wins: u64,
    pub losses: u64,
    pub ties: u64,
    pub current_streak: u64,
    pub best_streak: u64,
    pub exists: bool,
}

impl From<&PlayerProfile> for RawProfile {
    fn from(p: &PlayerProfile) -> Self {
        Self {
            name: p.name.clone(),
            wins: p.wins,
            losses: p.losses,
            ties: p.ties,
            current_streak: p.current_streak,
            best_streak: p.best_streak,
            exists: p.exists,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChoiceStats {
    /// Indexed Rock, Paper, Scissors
    pub played: [u64; 3],
    pub won: [u64; 3],
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RankingEntry {
    pub player: Pubkey,
    pub name: String,
    pub wins: u64,
    pub best_streak: u64,
}

impl From<rps_logic::RankingEntry<Pubkey>> for RankingEntry {
    fn from(e: rps_logic::RankingEntry<Pubkey>) -> Self {
        Self {
            player: e.identity,
            name: e.name,
            wins: e.wins,
            best_streak: e.best_streak,
        }
    }
}
