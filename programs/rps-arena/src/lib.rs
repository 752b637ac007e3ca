//! RPS Arena - Rock/Paper/Scissors player profiles on Solana
//!
//! Each wallet registers a named profile, then plays single matches against a
//! pseudo-random opponent. The program keeps win/loss/tie counters, streaks,
//! per-move statistics and a ring buffer of the last ten matches, and exposes
//! read-only views including a leaderboard over every registered player.

use anchor_lang::prelude::*;

mod state;
mod instructions;
mod error;
mod events;

use instructions::*;
pub use error::RpsError;
pub use state::{ChoiceStats, MatchEntry, MatchOutcome, MoveKind, PlayResult, PlayerStats, RankingEntry, RawProfile};

declare_id!("7qATzGvB1eaoiR4gSjs6opdQJDxjgYY6VQKoGTu4bKR5");

#[program]
pub mod rps_arena {
    use super::*;

    /// Create the global registry (one-time setup)
    pub fn initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
        instructions::admin::initialize_registry(ctx)
    }

    /// Register a profile for the signer
    pub fn create_profile(ctx: Context<CreateProfile>, name: String) -> Result<()> {
        instructions::player::create_profile(ctx, name)
    }

    /// Play one match (0 = Rock, 1 = Paper, 2 = Scissors)
    pub fn play(ctx: Context<Play>, choice: u8) -> Result<PlayResult> {
        instructions::player::play(ctx, choice)
    }

    /// Zero the signer's counters, streaks and history
    pub fn reset_stats(ctx: Context<ResetStats>) -> Result<()> {
        instructions::player::reset_stats(ctx)
    }

    pub fn get_stats(ctx: Context<GetStats>) -> Result<PlayerStats> {
        instructions::queries::get_stats(ctx)
    }

    pub fn get_player_stats(ctx: Context<ProfileView>, identity: Pubkey) -> Result<PlayerStats> {
        instructions::queries::get_player_stats(ctx, identity)
    }

    /// Stored fields, or an empty profile for an unknown wallet
    pub fn get_profile_raw(ctx: Context<ProfileView>, identity: Pubkey) -> Result<RawProfile> {
        instructions::queries::get_profile_raw(ctx, identity)
    }

    /// Up to `count` most recent matches, newest first
    pub fn get_history(
        ctx: Context<ProfileView>,
        identity: Pubkey,
        count: u8,
    ) -> Result<Vec<MatchEntry>> {
        instructions::queries::get_history(ctx, identity, count)
    }

    pub fn get_count(ctx: Context<ProfileView>, identity: Pubkey) -> Result<u8> {
        instructions::queries::get_count(ctx, identity)
    }

    pub fn get_choice_stats(ctx: Context<ProfileView>, identity: Pubkey) -> Result<ChoiceStats> {
        instructions::queries::get_choice_stats(ctx, identity)
    }

    /// Leaderboard; pass every profile PDA as remaining accounts in registry order
    pub fn get_ranking<'info>(
        ctx: Context<'_, '_, '_, 'info, RankingView<'info>>,
    ) -> Result<Vec<RankingEntry>> {
        instructions::queries::get_ranking(ctx)
    }

    /// 1-based leaderboard position of `identity`
    pub fn get_rank<'info>(
        ctx: Context<'_, '_, '_, 'info, RankingView<'info>>,
        identity: Pubkey,
    ) -> Result<u32> {
        instructions::queries::get_rank(ctx, identity)
    }
}
