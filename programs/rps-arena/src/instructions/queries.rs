//! Read-only instructions
//!
//! Results travel back through Anchor return data, which caps a response at
//! 1024 bytes. `get_ranking` therefore stops fitting once the registry holds
//! a few dozen players; clients with larger registries should rank with
//! `rps_logic::rank` over fetched accounts instead.

use anchor_lang::prelude::*;
use rps_logic::{rank, rank_of, Profile};
use crate::error::RpsError;
use crate::state::{ChoiceStats, MatchEntry, PlayerProfile, PlayerStats, RankingEntry, RawProfile, Registry};
use super::player::load_profile;

/// Stats of the signing wallet
#[derive(Accounts)]
pub struct GetStats<'info> {
    /// CHECK: Profile PDA of the signer; may be uninitialized
    #[account(
        seeds = [PlayerProfile::SEED, player.key().as_ref()],
        bump
    )]
    pub profile: UncheckedAccount<'info>,

    pub player: Signer<'info>,
}

pub fn get_stats(ctx: Context<GetStats>) -> Result<PlayerStats> {
    let profile = load_profile(&ctx.accounts.profile)?
        .ok_or(RpsError::NotRegistered)?
        .to_logic();
    let stats = profile.stats().map_err(RpsError::from)?;
    Ok(stats.into())
}

/// Profile PDA of an arbitrary wallet
#[derive(Accounts)]
#[instruction(identity: Pubkey)]
pub struct ProfileView<'info> {
    /// CHECK: Profile PDA of `identity`; may be uninitialized
    #[account(
        seeds = [PlayerProfile::SEED, identity.as_ref()],
        bump
    )]
    pub profile: UncheckedAccount<'info>,
}

fn view(ctx: &Context<ProfileView>) -> Result<Option<PlayerProfile>> {
    Ok(load_profile(&ctx.accounts.profile)?.filter(|p| p.exists))
}

pub fn get_player_stats(ctx: Context<ProfileView>, _identity: Pubkey) -> Result<PlayerStats> {
    let account = view(&ctx)?.ok_or(RpsError::UnknownIdentity)?;
    let stats = account.to_logic().stats().map_err(RpsError::from)?;
    Ok(stats.into())
}

pub fn get_profile_raw(ctx: Context<ProfileView>, _identity: Pubkey) -> Result<RawProfile> {
    Ok(view(&ctx)?
        .map(|account| RawProfile::from(&account))
        .unwrap_or_default())
}

pub fn get_history(ctx: Context<ProfileView>, _identity: Pubkey, count: u8) -> Result<Vec<MatchEntry>> {
    let history = match view(&ctx)? {
        Some(account) => account.to_logic().history,
        None => Default::default(),
    };
    let records = history.recent(count).map_err(RpsError::from)?;
    Ok(records.into_iter().map(MatchEntry::from).collect())
}

pub fn get_count(ctx: Context<ProfileView>, _identity: Pubkey) -> Result<u8> {
    Ok(view(&ctx)?.map_or(0, |account| account.match_count()))
}

pub fn get_choice_stats(ctx: Context<ProfileView>, _identity: Pubkey) -> Result<ChoiceStats> {
    let account = view(&ctx)?.ok_or(RpsError::NotRegistered)?;
    Ok(ChoiceStats {
        played: account.played_per_move,
        won: account.won_per_move,
    })
}

/// Leaderboard over every registered profile
#[derive(Accounts)]
pub struct RankingView<'info> {
    #[account(
        seeds = [Registry::SEED],
        bump = registry.bump
    )]
    pub registry: Account<'info, Registry>,
    // Profile accounts passed via remaining_accounts, in registry order
}

pub fn get_ranking<'info>(
    ctx: Context<'_, '_, '_, 'info, RankingView<'info>>,
) -> Result<Vec<RankingEntry>> {
    let profiles = load_ranked_profiles(&ctx.accounts.registry, ctx.remaining_accounts)?;
    let ranking = rank(profiles.iter().map(|(key, profile)| (key, profile)));
    Ok(ranking.into_iter().map(RankingEntry::from).collect())
}

pub fn get_rank<'info>(
    ctx: Context<'_, '_, '_, 'info, RankingView<'info>>,
    identity: Pubkey,
) -> Result<u32> {
    let profiles = load_ranked_profiles(&ctx.accounts.registry, ctx.remaining_accounts)?;
    let ranking = rank(profiles.iter().map(|(key, profile)| (key, profile)));
    let position = rank_of(&ranking, &identity).ok_or(RpsError::NotRegistered)?;
    Ok(position)
}

/// Pair every registry key with its profile PDA from remaining_accounts
fn load_ranked_profiles(
    registry: &Registry,
    remaining_accounts: &[AccountInfo],
) -> Result<Vec<(Pubkey, Profile)>> {
    require!(
        remaining_accounts.len() == registry.players.len(),
        RpsError::InvalidProfileAccount
    );

    let mut profiles = Vec::with_capacity(registry.players.len());
    for (player, info) in registry.players.iter().zip(remaining_accounts) {
        let account = load_profile(info)?.ok_or(RpsError::InvalidProfileAccount)?;
        require_keys_eq!(account.authority, *player, RpsError::InvalidProfileAccount);

        let expected = Pubkey::create_program_address(
            &[PlayerProfile::SEED, player.as_ref(), &[account.bump]],
            &crate::ID,
        )
        .map_err(|_| RpsError::InvalidProfileAccount)?;
        require_keys_eq!(info.key(), expected, RpsError::InvalidProfileAccount);

        profiles.push((*player, account.to_logic()));
    }

    Ok(profiles)
}
