//! Player instructions

use anchor_lang::prelude::*;
use rps_logic::{move_from_digest, resolve, Entropy, MatchRecord, Move, Profile};
use crate::error::RpsError;
use crate::events::{BestStreakBeaten, MatchPlayed, PerfectStreak, ProfileCreated, StatsReset};
use crate::state::{PlayResult, PlayerProfile, Registry};

/// Register a profile for the signing wallet
#[derive(Accounts)]
pub struct CreateProfile<'info> {
    #[account(
        mut,
        seeds = [Registry::SEED],
        bump = registry.bump,
        realloc = Registry::space(registry.players.len() + 1),
        realloc::payer = player,
        realloc::zero = false
    )]
    pub registry: Account<'info, Registry>,

    /// init_if_needed so a second registration reports AlreadyRegistered
    #[account(
        init_if_needed,
        payer = player,
        space = PlayerProfile::LEN,
        seeds = [PlayerProfile::SEED, player.key().as_ref()],
        bump
    )]
    pub profile: Account<'info, PlayerProfile>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn create_profile(ctx: Context<CreateProfile>, name: String) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let profile = &mut ctx.accounts.profile;
    let player = &ctx.accounts.player;

    require!(!profile.exists, RpsError::AlreadyRegistered);
    let fresh = Profile::new(&name).map_err(RpsError::from)?;

    let clock = Clock::get()?;

    profile.authority = player.key();
    profile.registration_index = registry.players.len() as u32;
    profile.created_at = clock.unix_timestamp;
    profile.bump = ctx.bumps.profile;
    profile.apply(&fresh);

    registry.players.push(player.key());

    emit!(ProfileCreated {
        player: player.key(),
        name: name.clone(),
    });

    msg!(
        "Player {} registered as {} at index {}",
        player.key(),
        name,
        profile.registration_index,
    );

    Ok(())
}

/// Play one match against the pseudo-random opponent
#[derive(Accounts)]
pub struct Play<'info> {
    #[account(
        mut,
        seeds = [Registry::SEED],
        bump = registry.bump
    )]
    pub registry: Account<'info, Registry>,

    /// CHECK: Profile PDA of the signer; may be uninitialized, which reports NotRegistered
    #[account(
        mut,
        seeds = [PlayerProfile::SEED, player.key().as_ref()],
        bump
    )]
    pub profile: UncheckedAccount<'info>,

    pub player: Signer<'info>,

    /// CHECK: SlotHashes sysvar for entropy
    #[account(address = anchor_lang::solana_program::sysvar::slot_hashes::ID)]
    pub slot_hashes: AccountInfo<'info>,
}

pub fn play(ctx: Context<Play>, choice: u8) -> Result<PlayResult> {
    let player_move = Move::from_index(choice).ok_or(RpsError::InvalidMove)?;
    let mut account = load_profile(&ctx.accounts.profile)?
        .filter(|p| p.exists)
        .ok_or(RpsError::NotRegistered)?;

    let registry = &mut ctx.accounts.registry;
    let player = ctx.accounts.player.key();
    let clock = Clock::get()?;

    // Not cryptographically unpredictable: every input is public or
    // influenced by whoever produces the block.
    let entropy = Entropy {
        nonce: registry.nonce,
        identity: player.to_bytes(),
        timestamp: clock.unix_timestamp,
        slot: clock.slot,
        recent_hash: latest_slot_hash(&ctx.accounts.slot_hashes)?,
    };
    let opponent_move = opponent_move_for(&entropy);
    registry.nonce = registry.nonce.checked_add(1).ok_or(RpsError::Overflow)?;

    let outcome = resolve(player_move, opponent_move);
    let mut profile = account.to_logic();
    let update = profile
        .record_match(MatchRecord {
            player_move,
            opponent_move,
            outcome,
        })
        .map_err(RpsError::from)?;
    account.apply(&profile);
    store_profile(&account, &ctx.accounts.profile)?;

    emit!(MatchPlayed {
        player,
        player_move: player_move.into(),
        opponent_move: opponent_move.into(),
        outcome: outcome.into(),
    });
    if update.new_best {
        emit!(BestStreakBeaten {
            player,
            best_streak: update.best_streak,
        });
    }
    if update.perfect_streak {
        emit!(PerfectStreak {
            player,
            streak: update.current_streak,
        });
    }

    msg!(
        "Player {} played {} vs {} -> {:?} (streak {}, nonce {})",
        player,
        player_move.name(),
        opponent_move.name(),
        outcome,
        update.current_streak,
        registry.nonce,
    );

    Ok(PlayResult {
        opponent_move: opponent_move.into(),
        outcome: outcome.into(),
        current_streak: update.current_streak,
    })
}

/// Reset the signer's counters and history; name is kept
#[derive(Accounts)]
pub struct ResetStats<'info> {
    /// CHECK: Profile PDA of the signer; may be uninitialized, which reports NotRegistered
    #[account(
        mut,
        seeds = [PlayerProfile::SEED, player.key().as_ref()],
        bump
    )]
    pub profile: UncheckedAccount<'info>,

    pub player: Signer<'info>,
}

pub fn reset_stats(ctx: Context<ResetStats>) -> Result<()> {
    let mut account = load_profile(&ctx.accounts.profile)?.ok_or(RpsError::NotRegistered)?;
    let player = ctx.accounts.player.key();

    let mut profile = account.to_logic();
    profile.reset().map_err(RpsError::from)?;
    account.apply(&profile);
    store_profile(&account, &ctx.accounts.profile)?;

    emit!(StatsReset { player });

    msg!("Player {} reset stats", player);

    Ok(())
}

/// sha256 over the entropy preimage, reduced modulo 3
pub(crate) fn opponent_move_for(entropy: &Entropy) -> Move {
    let digest = solana_sha256_hasher::hash(&entropy.preimage());
    move_from_digest(&digest.to_bytes())
}

/// Most recent hash in the SlotHashes sysvar
fn latest_slot_hash(slot_hashes: &AccountInfo) -> Result<[u8; 32]> {
    let data = slot_hashes.try_borrow_data()?;
    parse_latest_slot_hash(&data)
}

/// Layout: u64 entry count, then (u64 slot, [u8; 32] hash) newest first
fn parse_latest_slot_hash(data: &[u8]) -> Result<[u8; 32]> {
    require!(data.len() >= 48, RpsError::SlotHashUnavailable);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&data[16..48]);
    Ok(hash)
}

/// Deserialize a profile PDA; `None` when it was never initialized
pub(crate) fn load_profile(info: &AccountInfo) -> Result<Option<PlayerProfile>> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    PlayerProfile::try_deserialize(&mut &data[..])
        .map(Some)
        .map_err(|_| RpsError::InvalidProfileAccount.into())
}

fn store_profile(profile: &PlayerProfile, info: &AccountInfo) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer = &mut data[..];
    profile
        .try_serialize(&mut writer)
        .map_err(|_| RpsError::InvalidProfileAccount.into())
}
