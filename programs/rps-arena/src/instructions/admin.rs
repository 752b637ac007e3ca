//! Admin instructions

use anchor_lang::prelude::*;
use crate::state::Registry;

/// Create the global registry (one-time setup)
#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    /// Starts with base size, grows via realloc as players register
    #[account(
        init,
        payer = payer,
        space = Registry::BASE_SPACE,
        seeds = [Registry::SEED],
        bump
    )]
    pub registry: Account<'info, Registry>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
    let registry = &mut ctx.accounts.registry;

    registry.nonce = 0;
    registry.players = Vec::new();
    registry.bump = ctx.bumps.registry;

    msg!("Registry initialized by {}", ctx.accounts.payer.key());

    Ok(())
}
