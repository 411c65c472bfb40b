use anchor_lang::prelude::*;

use crate::{constants::SEED_CFG, errors::ErrorCode, events::AdminTransferred, state::Config};

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CFG],
        bump = config.bump,
        has_one = admin @ ErrorCode::Unauthorized,
    )]
    pub config: Account<'info, Config>,
}

/// Rotates the single administrator key. Every gated instruction checks
/// `config.admin` at call time, so the handoff takes effect immediately;
/// outstanding randomness requests are unaffected.
pub fn handler(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
    let old_admin = ctx.accounts.config.rotate_admin(new_admin)?;

    emit!(AdminTransferred {
        old_admin,
        new_admin,
    });

    Ok(())
}
