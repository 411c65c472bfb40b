use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::ErrorCode,
    events::EntriesReplaced,
    state::{Config, EntryLedger},
};

#[derive(Accounts)]
pub struct ReplaceEntries<'info> {
    #[account(constraint = admin.key() == config.admin @ ErrorCode::Unauthorized)]
    pub admin: Signer<'info>,

    #[account(seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(mut, seeds = [SEED_ENTRIES], bump)]
    pub entry_ledger: AccountLoader<'info, EntryLedger>,
}

/// Overwrites ledger slots in place for correction purposes.
///
/// Caution: a slot inside the range of a pending, undrawn bucket may be
/// overwritten here, changing who can win after the randomness request was
/// already issued. The program does not lock ranges referenced by pending
/// buckets; this is a documented operational risk of the correction path.
pub fn handler(
    ctx: Context<ReplaceEntries>,
    indices: Vec<u32>,
    identities: Vec<Pubkey>,
) -> Result<()> {
    let mut ledger = ctx.accounts.entry_ledger.load_mut()?;
    ledger.replace(&indices, &identities)?;

    emit!(EntriesReplaced {
        count: indices.len() as u32,
    });

    Ok(())
}
