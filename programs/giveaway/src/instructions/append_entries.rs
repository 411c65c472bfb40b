use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::ErrorCode,
    events::EntriesAppended,
    state::{Config, EntryLedger},
};

#[derive(Accounts)]
pub struct AppendEntries<'info> {
    #[account(constraint = admin.key() == config.admin @ ErrorCode::Unauthorized)]
    pub admin: Signer<'info>,

    #[account(seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(mut, seeds = [SEED_ENTRIES], bump)]
    pub entry_ledger: AccountLoader<'info, EntryLedger>,
}

pub fn handler(ctx: Context<AppendEntries>, identities: Vec<Pubkey>) -> Result<()> {
    let mut ledger = ctx.accounts.entry_ledger.load_mut()?;
    ledger.append(&identities)?;

    emit!(EntriesAppended {
        count: identities.len() as u32,
        total: ledger.len(),
    });

    Ok(())
}
