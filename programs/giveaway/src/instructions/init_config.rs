use anchor_lang::prelude::*;

use crate::{
    constants::*,
    state::{Config, EntryLedger},
};

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = Config::SPACE,
        seeds = [SEED_CFG],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = payer,
        space = EntryLedger::SPACE,
        seeds = [SEED_ENTRIES],
        bump
    )]
    pub entry_ledger: AccountLoader<'info, EntryLedger>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitConfig>) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    cfg.admin = ctx.accounts.admin.key();
    cfg.next_request_id = FIRST_REQUEST_ID;
    cfg.bump = ctx.bumps.config;
    cfg.reserved = [0u8; 32];

    let mut ledger = ctx.accounts.entry_ledger.load_init()?;
    ledger.bump = ctx.bumps.entry_ledger;
    // len=0, entries zeroed — already zeroed by init

    Ok(())
}
