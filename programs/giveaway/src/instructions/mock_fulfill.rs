use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::ErrorCode,
    events::WinnerDrawn,
    instructions::fulfill_randomness::{settle, verify_correlation},
    state::{Config, EntryLedger, GiveawayBucket, RandomnessRequest},
};

#[derive(Accounts)]
pub struct MockFulfill<'info> {
    /// Admin-only: test fulfillment without the VRF oracle.
    #[account(constraint = admin.key() == config.admin @ ErrorCode::Unauthorized)]
    pub admin: Signer<'info>,

    #[account(seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub request: Account<'info, RandomnessRequest>,

    #[account(mut)]
    pub bucket: Account<'info, GiveawayBucket>,

    #[account(seeds = [SEED_ENTRIES], bump)]
    pub entry_ledger: AccountLoader<'info, EntryLedger>,
}

pub fn handler(ctx: Context<MockFulfill>, randomness: [u8; 32]) -> Result<()> {
    verify_correlation(
        &ctx.accounts.request,
        ctx.accounts.request.key(),
        &ctx.accounts.bucket,
        ctx.accounts.bucket.key(),
    )?;

    let now = Clock::get()?.unix_timestamp;
    let ledger = ctx.accounts.entry_ledger.load()?;
    let (winner, drawn_index) = settle(
        &mut ctx.accounts.bucket,
        &mut ctx.accounts.request,
        &ledger,
        randomness,
        now,
    )?;

    emit!(WinnerDrawn {
        bucket_index: ctx.accounts.bucket.bucket_index,
        winner,
        winner_index: drawn_index,
        request_id: ctx.accounts.request.request_id,
    });

    Ok(())
}
