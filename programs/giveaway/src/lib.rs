use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod state;
pub mod utils;
pub mod instructions;

use instructions::*;

declare_id!("GvAwy7rM2cqLkXeVd4t1N8sfUuJbW3yEDpTqRhKzS9aB");

#[program]
pub mod giveaway {
    use super::*;

    /// One-time setup: config (admin key, request-id counter) and the entry
    /// ledger singleton.
    pub fn init_config(ctx: Context<InitConfig>) -> Result<()> {
        init_config::handler(ctx)
    }

    pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
        transfer_admin::handler(ctx, new_admin)
    }

    /// Append identities to the entry pool in order. No deduplication.
    pub fn append_entries(ctx: Context<AppendEntries>, identities: Vec<Pubkey>) -> Result<()> {
        append_entries::handler(ctx, identities)
    }

    /// Overwrite existing entry slots pairwise, for corrections.
    pub fn replace_entries(
        ctx: Context<ReplaceEntries>,
        indices: Vec<u32>,
        identities: Vec<Pubkey>,
    ) -> Result<()> {
        replace_entries::handler(ctx, indices, identities)
    }

    /// Create a bucket over `[min_index, max_index]` of the entry ledger and
    /// request one random value for it. The bucket stays pending until the
    /// oracle calls back.
    pub fn create_bucket(
        ctx: Context<CreateBucket>,
        bucket_index: u64,
        amount: u64,
        min_index: u32,
        max_index: u32,
    ) -> Result<()> {
        create_bucket::handler(ctx, bucket_index, amount, min_index, max_index)
    }

    /// VRF callback: resolves the winner for the bucket correlated to the
    /// delivered request. Gated by the oracle's identity signature, not admin.
    pub fn fulfill_randomness(
        ctx: Context<FulfillRandomness>,
        randomness: [u8; 32],
    ) -> Result<()> {
        fulfill_randomness::handler(ctx, randomness)
    }

    /// Admin-only test fulfillment (bypasses VRF oracle). Only available with
    /// `devnet` feature.
    #[cfg(feature = "devnet")]
    pub fn mock_fulfill(ctx: Context<MockFulfill>, randomness: [u8; 32]) -> Result<()> {
        mock_fulfill::handler(ctx, randomness)
    }
}
