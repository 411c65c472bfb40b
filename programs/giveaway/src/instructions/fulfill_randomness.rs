use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::ErrorCode,
    events::WinnerDrawn,
    state::{EntryLedger, GiveawayBucket, RandomnessRequest},
    utils::winner_index,
};

/// MagicBlock VRF program identity PDA — only the VRF program can sign as this address.
const VRF_PROGRAM_IDENTITY_BYTES: [u8; 32] =
    ephemeral_vrf_sdk::consts::VRF_PROGRAM_IDENTITY.to_bytes();
pub static VRF_PROGRAM_IDENTITY: Pubkey = Pubkey::new_from_array(VRF_PROGRAM_IDENTITY_BYTES);

#[derive(Accounts)]
pub struct FulfillRandomness<'info> {
    /// VRF program identity PDA — only the VRF program can produce this signature.
    #[account(address = VRF_PROGRAM_IDENTITY)]
    pub vrf_program_identity: Signer<'info>,

    /// No seeds constraint — request_id not available from VRF callback args.
    /// PDA verified manually in handler.
    #[account(mut)]
    pub request: Account<'info, RandomnessRequest>,

    /// No seeds constraint — bucket_index comes from the correlation entry.
    /// PDA verified manually in handler.
    #[account(mut)]
    pub bucket: Account<'info, GiveawayBucket>,

    #[account(seeds = [SEED_ENTRIES], bump)]
    pub entry_ledger: AccountLoader<'info, EntryLedger>,
}

pub fn handler(ctx: Context<FulfillRandomness>, randomness: [u8; 32]) -> Result<()> {
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

/// Re-derives the request and bucket PDAs from their stored ids. A request
/// account that does not match its own seeds is treated as an unknown request
/// and rejected — unrecognized request ids never resolve to a default bucket.
pub(crate) fn verify_correlation(
    request: &RandomnessRequest,
    request_key: Pubkey,
    bucket: &GiveawayBucket,
    bucket_key: Pubkey,
) -> Result<()> {
    let expected_request = Pubkey::create_program_address(
        &[
            SEED_REQUEST,
            &request.request_id.to_le_bytes(),
            &[request.bump],
        ],
        &crate::ID,
    )
    .map_err(|_| ErrorCode::UnknownRequest)?;
    require!(request_key == expected_request, ErrorCode::UnknownRequest);

    let expected_bucket = Pubkey::create_program_address(
        &[
            SEED_BUCKET,
            &request.bucket_index.to_le_bytes(),
            &[bucket.bump],
        ],
        &crate::ID,
    )
    .map_err(|_| ErrorCode::RequestBucketMismatch)?;
    require!(bucket_key == expected_bucket, ErrorCode::RequestBucketMismatch);

    Ok(())
}

/// Reduces the random value onto the bucket's index range and finalizes the
/// draw. Shared by the VRF callback and the devnet mock path.
///
/// The correlation entry is consumed here; a second delivery for the same
/// request id fails regardless of the oracle's own at-most-once guarantee.
pub(crate) fn settle(
    bucket: &mut GiveawayBucket,
    request: &mut RandomnessRequest,
    ledger: &EntryLedger,
    randomness: [u8; 32],
    now: i64,
) -> Result<(Pubkey, u32)> {
    require!(request.request_id != 0, ErrorCode::UnknownRequest);
    require!(!request.consumed, ErrorCode::RequestAlreadyFulfilled);
    require!(
        bucket.request_id == request.request_id && bucket.bucket_index == request.bucket_index,
        ErrorCode::RequestBucketMismatch
    );
    require!(!bucket.is_drawn(), ErrorCode::AlreadyDrawn);

    let drawn_index = winner_index(bucket.min_index, bucket.max_index, &randomness)?;
    let winner = ledger.get(drawn_index)?;

    bucket.randomness = randomness;
    bucket.winner = winner.to_bytes();
    bucket.draw_ts = now;
    request.consumed = true;

    Ok((winner, drawn_index))
}
