use anchor_lang::prelude::*;
use anchor_lang::Discriminator;
use ephemeral_vrf_sdk::instructions::{create_request_randomness_ix, RequestRandomnessParams};
use ephemeral_vrf_sdk::types::SerializableAccountMeta;

use crate::{
    constants::*,
    errors::ErrorCode,
    events::BucketCreated,
    state::{Config, EntryLedger, GiveawayBucket, RandomnessRequest},
    utils::checked_add_u64,
};

/// Convert an anchor Pubkey to the SDK's Pubkey (same 32 bytes, different crate).
fn to_sdk_pubkey(p: &Pubkey) -> ephemeral_vrf_sdk::Pubkey {
    ephemeral_vrf_sdk::Pubkey::new_from_array(p.to_bytes())
}

// MagicBlock VRF program constants
const VRF_PROGRAM_ID_BYTES: [u8; 32] = ephemeral_vrf_sdk::consts::VRF_PROGRAM_ID.to_bytes();
const DEFAULT_QUEUE_BYTES: [u8; 32] = ephemeral_vrf_sdk::consts::DEFAULT_QUEUE.to_bytes();

pub static VRF_PROGRAM_ID: Pubkey = Pubkey::new_from_array(VRF_PROGRAM_ID_BYTES);
pub static DEFAULT_QUEUE: Pubkey = Pubkey::new_from_array(DEFAULT_QUEUE_BYTES);

#[derive(Accounts)]
#[instruction(bucket_index: u64)]
pub struct CreateBucket<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(constraint = admin.key() == config.admin @ ErrorCode::Unauthorized)]
    pub admin: Signer<'info>,

    #[account(mut, seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(seeds = [SEED_ENTRIES], bump)]
    pub entry_ledger: AccountLoader<'info, EntryLedger>,

    /// `init_if_needed` so reuse of a bucket index surfaces as the
    /// `request_id != 0` sentinel check below rather than an opaque
    /// account-allocation failure.
    #[account(
        init_if_needed,
        payer = payer,
        space = GiveawayBucket::SPACE,
        seeds = [SEED_BUCKET, &bucket_index.to_le_bytes()],
        bump
    )]
    pub bucket: Account<'info, GiveawayBucket>,

    /// Correlation entry, created atomically with the bucket. Seeded by the
    /// id this request is about to take from `config.next_request_id`.
    #[account(
        init,
        payer = payer,
        space = RandomnessRequest::SPACE,
        seeds = [SEED_REQUEST, &config.next_request_id.to_le_bytes()],
        bump
    )]
    pub request: Account<'info, RandomnessRequest>,

    /// CHECK: Our program's identity PDA, used to sign the VRF CPI.
    #[account(seeds = [b"identity"], bump)]
    pub program_identity: AccountInfo<'info>,

    /// CHECK: Oracle queue account
    #[account(mut, address = DEFAULT_QUEUE)]
    pub oracle_queue: AccountInfo<'info>,

    /// CHECK: MagicBlock VRF program
    #[account(address = VRF_PROGRAM_ID)]
    pub vrf_program: AccountInfo<'info>,

    /// CHECK: SlotHashes sysvar
    #[account(address = anchor_lang::solana_program::sysvar::slot_hashes::ID)]
    pub slot_hashes: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreateBucket>,
    bucket_index: u64,
    amount: u64,
    min_index: u32,
    max_index: u32,
) -> Result<()> {
    let request_key = ctx.accounts.request.key();
    let bucket_key = ctx.accounts.bucket.key();
    let ledger_key = ctx.accounts.entry_ledger.key();

    {
        let ledger = ctx.accounts.entry_ledger.load()?;
        validate_creation(&ctx.accounts.bucket, &ledger, min_index, max_index)?;
    }

    let request_id = ctx.accounts.config.next_request_id;
    ctx.accounts.config.next_request_id = checked_add_u64(request_id, 1)?;

    // Build a 32-byte caller seed from the request id for uniqueness
    let mut caller_seed = [0u8; 32];
    caller_seed[..8].copy_from_slice(&request_id.to_le_bytes());

    // Build the VRF request instruction using the SDK (with type conversion)
    let sdk_ix = create_request_randomness_ix(RequestRandomnessParams {
        payer: to_sdk_pubkey(&ctx.accounts.payer.key()),
        oracle_queue: to_sdk_pubkey(&ctx.accounts.oracle_queue.key()),
        callback_program_id: to_sdk_pubkey(&crate::ID),
        callback_discriminator: crate::instruction::FulfillRandomness::DISCRIMINATOR.to_vec(),
        caller_seed,
        accounts_metas: Some(vec![
            SerializableAccountMeta {
                pubkey: to_sdk_pubkey(&request_key),
                is_signer: false,
                is_writable: true,
            },
            SerializableAccountMeta {
                pubkey: to_sdk_pubkey(&bucket_key),
                is_signer: false,
                is_writable: true,
            },
            SerializableAccountMeta {
                pubkey: to_sdk_pubkey(&ledger_key),
                is_signer: false,
                is_writable: false,
            },
        ]),
        ..Default::default()
    });

    // Manually convert the SDK instruction to anchor's solana_program types.
    let ix = {
        let program_id = Pubkey::new_from_array(sdk_ix.program_id.to_bytes());
        let accounts: Vec<anchor_lang::solana_program::instruction::AccountMeta> = sdk_ix
            .accounts
            .iter()
            .map(|a| {
                let pubkey = Pubkey::new_from_array(a.pubkey.to_bytes());
                if a.is_writable {
                    anchor_lang::solana_program::instruction::AccountMeta::new(pubkey, a.is_signer)
                } else {
                    anchor_lang::solana_program::instruction::AccountMeta::new_readonly(
                        pubkey, a.is_signer,
                    )
                }
            })
            .collect();
        anchor_lang::solana_program::instruction::Instruction {
            program_id,
            accounts,
            data: sdk_ix.data,
        }
    };

    // Find identity PDA bump
    let (_, identity_bump) = Pubkey::find_program_address(&[b"identity"], &crate::ID);

    // CPI into VRF program, signing with our program's identity PDA
    anchor_lang::solana_program::program::invoke_signed(
        &ix,
        &[
            ctx.accounts.payer.to_account_info(),
            ctx.accounts.program_identity.to_account_info(),
            ctx.accounts.oracle_queue.to_account_info(),
            ctx.accounts.slot_hashes.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
        &[&[b"identity", &[identity_bump]]],
    )?;

    // Register the correlation and store the pending bucket after the CPI
    let request = &mut ctx.accounts.request;
    request.request_id = request_id;
    request.bucket_index = bucket_index;
    request.consumed = false;
    request.bump = ctx.bumps.request;

    let bucket = &mut ctx.accounts.bucket;
    bucket.bucket_index = bucket_index;
    bucket.min_index = min_index;
    bucket.max_index = max_index;
    bucket.amount = amount;
    bucket.claimed = false;
    bucket.request_id = request_id;
    bucket.bump = ctx.bumps.bucket;
    // winner zeroed, draw_ts=0, randomness zeroed — bucket stays pending

    emit!(BucketCreated {
        bucket_index,
        request_id,
        min_index,
        max_index,
        amount,
    });

    Ok(())
}

/// Creation-path validations, checked before any state is written or the
/// randomness request goes out. A bucket index is used iff its request id is
/// non-zero; an empty ledger is rejected outright instead of letting
/// `len - 1` wrap around.
pub(crate) fn validate_creation(
    bucket: &GiveawayBucket,
    ledger: &EntryLedger,
    min_index: u32,
    max_index: u32,
) -> Result<()> {
    require!(!bucket.is_used(), ErrorCode::IndexAlreadyUsed);
    require!(ledger.len() > 0, ErrorCode::InvalidIndex);
    require!(min_index <= max_index, ErrorCode::InvalidIndex);
    require!(max_index < ledger.len(), ErrorCode::InvalidIndex);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::Zeroable;

    fn ledger_of(count: u8) -> EntryLedger {
        let mut ledger = EntryLedger::zeroed();
        let identities: Vec<Pubkey> = (1..=count)
            .map(|byte| Pubkey::new_from_array([byte; 32]))
            .collect();
        ledger.append(&identities).unwrap();
        ledger
    }

    #[test]
    fn accepts_any_range_inside_the_ledger() {
        let ledger = ledger_of(5);
        let bucket = GiveawayBucket::default();
        for (min_index, max_index) in [(0u32, 4u32), (0, 0), (4, 4), (1, 3)] {
            validate_creation(&bucket, &ledger, min_index, max_index).unwrap();
        }
    }

    #[test]
    fn rejects_a_used_bucket_index() {
        let ledger = ledger_of(5);
        let bucket = GiveawayBucket {
            request_id: 1,
            ..Default::default()
        };
        assert_eq!(
            validate_creation(&bucket, &ledger, 0, 4).unwrap_err(),
            ErrorCode::IndexAlreadyUsed.into()
        );
    }

    #[test]
    fn rejects_an_empty_ledger() {
        let ledger = EntryLedger::zeroed();
        let bucket = GiveawayBucket::default();
        assert_eq!(
            validate_creation(&bucket, &ledger, 0, 0).unwrap_err(),
            ErrorCode::InvalidIndex.into()
        );
    }

    #[test]
    fn rejects_an_inverted_range() {
        let ledger = ledger_of(5);
        let bucket = GiveawayBucket::default();
        assert_eq!(
            validate_creation(&bucket, &ledger, 3, 2).unwrap_err(),
            ErrorCode::InvalidIndex.into()
        );
    }

    #[test]
    fn rejects_a_range_past_the_ledger_end() {
        let ledger = ledger_of(5);
        let bucket = GiveawayBucket::default();
        assert_eq!(
            validate_creation(&bucket, &ledger, 0, 5).unwrap_err(),
            ErrorCode::InvalidIndex.into()
        );
    }
}
