use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::constants::MAX_ENTRIES;
use crate::errors::ErrorCode;

/// Wrapper for the entries array — bytemuck doesn't impl Pod for arbitrary array sizes.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct EntriesArray {
    pub data: [[u8; 32]; MAX_ENTRIES],
}

unsafe impl Pod for EntriesArray {}
unsafe impl Zeroable for EntriesArray {}

#[cfg(feature = "idl-build")]
impl anchor_lang::IdlBuild for EntriesArray {
    fn create_type() -> Option<anchor_lang::idl::types::IdlTypeDef> {
        use anchor_lang::idl::types::*;
        Some(IdlTypeDef {
            name: "EntriesArray".to_string(),
            docs: vec![],
            serialization: IdlSerialization::Bytemuck,
            repr: Some(IdlRepr::C(IdlReprModifier { packed: false, align: None })),
            generics: vec![],
            ty: IdlTypeDefTy::Struct {
                fields: Some(IdlDefinedFields::Named(vec![IdlField {
                    name: "data".to_string(),
                    docs: vec![],
                    ty: IdlType::Array(
                        Box::new(IdlType::Array(Box::new(IdlType::U8), IdlArrayLen::Value(32))),
                        IdlArrayLen::Value(MAX_ENTRIES),
                    ),
                }])),
            },
        })
    }
    fn insert_types(types: &mut std::collections::BTreeMap<String, anchor_lang::idl::types::IdlTypeDef>) {
        if let Some(ty) = Self::create_type() {
            types.insert("EntriesArray".to_string(), ty);
        }
    }
    fn get_full_path() -> String {
        "EntriesArray".to_string()
    }
}

#[account]
pub struct Config {
    pub admin: Pubkey,
    /// Monotonic counter; the next randomness request gets this id.
    /// Starts at 1 so id 0 stays the "bucket unused" sentinel.
    pub next_request_id: u64,
    pub bump: u8,
    pub reserved: [u8; 32],
}

impl Config {
    pub const SPACE: usize = 8
        + 32
        + 8
        + 1
        + 32;

    /// Swaps in a new administrator key and returns the previous one.
    /// The default pubkey and a no-op rotation are both rejected — losing
    /// the admin key would strand every gated operation permanently.
    pub fn rotate_admin(&mut self, new_admin: Pubkey) -> Result<Pubkey> {
        require!(new_admin != Pubkey::default(), ErrorCode::InvalidAdmin);
        require!(new_admin != self.admin, ErrorCode::InvalidAdmin);
        Ok(core::mem::replace(&mut self.admin, new_admin))
    }
}

/// Entry ledger account — zero-copy to avoid stack overflow (~9.6KB).
/// All instructions must use `AccountLoader<'info, EntryLedger>` and call
/// `.load()` / `.load_mut()`.
///
/// Append-only growth; slots stay index-stable once written. An existing slot
/// may be overwritten in place via `replace`, which silently changes who can
/// win in any pending bucket whose range covers it — accepted operational
/// risk, the ledger does not lock ranges referenced by pending buckets.
#[account(zero_copy)]
#[repr(C)]
pub struct EntryLedger {
    pub len: u32,
    pub bump: u8,
    pub _padding: [u8; 3],
    pub entries: EntriesArray,
}

impl EntryLedger {
    pub const SPACE: usize = 8 + core::mem::size_of::<EntryLedger>();

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn get(&self, index: u32) -> Result<Pubkey> {
        require!(index < self.len, ErrorCode::EntryIndexOutOfBounds);
        Ok(Pubkey::new_from_array(self.entries.data[index as usize]))
    }

    /// Appends all identities in order. No deduplication.
    pub fn append(&mut self, identities: &[Pubkey]) -> Result<()> {
        let len = self.len as usize;
        let new_len = len
            .checked_add(identities.len())
            .ok_or(ErrorCode::MathOverflow)?;
        require!(new_len <= MAX_ENTRIES, ErrorCode::LedgerFull);
        for (slot, identity) in self.entries.data[len..new_len].iter_mut().zip(identities) {
            *slot = identity.to_bytes();
        }
        self.len = new_len as u32;
        Ok(())
    }

    /// Pairwise overwrite of existing slots. All indices are validated before
    /// any slot is written, so a failing call leaves the ledger untouched.
    pub fn replace(&mut self, indices: &[u32], identities: &[Pubkey]) -> Result<()> {
        require!(indices.len() == identities.len(), ErrorCode::InvalidInputs);
        for &index in indices {
            require!(index < self.len, ErrorCode::EntryIndexOutOfBounds);
        }
        for (&index, identity) in indices.iter().zip(identities) {
            self.entries.data[index as usize] = identity.to_bytes();
        }
        Ok(())
    }
}

/// One giveaway bucket, keyed by an admin-chosen index.
///
/// Lifecycle: nonexistent → pending (`request_id` set, `draw_ts == 0`) →
/// fulfilled (`winner`/`draw_ts` set). No transition leaves fulfilled and no
/// deletion path exists.
#[account]
#[derive(Default)]
pub struct GiveawayBucket {
    pub bucket_index: u64,
    /// All-zero until fulfillment writes the drawn identity.
    pub winner: [u8; 32],
    /// Unix time of fulfillment; 0 means undrawn.
    pub draw_ts: i64,
    /// Inclusive bounds into the entry ledger, fixed at creation.
    pub min_index: u32,
    pub max_index: u32,
    /// Nominal giveaway amount, recorded for off-chain settlement only.
    pub amount: u64,
    /// Settlement flag, storage only — no claim path in this program.
    pub claimed: bool,
    /// Outstanding or fulfilled randomness request id; 0 = bucket unused.
    pub request_id: u64,
    /// Raw randomness delivered at fulfillment.
    pub randomness: [u8; 32],
    pub bump: u8,
}

impl GiveawayBucket {
    pub const SPACE: usize = 8
        + 8
        + 32
        + 8
        + 4 + 4
        + 8
        + 1
        + 8
        + 32
        + 1;

    pub fn is_used(&self) -> bool {
        self.request_id != 0
    }

    pub fn is_drawn(&self) -> bool {
        self.draw_ts != 0
    }

    pub fn winner(&self) -> Result<Pubkey> {
        require!(self.is_used(), ErrorCode::InvalidIndex);
        require!(self.is_drawn(), ErrorCode::NotDrawn);
        Ok(Pubkey::new_from_array(self.winner))
    }
}

/// Correlation entry for one outstanding randomness request.
///
/// Seeds: `["request", request_id.to_le_bytes()]` — the request-id → bucket
/// mapping lives in the PDA address itself, so an unknown request id simply
/// has no account to resolve. `consumed` is set on fulfillment so a replayed
/// callback can never re-trigger the winner computation.
#[account]
#[derive(Default)]
pub struct RandomnessRequest {
    pub request_id: u64,
    pub bucket_index: u64,
    pub consumed: bool,
    pub bump: u8,
}

impl RandomnessRequest {
    pub const SPACE: usize = 8
        + 8
        + 8
        + 1
        + 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn ledger_with(identities: &[Pubkey]) -> EntryLedger {
        let mut ledger = EntryLedger::zeroed();
        ledger.append(identities).unwrap();
        ledger
    }

    #[test]
    fn append_preserves_order_and_length() {
        let ledger = ledger_with(&[identity(1), identity(2), identity(3)]);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get(0).unwrap(), identity(1));
        assert_eq!(ledger.get(1).unwrap(), identity(2));
        assert_eq!(ledger.get(2).unwrap(), identity(3));
    }

    #[test]
    fn get_past_length_is_out_of_bounds() {
        let ledger = ledger_with(&[identity(1)]);
        assert_eq!(
            ledger.get(1).unwrap_err(),
            ErrorCode::EntryIndexOutOfBounds.into()
        );
    }

    #[test]
    fn append_past_capacity_fails() {
        let mut ledger = EntryLedger::zeroed();
        let batch = vec![identity(7); MAX_ENTRIES];
        ledger.append(&batch).unwrap();
        assert_eq!(
            ledger.append(&[identity(8)]).unwrap_err(),
            ErrorCode::LedgerFull.into()
        );
        assert_eq!(ledger.len(), MAX_ENTRIES as u32);
    }

    #[test]
    fn replace_overwrites_only_named_slots() {
        let mut ledger = ledger_with(&[identity(1), identity(2), identity(3)]);
        ledger.replace(&[1], &[identity(9)]).unwrap();
        assert_eq!(ledger.get(0).unwrap(), identity(1));
        assert_eq!(ledger.get(1).unwrap(), identity(9));
        assert_eq!(ledger.get(2).unwrap(), identity(3));
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn replace_rejects_mismatched_lengths() {
        let mut ledger = ledger_with(&[identity(1), identity(2)]);
        assert_eq!(
            ledger.replace(&[0, 1], &[identity(9)]).unwrap_err(),
            ErrorCode::InvalidInputs.into()
        );
        assert_eq!(ledger.get(0).unwrap(), identity(1));
    }

    #[test]
    fn replace_validates_all_indices_before_writing() {
        let mut ledger = ledger_with(&[identity(1), identity(2)]);
        assert_eq!(
            ledger
                .replace(&[0, 5], &[identity(8), identity(9)])
                .unwrap_err(),
            ErrorCode::EntryIndexOutOfBounds.into()
        );
        // slot 0 untouched even though its index was valid
        assert_eq!(ledger.get(0).unwrap(), identity(1));
    }

    #[test]
    fn unused_bucket_winner_is_invalid_index() {
        let bucket = GiveawayBucket::default();
        assert!(!bucket.is_used());
        assert_eq!(bucket.winner().unwrap_err(), ErrorCode::InvalidIndex.into());
    }

    #[test]
    fn pending_bucket_winner_is_not_drawn() {
        let bucket = GiveawayBucket {
            request_id: 1,
            ..Default::default()
        };
        assert!(bucket.is_used());
        assert!(!bucket.is_drawn());
        assert_eq!(bucket.winner().unwrap_err(), ErrorCode::NotDrawn.into());
    }

    #[test]
    fn ledger_account_fits_one_cpi_allocation() {
        // accounts created through a system-program CPI are capped at
        // 10240 bytes; init_config must be able to allocate the ledger
        assert!(EntryLedger::SPACE <= 10_240);
    }

    #[test]
    fn rotate_admin_swaps_and_returns_the_old_key() {
        let mut cfg = Config {
            admin: identity(1),
            next_request_id: 1,
            bump: 255,
            reserved: [0u8; 32],
        };
        assert_eq!(cfg.rotate_admin(identity(2)).unwrap(), identity(1));
        assert_eq!(cfg.admin, identity(2));
    }

    #[test]
    fn rotate_admin_rejects_default_and_noop_keys() {
        let mut cfg = Config {
            admin: identity(1),
            next_request_id: 1,
            bump: 255,
            reserved: [0u8; 32],
        };
        assert_eq!(
            cfg.rotate_admin(Pubkey::default()).unwrap_err(),
            ErrorCode::InvalidAdmin.into()
        );
        assert_eq!(
            cfg.rotate_admin(identity(1)).unwrap_err(),
            ErrorCode::InvalidAdmin.into()
        );
        assert_eq!(cfg.admin, identity(1));
    }

    #[test]
    fn fulfilled_bucket_returns_winner() {
        let bucket = GiveawayBucket {
            request_id: 1,
            winner: identity(5).to_bytes(),
            draw_ts: 1_700_000_000,
            ..Default::default()
        };
        assert_eq!(bucket.winner().unwrap(), identity(5));
    }
}
