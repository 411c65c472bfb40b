use anchor_lang::prelude::*;

#[event]
pub struct BucketCreated {
    pub bucket_index: u64,
    pub request_id: u64,
    pub min_index: u32,
    pub max_index: u32,
    pub amount: u64,
}

#[event]
pub struct WinnerDrawn {
    pub bucket_index: u64,
    pub winner: Pubkey,
    pub winner_index: u32,
    pub request_id: u64,
}

#[event]
pub struct EntriesAppended {
    pub count: u32,
    pub total: u32,
}

#[event]
pub struct EntriesReplaced {
    pub count: u32,
}

#[event]
pub struct AdminTransferred {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
