/// Capacity of the entry ledger account. Entries are 32-byte identities;
/// 300 keeps the zero-copy account under the 10240-byte cap on CPI-created
/// accounts, so `init` can allocate it in one shot.
pub const MAX_ENTRIES: usize = 300;

pub const SEED_CFG: &[u8] = b"cfg";
pub const SEED_ENTRIES: &[u8] = b"entries";
pub const SEED_BUCKET: &[u8] = b"bucket";
pub const SEED_REQUEST: &[u8] = b"request";

/// Request ids start here; 0 stays the "no request / bucket unused" sentinel.
pub const FIRST_REQUEST_ID: u64 = 1;
