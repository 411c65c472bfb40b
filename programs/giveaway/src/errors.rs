use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Paired input sequences differ in length")]
    InvalidInputs,
    #[msg("Bucket index is already used")]
    IndexAlreadyUsed,
    #[msg("Invalid bucket index or index range")]
    InvalidIndex,
    #[msg("Bucket has not been drawn yet")]
    NotDrawn,
    #[msg("Entry index is out of bounds")]
    EntryIndexOutOfBounds,
    #[msg("Entry ledger is full")]
    LedgerFull,
    #[msg("Unknown randomness request")]
    UnknownRequest,
    #[msg("Randomness request was already fulfilled")]
    RequestAlreadyFulfilled,
    #[msg("Request does not correlate to this bucket")]
    RequestBucketMismatch,
    #[msg("Bucket already has a winner")]
    AlreadyDrawn,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Invalid admin address")]
    InvalidAdmin,
}
