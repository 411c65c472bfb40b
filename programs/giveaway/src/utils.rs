use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

pub fn checked_add_u64(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(ErrorCode::MathOverflow.into())
}

/// Reduces a 256-bit random value (big-endian) modulo `span`.
///
/// The whole 256-bit value is folded limb by limb, never truncated, so the
/// residue is exact: every input maps into `[0, span)` and the residual bias
/// for span ≪ 2^256 is negligible.
pub fn reduce_randomness(randomness: &[u8; 32], span: u64) -> u64 {
    let span = span as u128;
    let mut acc: u128 = 0;
    for i in 0..4 {
        let mut limb = [0u8; 8];
        limb.copy_from_slice(&randomness[i * 8..(i + 1) * 8]);
        // acc < span <= 2^64, so the shift cannot overflow a u128
        acc = ((acc << 64) | u64::from_be_bytes(limb) as u128) % span;
    }
    acc as u64
}

/// Maps a random value uniformly onto the inclusive range `[min_index, max_index]`.
pub fn winner_index(min_index: u32, max_index: u32, randomness: &[u8; 32]) -> Result<u32> {
    require!(min_index <= max_index, ErrorCode::InvalidIndex);
    let span = (max_index - min_index) as u64 + 1;
    let offset = reduce_randomness(randomness, span);
    Ok(min_index + offset as u32)
}

#[cfg(test)]
pub(crate) fn randomness_from_u128(value: u128) -> [u8; 32] {
    let mut randomness = [0u8; 32];
    randomness[16..].copy_from_slice(&value.to_be_bytes());
    randomness
}
