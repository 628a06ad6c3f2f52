//! ## Digest decoding
//! Maps an item digest to a HyperLogLog register index and rank.
//!
//! The digest is read as one big-endian unsigned integer `h` (256 bits for SHA-256):
//! - lowest `P` bits of `h` - register index, where `P = log2(bucket_count)`.
//! - remaining `h >> P` bits - rank source. The rank is the 1-based position of the lowest
//!   set bit in this window, i.e. its trailing zero count plus one.
//!
//! Trailing zeros are used in place of the leading zeros of the classical formulation. Both have
//! the same distribution for a uniform hash, and trailing zeros do not depend on the window width.
//! The window is `digest_bits - P` bits wide, so an all-zero window gets rank `digest_bits - P + 1`,
//! saturated to `u8::MAX`.

/// Number of low digest bytes needed to cover any register index (`P <= 63`).
const INDEX_BYTES: usize = 8;

/// Return register index and rank for `digest` with `precision` index bits.
#[inline]
pub(crate) fn bucket_and_rank(digest: &[u8], precision: u32) -> (usize, u8) {
    (bucket_index(digest, precision), rank(digest, precision))
}

/// Lowest `precision` bits of the big-endian `digest`.
#[inline]
fn bucket_index(digest: &[u8], precision: u32) -> usize {
    let low = digest
        .iter()
        .rev()
        .take(INDEX_BYTES)
        .enumerate()
        .fold(0u64, |acc, (i, &byte)| acc | (u64::from(byte) << (8 * i)));
    let mask = (1u64 << precision) - 1;
    (low & mask) as usize
}

/// 1-based position of the lowest set bit of `digest >> precision`.
#[inline]
fn rank(digest: &[u8], precision: u32) -> u8 {
    let precision = precision as usize;
    for (k, &byte) in digest.iter().rev().enumerate() {
        let low_bit = 8 * k;
        if low_bit + 8 <= precision {
            // byte holds index bits only
            continue;
        }
        let mut bits = byte;
        if low_bit < precision {
            bits &= 0xFF << (precision - low_bit);
        }
        if bits != 0 {
            let position = low_bit + bits.trailing_zeros() as usize;
            return saturate(position - precision + 1);
        }
    }
    saturate((digest.len() * 8).saturating_sub(precision) + 1)
}

#[inline]
fn saturate(rank: usize) -> u8 {
    u8::try_from(rank).unwrap_or(u8::MAX)
}
