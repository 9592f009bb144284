//! framing/bits.rs
//! MSB-first conversion between bytes and `k`-bit groups.
//!
//! # Padding rules
//! - `split_bits` zero-pads the final group up to `k` bits.
//! - `join_bits` reads `floor(groups * k / 8)` bytes; the leftover bits must
//!   be fewer than `k` and all zero, otherwise the group count cannot have come
//!   from `split_bits`.

use crate::alphabet::BitGroup;
use crate::framing::types::FramerError;

/// Split `bytes` into `k`-bit groups. Returns the groups and the number of
/// zero pad bits appended to the last group.
pub fn split_bits(bytes: &[u8], k: u8) -> (Vec<BitGroup>, u8) {
    debug_assert!((1..=8).contains(&k));
    let k = k as u32;
    let mask = (1u32 << k) - 1;

    let mut groups = Vec::with_capacity((bytes.len() * 8 + k as usize - 1) / k as usize);
    // Accumulator holds fewer than `k + 8` live bits.
    let mut acc: u32 = 0;
    let mut acc_bits: u32 = 0;

    for &byte in bytes {
        acc = (acc << 8) | byte as u32;
        acc_bits += 8;
        while acc_bits >= k {
            acc_bits -= k;
            groups.push(BitGroup(((acc >> acc_bits) & mask) as u8));
        }
        acc &= (1u32 << acc_bits) - 1;
    }

    let mut pad = 0u8;
    if acc_bits > 0 {
        let shift = k - acc_bits;
        groups.push(BitGroup(((acc << shift) & mask) as u8));
        pad = shift as u8;
    }
    (groups, pad)
}

/// Inverse of `split_bits`.
pub fn join_bits(groups: &[BitGroup], k: u8) -> Result<Vec<u8>, FramerError> {
    debug_assert!((1..=8).contains(&k));
    let total_bits = groups.len() * k as usize;
    let leftover = (total_bits % 8) as u32;
    if leftover >= k as u32 {
        return Err(FramerError::PaddingOverflow { leftover_bits: leftover as u8, symbol_bits: k });
    }

    let k = k as u32;
    let mask = (1u32 << k) - 1;
    let mut out = Vec::with_capacity(total_bits / 8);
    let mut acc: u32 = 0;
    let mut acc_bits: u32 = 0;

    for g in groups {
        acc = (acc << k) | (g.value() as u32 & mask);
        acc_bits += k;
        if acc_bits >= 8 {
            acc_bits -= 8;
            out.push((acc >> acc_bits) as u8);
            acc &= (1u32 << acc_bits) - 1;
        }
    }

    debug_assert_eq!(acc_bits, leftover);
    if acc != 0 {
        return Err(FramerError::NonZeroPadding { bits: acc_bits as u8 });
    }
    Ok(out)
}

/// Number of groups `split_bits` produces for `byte_len` bytes.
#[inline]
pub fn group_count(byte_len: usize, k: u8) -> usize {
    (byte_len * 8 + k as usize - 1) / k as usize
}
