//! crypto/integrity.rs
//! Keyed BLAKE3 tag over the canonical envelope bytes.

use subtle::ConstantTimeEq;

use crate::constants::INTEGRITY_TAG_LEN;
use crate::crypto::types::KEY_LEN_32;

/// Keyed BLAKE3, truncated to `INTEGRITY_TAG_LEN` bytes.
pub fn compute_integrity_tag(key: &[u8; KEY_LEN_32], canonical: &[u8]) -> [u8; INTEGRITY_TAG_LEN] {
    let full = blake3::keyed_hash(key, canonical);
    let mut tag = [0u8; INTEGRITY_TAG_LEN];
    tag.copy_from_slice(&full.as_bytes()[..INTEGRITY_TAG_LEN]);
    tag
}

/// Constant-time comparison against a recomputed tag.
pub fn verify_integrity_tag(
    key: &[u8; KEY_LEN_32],
    canonical: &[u8],
    tag: &[u8; INTEGRITY_TAG_LEN],
) -> bool {
    let expected = compute_integrity_tag(key, canonical);
    expected[..].ct_eq(&tag[..]).into()
}
