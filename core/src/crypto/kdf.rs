// ## src/crypto/kdf.rs

//! crypto/kdf.rs
//! HKDF-based key schedule from the session master key.
//!
//! Design:
//! - HKDF-Extract(master_key, salt) -> PRK
//! - HKDF-Expand(PRK, info) -> 32-byte subkey
//!
//! Two independent subkeys are derived:
//! - AEAD key: no salt, `info = kdf_labels::AEAD | suite id`.
//! - Integrity key: `salt = session_id`, `info = kdf_labels::INTEGRITY`.
//!
//! The master key is never used directly for AEAD or for the integrity hash.

use crate::constants::{kdf_labels, SESSION_ID_LEN};
use crate::crypto::types::{CipherSuite, CryptoError, HkdfPrf, MasterKey, KEY_LEN_32};

use hkdf::Hkdf;
use sha2::{Sha256, Sha512};

#[inline]
fn build_info(label: &[u8], suite: Option<CipherSuite>) -> Vec<u8> {
    let mut info = Vec::with_capacity(label.len() + 1);
    info.extend_from_slice(label);
    if let Some(suite) = suite {
        info.push(suite as u8);
    }
    info
}

fn hkdf_expand_32(
    prf: HkdfPrf,
    salt: Option<&[u8]>,
    ikm: &[u8],
    info: &[u8],
) -> Result<[u8; KEY_LEN_32], CryptoError> {
    let mut key = [0u8; KEY_LEN_32];
    match prf {
        HkdfPrf::Sha256 => {
            let hk = Hkdf::<Sha256>::new(salt, ikm);
            hk.expand(info, &mut key)
                .map_err(|_| CryptoError::Kdf("HKDF expand failed (SHA-256)".into()))?;
        }
        HkdfPrf::Sha512 => {
            let hk = Hkdf::<Sha512>::new(salt, ikm);
            hk.expand(info, &mut key)
                .map_err(|_| CryptoError::Kdf("HKDF expand failed (SHA-512)".into()))?;
        }
    }
    Ok(key)
}

/// Derive the AEAD key for `suite`. Bound to the suite id so the same master
/// key never feeds two different ciphers with the same subkey.
pub fn derive_aead_key(
    master: &MasterKey,
    prf: HkdfPrf,
    suite: CipherSuite,
) -> Result<[u8; KEY_LEN_32], CryptoError> {
    let info = build_info(kdf_labels::AEAD, Some(suite));
    hkdf_expand_32(prf, None, master.as_bytes(), &info)
}

/// Derive the per-session integrity key used for the envelope tag.
pub fn derive_integrity_key(
    master: &MasterKey,
    prf: HkdfPrf,
    session_id: &[u8; SESSION_ID_LEN],
) -> Result<[u8; KEY_LEN_32], CryptoError> {
    let info = build_info(kdf_labels::INTEGRITY, None);
    hkdf_expand_32(prf, Some(session_id), master.as_bytes(), &info)
}
