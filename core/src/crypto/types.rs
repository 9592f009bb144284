// ## 📂 File: `src/crypto/types.rs`

use std::fmt;
use num_enum::TryFromPrimitive;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{cipher_ids, prf_ids, MASTER_KEY_LEN};
use crate::utils::{enum_name_or_hex, fmt_bytes};

/// Stable key length for both AEAD suites.
pub const KEY_LEN_32: usize = 32;

/// Standard 12-byte nonce length for AES-GCM and ChaCha20-Poly1305.
pub const NONCE_LEN_12: usize = 12;

/// Fixed AEAD tag length (bytes).
pub const TAG_LEN: usize = 16;

/// Cipher suites (ciphertext registry). Chosen explicitly in configuration;
/// there is no runtime fallback.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherSuite {
    Aes256Gcm        = cipher_ids::AES256_GCM,
    Chacha20Poly1305 = cipher_ids::CHACHA20_POLY1305,
}

impl Default for CipherSuite {
    fn default() -> Self {
        CipherSuite::Chacha20Poly1305
    }
}

impl CipherSuite {
    pub fn verify(raw: u8) -> Result<Self, CryptoError> {
        CipherSuite::try_from_primitive(raw).map_err(|_| CryptoError::UnknownCipherSuite { raw })
    }
}

/// HKDF PRF choices.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HkdfPrf {
    Sha256 = prf_ids::SHA256,
    Sha512 = prf_ids::SHA512,
}

impl Default for HkdfPrf {
    fn default() -> Self {
        HkdfPrf::Sha256
    }
}

/// Long-lived key material shared between an encoder session and decoders.
/// Never used directly by the AEAD or the integrity hash; see `kdf`.
#[derive(Clone, PartialEq, Eq)]
pub struct MasterKey([u8; MASTER_KEY_LEN]);

impl MasterKey {
    pub fn from_bytes(bytes: [u8; MASTER_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; MASTER_KEY_LEN] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLen {
            expected: MASTER_KEY_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Fresh key from the OS CSPRNG.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut key = [0u8; MASTER_KEY_LEN];
        fill_random(&mut key)?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; MASTER_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

/// Fill `buf` from the OS CSPRNG.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CryptoError::Random(e.to_string()))
}

#[derive(Debug, Error)]
pub enum CryptoError {
    /// Unsupported cipher suite id in a ciphertext record.
    #[error("unsupported cipher suite: {}", enum_name_or_hex::<CipherSuite>(*raw))]
    UnknownCipherSuite { raw: u8 },

    /// Ciphertext was sealed with a different suite than the decoder expects.
    #[error("cipher suite mismatch: expected {expected:?}, got {actual:?}")]
    SuiteMismatch { expected: CipherSuite, actual: CipherSuite },

    /// Invalid key length provided to cipher or session.
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// Record does not start with the ciphertext magic.
    #[error("invalid ciphertext magic: {}", fmt_bytes(have))]
    InvalidMagic { have: [u8; 4] },

    #[error("unsupported ciphertext version: {0}")]
    UnsupportedVersion(u8),

    /// Record shorter than header + tag.
    #[error("ciphertext truncated: {have} < {need}")]
    Truncated { have: usize, need: usize },

    /// AEAD tag mismatch (authentication failure). Carries no plaintext.
    #[error("AEAD tag mismatch")]
    TagMismatch,

    #[error("AEAD seal failed: {0}")]
    SealFailed(String),

    #[error("random source failure: {0}")]
    Random(String),

    #[error("key derivation failed: {0}")]
    Kdf(String),
}
