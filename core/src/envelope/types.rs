//! envelope/types.rs
//! Envelope record and its error type.

use std::fmt;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{security_ids, INTEGRITY_TAG_LEN, SESSION_ID_LEN};
use crate::crypto::types::CryptoError;
use crate::session::{SessionId, Timestamp};
use crate::utils::{enum_name_or_hex, fmt_bytes};

/// Security profile label. Carried in the envelope and selects the
/// configuration preset (see `CodecConfig::preset`).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    Medium   = security_ids::MEDIUM,
    High     = security_ids::HIGH,
    Ultra    = security_ids::ULTRA,
    Military = security_ids::MILITARY,
}

impl Default for SecurityLevel {
    fn default() -> Self {
        SecurityLevel::High
    }
}

impl SecurityLevel {
    pub fn verify(raw: u8) -> Result<Self, EnvelopeError> {
        SecurityLevel::try_from_primitive(raw).map_err(|_| EnvelopeError::UnknownSecurityLevel { raw })
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SecurityLevel::Medium   => "medium",
            SecurityLevel::High     => "high",
            SecurityLevel::Ultra    => "ultra",
            SecurityLevel::Military => "military",
        };
        f.write_str(name)
    }
}

/// Authenticated container around the user payload.
///
/// Invariants:
/// - `expires_at > created_at`
/// - `integrity_tag` = keyed BLAKE3 over every other field (see `encode::canonical_bytes`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub payload: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub session_id: SessionId,
    pub sequence: u64,
    pub security_level: SecurityLevel,
    pub schema_version: String,
    pub integrity_tag: [u8; INTEGRITY_TAG_LEN],
}

impl Envelope {
    /// Fixed bytes around the two variable-length fields.
    pub const FIXED_LEN: usize = 4        // magic
        + 1                               // schema_len
        + 1                               // security_level
        + SESSION_ID_LEN
        + 8                               // sequence
        + 8                               // created_at
        + 8                               // expires_at
        + 4                               // payload_len
        + INTEGRITY_TAG_LEN;

    pub fn ttl_millis(&self) -> u64 {
        self.created_at.millis_until(self.expires_at)
    }
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    // --- structural (decoded bytes) ---
    #[error("envelope truncated: have {have}, need {need}")]
    BufferTooShort { have: usize, need: usize },

    #[error("invalid envelope magic: {}", fmt_bytes(have))]
    InvalidMagic { have: [u8; 4] },

    #[error("unknown security level: {}", enum_name_or_hex::<SecurityLevel>(*raw))]
    UnknownSecurityLevel { raw: u8 },

    #[error("field `{field}` is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("envelope length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("expiry {expires_at} is not after creation {created_at}")]
    InvalidWindow { created_at: Timestamp, expires_at: Timestamp },

    // --- build-time ---
    #[error("payload too large: {have} bytes (max {max})")]
    PayloadTooLarge { have: usize, max: usize },

    #[error("schema label too long: {have} bytes (max {max})")]
    SchemaTooLong { have: usize, max: usize },

    #[error("time-to-live must be positive")]
    ZeroTtl,

    // --- validation ---
    #[error("integrity tag mismatch")]
    IntegrityMismatch,

    #[error("expired at {expires_at} (now {now})")]
    Expired { expires_at: Timestamp, now: Timestamp },

    #[error("key derivation failed: {0}")]
    Crypto(#[from] CryptoError),
}
