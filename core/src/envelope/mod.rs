//! envelope/mod.rs
//! Build, serialize, parse and validate the authenticated envelope.
//!
//! Build order: bounds check, sequence number, integrity tag.
//! Validate order: integrity tag, then expiry. A tampered envelope is never
//! reported as merely expired.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;

use std::time::Duration;
use tracing::debug;

use crate::constants::{INTEGRITY_TAG_LEN, MAX_PAYLOAD_LEN, MAX_SCHEMA_LEN, SCHEMA_VERSION};
use crate::crypto::integrity::{compute_integrity_tag, verify_integrity_tag};
use crate::crypto::kdf::derive_integrity_key;
use crate::crypto::types::{HkdfPrf, MasterKey, KEY_LEN_32};
use crate::session::{Session, Timestamp};

/// Inputs to `Envelope::build` that come from configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeParams {
    pub ttl: Duration,
    pub security_level: SecurityLevel,
    pub kdf_prf: HkdfPrf,
}

impl Envelope {
    /// Wrap `data` with session metadata and seal it with the session's
    /// integrity key. Consumes one sequence number.
    pub fn build(
        data: &str,
        params: &EnvelopeParams,
        session: &Session,
        now: Timestamp,
    ) -> Result<Self, EnvelopeError> {
        if data.len() > MAX_PAYLOAD_LEN {
            return Err(EnvelopeError::PayloadTooLarge { have: data.len(), max: MAX_PAYLOAD_LEN });
        }
        if SCHEMA_VERSION.len() > MAX_SCHEMA_LEN {
            return Err(EnvelopeError::SchemaTooLong { have: SCHEMA_VERSION.len(), max: MAX_SCHEMA_LEN });
        }
        if params.ttl.as_millis() == 0 {
            return Err(EnvelopeError::ZeroTtl);
        }

        let expires_at = now.checked_add(params.ttl).ok_or(EnvelopeError::InvalidWindow {
            created_at: now,
            expires_at: now,
        })?;

        let mut envelope = Envelope {
            payload: data.to_owned(),
            created_at: now,
            expires_at,
            session_id: *session.id(),
            sequence: session.next_sequence(),
            security_level: params.security_level,
            schema_version: SCHEMA_VERSION.to_owned(),
            integrity_tag: [0u8; INTEGRITY_TAG_LEN],
        };

        let key = derive_integrity_key(session.master_key(), params.kdf_prf, session.id().as_bytes())?;
        envelope.integrity_tag = compute_integrity_tag(&key, &canonical_bytes(&envelope));

        debug!(
            session = %envelope.session_id.short_hex(),
            sequence = envelope.sequence,
            payload_len = envelope.payload.len(),
            ttl_ms = envelope.ttl_millis(),
            "envelope built"
        );
        Ok(envelope)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        encode_envelope(self)
    }

    pub fn parse(buf: &[u8]) -> Result<Self, EnvelopeError> {
        parse_envelope(buf)
    }

    /// Integrity first, then expiry.
    pub fn validate(&self, master: &MasterKey, prf: HkdfPrf, now: Timestamp) -> Result<(), EnvelopeError> {
        let key = derive_integrity_key(master, prf, self.session_id.as_bytes())?;
        self.validate_with_key(&key, now)
    }

    /// As `validate`, with an already derived integrity key.
    pub fn validate_with_key(&self, integrity_key: &[u8; KEY_LEN_32], now: Timestamp) -> Result<(), EnvelopeError> {
        if !verify_integrity_tag(integrity_key, &canonical_bytes(self), &self.integrity_tag) {
            return Err(EnvelopeError::IntegrityMismatch);
        }
        if self.is_expired(now) {
            return Err(EnvelopeError::Expired { expires_at: self.expires_at, now });
        }
        Ok(())
    }

    /// Valid through `expires_at` inclusive.
    #[inline]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        crate::session::is_expired(self, now)
    }
}
