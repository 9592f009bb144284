//! session/mod.rs
//! Encoder session state: identity, master key, sequence counter.
//!
//! One `Session` is shared by every encode an encoder performs. The sequence
//! counter is atomic so concurrent encodes on the same session never observe
//! the same number.

pub mod types;

pub use types::*;

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use crate::crypto::types::{CryptoError, MasterKey};
use crate::envelope::Envelope;

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    master_key: MasterKey,
    sequence: AtomicU64,
}

impl Session {
    /// Fresh session with a random id and a random master key.
    pub fn new_session() -> Result<Self, CryptoError> {
        Self::with_key(MasterKey::generate()?)
    }

    /// Fresh session id around an existing master key, so decoders that
    /// already hold the key can open its patterns.
    pub fn with_key(master_key: MasterKey) -> Result<Self, CryptoError> {
        let id = SessionId::generate()?;
        info!(session = %id.short_hex(), "session created");
        Ok(Self::from_parts(id, master_key, 0))
    }

    /// Rebuild a session from persisted parts. `last_sequence` is the last
    /// number handed out; the next call to `next_sequence` returns one more.
    pub fn from_parts(id: SessionId, master_key: MasterKey, last_sequence: u64) -> Self {
        Self {
            id,
            master_key,
            sequence: AtomicU64::new(last_sequence),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn master_key(&self) -> &MasterKey {
        &self.master_key
    }

    /// Strictly increasing; the first call returns 1.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Last number handed out (0 before the first encode).
    pub fn current_sequence(&self) -> u64 {
        self.sequence.load(Ordering::Acquire)
    }
}

/// True once `now` is strictly after the envelope's expiry.
#[inline]
pub fn is_expired(envelope: &Envelope, now: Timestamp) -> bool {
    now > envelope.expires_at
}
