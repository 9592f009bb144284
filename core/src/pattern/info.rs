//! pattern/info.rs
//! Read-only status report for an encoded or persisted pattern.
//!
//! Nothing here is authenticated. The report describes what the producer
//! recorded; only a decode proves a pattern genuine.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::crypto::CipherSuite;
use crate::envelope::SecurityLevel;
use crate::framing::Frame;
use crate::session::Timestamp;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternStatus {
    Active,
    Expired,
}

impl fmt::Display for PatternStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PatternStatus::Active  => "active",
            PatternStatus::Expired => "expired",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternInfo {
    pub pattern_id: String,
    pub sequence_number: u64,
    pub security_level: SecurityLevel,
    pub cipher_suite: CipherSuite,
    pub total_frames: usize,
    pub frame_duration: f64,
    /// Seconds to show the whole sequence once.
    pub display_secs: f64,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    /// Zero once expired.
    pub time_remaining_ms: u64,
    pub is_expired: bool,
    pub status: PatternStatus,
    pub pattern_hash: String,
}

/// Fields shared by `EncodedPattern` and `PatternDocument`.
pub(crate) struct InfoSource<'a> {
    pub pattern_id: &'a str,
    pub sequence_number: u64,
    pub security_level: SecurityLevel,
    pub cipher_suite: CipherSuite,
    pub total_frames: usize,
    pub frame_duration: f64,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub pattern_hash: &'a str,
}

impl PatternInfo {
    /// Expiry matches decode: expired only when `now > expires_at`.
    pub(crate) fn build(src: InfoSource<'_>, now: Timestamp) -> Self {
        let is_expired = now > src.expires_at;
        Self {
            pattern_id: src.pattern_id.to_owned(),
            sequence_number: src.sequence_number,
            security_level: src.security_level,
            cipher_suite: src.cipher_suite,
            total_frames: src.total_frames,
            frame_duration: src.frame_duration,
            display_secs: src.total_frames as f64 * src.frame_duration,
            created_at: src.created_at,
            expires_at: src.expires_at,
            time_remaining_ms: now.millis_until(src.expires_at),
            is_expired,
            status: if is_expired { PatternStatus::Expired } else { PatternStatus::Active },
            pattern_hash: src.pattern_hash.to_owned(),
        }
    }
}

/// Unkeyed BLAKE3 over grid size, frame count and every cell, hex encoded.
///
/// Fingerprints the rendered sequence so copies can be compared or
/// deduplicated without decoding.
pub fn pattern_hash(frames: &[Frame]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"rpattern-frames-v1");
    hasher.update(&(frames.len() as u64).to_le_bytes());
    for frame in frames {
        hasher.update(&(frame.size() as u16).to_le_bytes());
        for c in frame.cells() {
            hasher.update(&[c.r, c.g, c.b]);
        }
    }
    hasher.finalize().to_hex().to_string()
}
