// ## 📂 File: `src/envelope/encode.rs`
//! src/envelope/encode.rs
//!
//! Envelope encoding utilities.
//!
//! Design notes:
//! - Little-endian, length-prefixed layout; field order must match `decode.rs`.
//! - `canonical_bytes` is every field except the tag. It is the exact input
//!   of the keyed integrity hash, so it must stay deterministic.
//! - `encode_envelope` appends the tag to the canonical bytes.
//!
//! Layout:
//! ```text
//! magic[4] | schema_len u8 | schema | security_level u8 | session_id[16]
//! | sequence u64 | created_at u64 | expires_at u64 | payload_len u32 | payload
//! | integrity_tag[16]
//! ```

use crate::constants::MAGIC_ENVELOPE;
use crate::envelope::types::Envelope;

/// Serialize every field except `integrity_tag`.
///
/// Lengths are bounded when the envelope is built or parsed; the narrowing
/// casts below rely on that.
pub fn canonical_bytes(e: &Envelope) -> Vec<u8> {
    let mut out = Vec::with_capacity(Envelope::FIXED_LEN + e.schema_version.len() + e.payload.len());

    fn put_u64(out: &mut Vec<u8>, v: u64) {
        out.extend_from_slice(&v.to_le_bytes());
    }

    out.extend_from_slice(&MAGIC_ENVELOPE);                         // magic
    out.push(e.schema_version.len() as u8);                         // schema_len
    out.extend_from_slice(e.schema_version.as_bytes());             // schema
    out.push(e.security_level as u8);                               // security_level
    out.extend_from_slice(e.session_id.as_bytes());                 // session_id
    put_u64(&mut out, e.sequence);                                  // sequence
    put_u64(&mut out, e.created_at.as_millis());                    // created_at (ms)
    put_u64(&mut out, e.expires_at.as_millis());                    // expires_at (ms)
    out.extend_from_slice(&(e.payload.len() as u32).to_le_bytes()); // payload_len
    out.extend_from_slice(e.payload.as_bytes());                    // payload

    out
}

/// Serialize the full envelope (canonical bytes followed by the tag).
pub fn encode_envelope(e: &Envelope) -> Vec<u8> {
    let mut out = canonical_bytes(e);
    out.extend_from_slice(&e.integrity_tag);
    debug_assert_eq!(out.len(), Envelope::FIXED_LEN + e.schema_version.len() + e.payload.len());
    out
}
