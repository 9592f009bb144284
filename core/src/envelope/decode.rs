// ## 📂 File: `src/envelope/decode.rs`
//! src/envelope/decode.rs
//!
//! Envelope decoding utilities.
//!
//! Design notes:
//! - Field order must match `encode.rs` exactly.
//! - Structural checks only: magic, lengths, UTF-8, known enums, a sane
//!   validity window, no trailing bytes. The tag and expiry are checked by
//!   `validate`.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{INTEGRITY_TAG_LEN, MAGIC_ENVELOPE, SESSION_ID_LEN};
use crate::envelope::types::{Envelope, EnvelopeError, SecurityLevel};
use crate::session::{SessionId, Timestamp};

/// Bounds-checked read cursor.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], EnvelopeError> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.buf.len()).ok_or(
            EnvelopeError::BufferTooShort {
                have: self.buf.len(),
                need: self.pos.saturating_add(n),
            },
        )?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], EnvelopeError> {
        let mut dst = [0u8; N];
        dst.copy_from_slice(self.take(N)?);
        Ok(dst)
    }

    fn u8(&mut self) -> Result<u8, EnvelopeError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, EnvelopeError> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    fn u64(&mut self) -> Result<u64, EnvelopeError> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    fn utf8(&mut self, n: usize, field: &'static str) -> Result<String, EnvelopeError> {
        let raw = self.take(n)?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| EnvelopeError::InvalidUtf8 { field })
    }
}

/// Deserialize an envelope from its exact byte encoding.
pub fn parse_envelope(buf: &[u8]) -> Result<Envelope, EnvelopeError> {
    if buf.len() < Envelope::FIXED_LEN {
        return Err(EnvelopeError::BufferTooShort { have: buf.len(), need: Envelope::FIXED_LEN });
    }

    let mut c = Cursor::new(buf);

    let magic = c.array::<4>()?;
    if magic != MAGIC_ENVELOPE {
        return Err(EnvelopeError::InvalidMagic { have: magic });
    }

    let schema_len     = c.u8()? as usize;
    let schema_version = c.utf8(schema_len, "schema_version")?;
    let security_level = SecurityLevel::verify(c.u8()?)?;
    let session_id     = SessionId(c.array::<SESSION_ID_LEN>()?);
    let sequence       = c.u64()?;
    let created_at     = Timestamp::from_millis(c.u64()?);
    let expires_at     = Timestamp::from_millis(c.u64()?);
    let payload_len    = c.u32()? as usize;
    let payload        = c.utf8(payload_len, "payload")?;
    let integrity_tag  = c.array::<INTEGRITY_TAG_LEN>()?;

    if c.pos != buf.len() {
        return Err(EnvelopeError::LengthMismatch { expected: c.pos, actual: buf.len() });
    }
    if expires_at <= created_at {
        return Err(EnvelopeError::InvalidWindow { created_at, expires_at });
    }

    Ok(Envelope {
        payload,
        created_at,
        expires_at,
        session_id,
        sequence,
        security_level,
        schema_version,
        integrity_tag,
    })
}
