/// Magic number for the serialized envelope.
/// "RPE1" = RPattern Envelope v1
// Protocol magic fields are `[u8; 4]` so the type itself enforces "exactly 4 bytes".
pub const MAGIC_ENVELOPE: [u8; 4] = *b"RPE1";

/// Magic number for the serialized ciphertext record.
/// "RPC1" = RPattern Ciphertext v1
pub const MAGIC_CIPHERTEXT: [u8; 4] = *b"RPC1";
pub const CIPHERTEXT_V1: u8 = 1;

/// Schema label embedded in every envelope.
pub const SCHEMA_VERSION: &str = "rpattern/2.0";
/// Upper bound for the schema label (length is carried in one byte).
pub const MAX_SCHEMA_LEN: usize = u8::MAX as usize;

/// Payload sanity bound. Patterns are meant for short strings (URLs, ids).
pub const MAX_PAYLOAD_LEN: usize = 4 * 1024;

/// Master key length accepted by sessions and decoders.
pub const MASTER_KEY_LEN: usize = 32;
/// Session identifier length (random bytes).
pub const SESSION_ID_LEN: usize = 16;
/// Truncated keyed-hash length carried in the envelope.
pub const INTEGRITY_TAG_LEN: usize = 16;
/// Fixed framer checksum width in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Grid bounds for a single frame (g x g cells).
pub const MIN_GRID_SIZE: usize = 1;
pub const MAX_GRID_SIZE: usize = 16;
pub const DEFAULT_GRID_SIZE: usize = 3;

/// Default time-to-live in seconds.
pub const DEFAULT_TTL_SECS: u64 = 180;
/// Default display time per frame in seconds.
pub const DEFAULT_FRAME_DURATION: f64 = 0.4;

/// Minimum Euclidean RGB distance between any two symbols (markers included).
pub const DEFAULT_MIN_SEPARATION: u32 = 96;
/// Presets set the sample tolerance (the distance past which an observed
/// sample is reported as untrusted) to `min_separation / SAMPLE_TOLERANCE_DIVISOR`.
/// A trusted sample then sits at least three quarters of the separation away
/// from every other symbol.
pub const SAMPLE_TOLERANCE_DIVISOR: u32 = 4;

/// Number of metadata bits carried by the sync wrapper after the auth marker.
/// 24 is divisible by every supported symbol width (1, 2, 3, 4).
pub const SYNC_METADATA_BITS: usize = 24;

/// Supported data alphabet sizes.
pub const ALLOWED_ALPHABET_SIZES: &[usize] = &[2, 4, 8, 16];

/// Cipher suite identifiers (mirrored in the ciphertext record).
pub mod cipher_ids {
    pub const AES256_GCM: u8        = 0x01;
    pub const CHACHA20_POLY1305: u8 = 0x02;
}

/// HKDF PRF identifiers.
pub mod prf_ids {
    pub const SHA256: u8 = 0x01;
    pub const SHA512: u8 = 0x02;
}

/// Security level identifiers (mirrored in the envelope).
pub mod security_ids {
    pub const MEDIUM: u8   = 0x01;
    pub const HIGH: u8     = 0x02;
    pub const ULTRA: u8    = 0x03;
    pub const MILITARY: u8 = 0x04;
}

/// HKDF `info` labels. Changing any of these breaks every existing pattern.
pub mod kdf_labels {
    pub const AEAD: &[u8]      = b"rpattern|aead|v1";
    pub const INTEGRITY: &[u8] = b"rpattern|integrity|v1";
}
