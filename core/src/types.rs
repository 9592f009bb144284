use crate::{
    config::ConfigError,
    crypto::CryptoError,
    envelope::EnvelopeError,
    framing::FramerError,
    pattern::DocumentError,
    session::Timestamp,
    sync::SyncError,
};

/// Unified codec error covering every stage of encode and decode.
/// - Ergonomic `From<T>` impls enable `?` across the pipeline.
/// - Decode failures collapse to a small set of outcomes; the stage-level
///   cause is carried as text for logs, never as plaintext or key material.
#[derive(Debug)]
pub enum CodecError {
    /// Decrypted bytes are not a well-formed envelope.
    Malformed(String),

    /// Keyed integrity tag does not match the envelope contents.
    IntegrityMismatch,

    /// Ciphertext failed to parse or to authenticate under the expected key.
    AuthenticationFailed(String),

    /// Envelope is authentic but `now > expires_at`.
    Expired { expires_at: Timestamp, now: Timestamp },

    /// Start marker, or end marker after it, not found.
    NoSyncFound(String),

    /// Not enough frames to carry a sequence or its data run.
    TooFewFrames { have: usize, need: usize },

    /// Framer consistency check failed (checksum, padding, stray marker).
    ChecksumMismatch(String),

    /// Encode-side input rejected before anything was sealed.
    InvalidInput(String),

    Config(ConfigError),

    /// Key setup or randomness failure.
    Crypto(CryptoError),

    Document(DocumentError),

    /// Batch worker failure.
    PipelineError(&'static str),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Malformed(msg) => write!(f, "malformed envelope: {}", msg),
            CodecError::IntegrityMismatch => write!(f, "integrity tag mismatch"),
            CodecError::AuthenticationFailed(msg) => write!(f, "authentication failed: {}", msg),
            CodecError::Expired { expires_at, now } => {
                write!(f, "pattern expired at {} (now {})", expires_at, now)
            }
            CodecError::NoSyncFound(msg) => write!(f, "no sync found: {}", msg),
            CodecError::TooFewFrames { have, need } => {
                write!(f, "too few frames: have {}, need at least {}", have, need)
            }
            CodecError::ChecksumMismatch(msg) => write!(f, "frame checksum mismatch: {}", msg),
            CodecError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            CodecError::Config(e) => write!(f, "config error: {}", e),
            CodecError::Crypto(e) => write!(f, "crypto error: {}", e),
            CodecError::Document(e) => write!(f, "document error: {}", e),
            CodecError::PipelineError(msg) => write!(f, "pipeline error: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<ConfigError> for CodecError {
    fn from(e: ConfigError) -> Self {
        CodecError::Config(e)
    }
}

impl From<DocumentError> for CodecError {
    fn from(e: DocumentError) -> Self {
        CodecError::Document(e)
    }
}

impl From<CryptoError> for CodecError {
    fn from(e: CryptoError) -> Self {
        match e {
            // Local setup problems, not properties of the received data.
            CryptoError::InvalidKeyLen { .. }
            | CryptoError::SealFailed(_)
            | CryptoError::Random(_)
            | CryptoError::Kdf(_) => CodecError::Crypto(e),
            // Anything wrong with a received record is indistinguishable
            // from a wrong key.
            other => CodecError::AuthenticationFailed(other.to_string()),
        }
    }
}

impl From<EnvelopeError> for CodecError {
    fn from(e: EnvelopeError) -> Self {
        match e {
            EnvelopeError::IntegrityMismatch => CodecError::IntegrityMismatch,
            EnvelopeError::Expired { expires_at, now } => CodecError::Expired { expires_at, now },
            EnvelopeError::Crypto(inner) => CodecError::from(inner),
            EnvelopeError::PayloadTooLarge { .. }
            | EnvelopeError::SchemaTooLong { .. }
            | EnvelopeError::ZeroTtl => CodecError::InvalidInput(e.to_string()),
            other => CodecError::Malformed(other.to_string()),
        }
    }
}

impl From<FramerError> for CodecError {
    fn from(e: FramerError) -> Self {
        CodecError::ChecksumMismatch(e.to_string())
    }
}

impl From<SyncError> for CodecError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::TooFewFrames { have, need } => CodecError::TooFewFrames { have, need },
            SyncError::MissingMarker(_) => CodecError::NoSyncFound(e.to_string()),
        }
    }
}
