//! rpattern-core
//!
//! Encodes a short string into a time-limited, authenticated sequence of
//! color frames and decodes observed frames back into the string.
//! Pure Rust, no async runtime, no FFI.
//!
//! Layers, outermost first: sync markers, symbol framing, AEAD ciphertext,
//! integrity-tagged envelope, payload.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

// Layers
pub mod alphabet;
pub mod session;
pub mod envelope;
pub mod crypto;
pub mod framing;
pub mod sync;

// Public API
pub mod pattern;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::alphabet::{MarkerKind, Palette, Rgb, SymbolAlphabet};
    pub use crate::config::CodecConfig;
    pub use crate::crypto::{CipherSuite, HkdfPrf, MasterKey};
    pub use crate::envelope::{Envelope, SecurityLevel};
    pub use crate::framing::{Frame, Sample};
    pub use crate::pattern::{
        DecodeOutcome, EncodedPattern, PatternDecoder, PatternDocument, PatternEncoder, PatternInfo,
    };
    pub use crate::session::{Session, SessionId, Timestamp};
    pub use crate::sync::{FrameSequence, SyncAnomaly};
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::CodecError;
    pub use crate::utils::ChecksumAlg;
}
