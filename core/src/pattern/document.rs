//! pattern/document.rs
//! JSON form of an encoded pattern, for handing a sequence to a separate
//! renderer or decoder process.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::CipherSuite;
use crate::envelope::SecurityLevel;
use crate::framing::Frame;
use crate::pattern::info::{pattern_hash, InfoSource, PatternInfo};
use crate::session::Timestamp;

/// Field names are stable; each frame serializes as a `g x g` array of
/// `[r, g, b]` triples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternDocument {
    pub frames: Vec<Frame>,
    pub frame_duration: f64,
    pub total_frames: usize,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub security_level: SecurityLevel,
    pub pattern_id: String,
    pub sequence_number: u64,
    pub cipher_suite: CipherSuite,
    /// Must equal `pattern_hash(&frames)`.
    pub pattern_hash: String,
}

impl PatternDocument {
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and check shape. Square grids are enforced per frame during
    /// deserialization; this adds the cross-field checks.
    pub fn from_json(s: &str) -> Result<Self, DocumentError> {
        let doc: PatternDocument = serde_json::from_str(s)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.total_frames != self.frames.len() {
            return Err(DocumentError::FrameCountMismatch {
                declared: self.total_frames,
                actual: self.frames.len(),
            });
        }
        if let Some(first) = self.frames.first() {
            let size = first.size();
            if let Some((index, f)) = self.frames.iter().enumerate().find(|(_, f)| f.size() != size) {
                return Err(DocumentError::InconsistentGrid { index, expected: size, actual: f.size() });
            }
        }
        if !(self.frame_duration.is_finite() && self.frame_duration > 0.0) {
            return Err(DocumentError::InvalidFrameDuration(self.frame_duration));
        }
        let computed = pattern_hash(&self.frames);
        if computed != self.pattern_hash {
            return Err(DocumentError::HashMismatch { declared: self.pattern_hash.clone(), computed });
        }
        Ok(())
    }

    pub fn info(&self, now: Timestamp) -> PatternInfo {
        PatternInfo::build(
            InfoSource {
                pattern_id: &self.pattern_id,
                sequence_number: self.sequence_number,
                security_level: self.security_level,
                cipher_suite: self.cipher_suite,
                total_frames: self.total_frames,
                frame_duration: self.frame_duration,
                created_at: self.created_at,
                expires_at: self.expires_at,
                pattern_hash: &self.pattern_hash,
            },
            now,
        )
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("total_frames is {declared} but {actual} frames present")]
    FrameCountMismatch { declared: usize, actual: usize },

    #[error("frame {index} is {actual}x{actual}, expected {expected}x{expected}")]
    InconsistentGrid { index: usize, expected: usize, actual: usize },

    #[error("frame duration must be positive and finite, got {0}")]
    InvalidFrameDuration(f64),

    #[error("pattern_hash {declared} does not match frames ({computed})")]
    HashMismatch { declared: String, computed: String },
}
