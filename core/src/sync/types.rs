//! sync/types.rs
//! Frame sequence, sync metadata and sync errors.

use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::CHECKSUM_LEN;
use crate::framing::Frame;
use crate::session::Timestamp;

/// Complete displayable sequence:
/// `[start, (auth, metadata...)?, data..., end]`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    metadata_frames: usize,
    /// Seconds each frame is displayed.
    pub frame_duration: f64,
}

impl FrameSequence {
    pub(crate) fn from_parts(frames: Vec<Frame>, metadata_frames: usize, frame_duration: f64) -> Self {
        debug_assert!(frames.len() >= 2 + metadata_frames);
        Self { frames, metadata_frames, frame_duration }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    pub fn total_frames(&self) -> usize {
        self.frames.len()
    }

    /// Display time of the whole sequence in seconds.
    pub fn display_secs(&self) -> f64 {
        self.frames.len() as f64 * self.frame_duration
    }

    /// Auth marker plus metadata symbols; 0 when metadata is off.
    pub fn metadata_frames(&self) -> usize {
        self.metadata_frames
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata_frames > 0
    }

    /// Frames that are not payload: both markers plus the metadata block.
    pub fn overhead_frames(&self) -> usize {
        2 + self.metadata_frames
    }

    pub fn data_frames(&self) -> &[Frame] {
        &self.frames[1 + self.metadata_frames..self.frames.len() - 1]
    }
}

/// Advisory 24-bit block carried after the auth marker: the low 16 bits of
/// the creation time in seconds and the first framer checksum byte.
///
/// Not authenticated; only the AEAD and the envelope tag are authoritative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMetadata {
    pub coarse_time: u16,
    pub checksum_hint: u8,
}

impl SyncMetadata {
    pub fn new(created_at: Timestamp, checksum: &[u8; CHECKSUM_LEN]) -> Self {
        Self {
            coarse_time: (created_at.as_secs() & 0xFFFF) as u16,
            checksum_hint: checksum[0],
        }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        let t = self.coarse_time.to_be_bytes();
        [t[0], t[1], self.checksum_hint]
    }

    pub fn from_bytes(b: [u8; 3]) -> Self {
        Self {
            coarse_time: u16::from_be_bytes([b[0], b[1]]),
            checksum_hint: b[2],
        }
    }

    /// Compare against authenticated values. Empty when consistent.
    pub fn check(&self, created_at: Timestamp, checksum: &[u8; CHECKSUM_LEN]) -> Vec<SyncAnomaly> {
        let expected = SyncMetadata::new(created_at, checksum);
        let mut out = Vec::new();
        if self.coarse_time != expected.coarse_time {
            out.push(SyncAnomaly::TimeMismatch {
                embedded: self.coarse_time,
                expected: expected.coarse_time,
            });
        }
        if self.checksum_hint != expected.checksum_hint {
            out.push(SyncAnomaly::ChecksumHintMismatch {
                embedded: self.checksum_hint,
                expected: expected.checksum_hint,
            });
        }
        out
    }
}

/// Non-fatal findings reported alongside a successful decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAnomaly {
    TimeMismatch { embedded: u16, expected: u16 },
    ChecksumHintMismatch { embedded: u8, expected: u8 },
    /// A metadata slot classified as a marker.
    MetadataUnreadable,
    /// Samples matched only outside the configured tolerance.
    UntrustedSamples { count: usize },
}

impl fmt::Display for SyncAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAnomaly::TimeMismatch { embedded, expected } => {
                write!(f, "metadata time {embedded} != envelope time {expected}")
            }
            SyncAnomaly::ChecksumHintMismatch { embedded, expected } => {
                write!(f, "metadata checksum hint {embedded:#04x} != {expected:#04x}")
            }
            SyncAnomaly::MetadataUnreadable => f.write_str("metadata block unreadable"),
            SyncAnomaly::UntrustedSamples { count } => write!(f, "{count} samples outside tolerance"),
        }
    }
}

/// Result of locating the data run in an observed sequence.
#[derive(Debug)]
pub struct SyncWindow<'a, T> {
    pub start_index: usize,
    pub end_index: usize,
    pub metadata: Option<SyncMetadata>,
    pub metadata_unreadable: bool,
    pub data: &'a [T],
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("too few frames: have {have}, need at least {need}")]
    TooFewFrames { have: usize, need: usize },

    #[error("no {0} marker found")]
    MissingMarker(&'static str),
}
