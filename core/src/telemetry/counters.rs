// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters collected during one encode or decode.
//!
//! Summary: frame counts by role and byte counts per layer.
//! Converted into an immutable TelemetrySnapshot at the end of the call.
use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub frames_data: u64,
    pub frames_marker: u64,
    pub frames_metadata: u64,
    /// Observed samples outside the marker window (decode only).
    pub frames_ignored: u64,
    /// Samples matched outside tolerance (decode only).
    pub samples_untrusted: u64,
    pub bytes_payload: u64,
    pub bytes_envelope: u64,
    pub bytes_ciphertext: u64,
    pub bytes_checksum: u64,
    pub bits_padding: u64,
}

impl TelemetryCounters {
    /// Record the layer sizes of one pattern.
    pub fn add_bytes(&mut self, payload_len: usize, envelope_len: usize, ciphertext_len: usize) {
        self.bytes_payload += payload_len as u64;
        self.bytes_envelope += envelope_len as u64;
        self.bytes_ciphertext += ciphertext_len as u64;
    }

    /// Record a frame sequence: data run plus structural frames.
    ///
    /// - `data`: frames carrying ciphertext bits
    /// - `metadata`: auth marker plus metadata symbols (0 when absent)
    pub fn add_sequence(&mut self, data: usize, metadata: usize) {
        self.frames_data += data as u64;
        self.frames_marker += 2 + metadata.min(1) as u64;
        self.frames_metadata += metadata.saturating_sub(1) as u64;
    }

    /// Record the framer trailer: checksum bytes and zero pad bits.
    pub fn add_framing(&mut self, checksum_len: usize, pad_bits: u8) {
        self.bytes_checksum += checksum_len as u64;
        self.bits_padding += pad_bits as u64;
    }

    pub fn add_ignored(&mut self, n: usize) {
        self.frames_ignored += n as u64;
    }

    pub fn add_untrusted(&mut self, n: usize) {
        self.samples_untrusted += n as u64;
    }

    pub fn total_frames(&self) -> u64 {
        self.frames_data + self.frames_marker + self.frames_metadata
    }

    /// Frames that carry no ciphertext bits.
    pub fn overhead_frames(&self) -> u64 {
        self.frames_marker + self.frames_metadata
    }
}
