//! config.rs
//! Codec configuration and security-level presets.
//!
//! Encoder and decoder must agree on every field except `ttl_secs`,
//! `frame_duration` and `sync_metadata` (the decoder detects metadata on its
//! own). Presets only fill defaults; every field can be overridden.

use std::time::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alphabet::{AlphabetError, MarkerSet, Palette, SymbolAlphabet};
use crate::constants::{
    DEFAULT_MIN_SEPARATION, MAX_GRID_SIZE, MIN_GRID_SIZE, SAMPLE_TOLERANCE_DIVISOR,
};
use crate::crypto::types::{CipherSuite, HkdfPrf};
use crate::envelope::{EnvelopeParams, SecurityLevel};
use crate::utils::ChecksumAlg;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    pub security_level: SecurityLevel,
    /// Cells per frame side.
    pub grid_size: usize,
    pub palette: Palette,
    pub markers: MarkerSet,
    /// Minimum Euclidean distance between any two symbols.
    pub min_separation: u32,
    /// Samples farther than this from their nearest symbol are flagged.
    /// Must stay below half of `min_separation`.
    pub sample_tolerance: u32,
    pub cipher_suite: CipherSuite,
    pub kdf_prf: HkdfPrf,
    pub checksum: ChecksumAlg,
    pub ttl_secs: u64,
    /// Seconds each frame stays on screen. Informational for renderers.
    pub frame_duration: f64,
    /// Emit the auth marker and metadata block.
    pub sync_metadata: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::preset(SecurityLevel::default())
    }
}

impl CodecConfig {
    pub fn preset(level: SecurityLevel) -> Self {
        let (grid_size, palette, min_separation, frame_duration, ttl_secs, sync_metadata) = match level {
            SecurityLevel::Medium   => (3, Palette::Quad,        DEFAULT_MIN_SEPARATION, 0.5, 300, false),
            SecurityLevel::High     => (3, Palette::OctalBright, 100,                    0.4, 180, true),
            SecurityLevel::Ultra    => (4, Palette::OctalPure,   127,                    0.3, 30,  true),
            SecurityLevel::Military => (4, Palette::Hex16,       127,                    0.3, 30,  true),
        };
        let cipher_suite = match level {
            SecurityLevel::Medium | SecurityLevel::High => CipherSuite::Chacha20Poly1305,
            SecurityLevel::Ultra | SecurityLevel::Military => CipherSuite::Aes256Gcm,
        };
        let kdf_prf = match level {
            SecurityLevel::Military => HkdfPrf::Sha512,
            _ => HkdfPrf::Sha256,
        };

        Self {
            security_level: level,
            grid_size,
            palette,
            markers: MarkerSet::default(),
            min_separation,
            sample_tolerance: min_separation / SAMPLE_TOLERANCE_DIVISOR,
            cipher_suite,
            kdf_prf,
            checksum: ChecksumAlg::default(),
            ttl_secs,
            frame_duration,
            sync_metadata,
        }
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: CodecConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges, build the alphabet once to verify separation, then bound
    /// the sample tolerance by it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::InvalidGridSize {
                have: self.grid_size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        if self.ttl_secs == 0 {
            return Err(ConfigError::ZeroTtl);
        }
        if !(self.frame_duration.is_finite() && self.frame_duration > 0.0) {
            return Err(ConfigError::InvalidFrameDuration(self.frame_duration));
        }
        self.alphabet()?;
        // Tolerance balls around symbols stay disjoint.
        if self.sample_tolerance.saturating_mul(2) >= self.min_separation {
            return Err(ConfigError::ToleranceTooWide {
                tolerance: self.sample_tolerance,
                min_separation: self.min_separation,
            });
        }
        Ok(())
    }

    pub fn alphabet(&self) -> Result<SymbolAlphabet, ConfigError> {
        Ok(SymbolAlphabet::new(
            self.palette.colors().to_vec(),
            self.markers,
            self.min_separation,
        )?)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn envelope_params(&self) -> EnvelopeParams {
        EnvelopeParams {
            ttl: self.ttl(),
            security_level: self.security_level,
            kdf_prf: self.kdf_prf,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size {have} out of range {min}..={max}")]
    InvalidGridSize { have: usize, min: usize, max: usize },

    #[error("ttl must be at least one second")]
    ZeroTtl,

    #[error("frame duration must be positive and finite, got {0}")]
    InvalidFrameDuration(f64),

    #[error("sample tolerance {tolerance} must be below half the minimum separation {min_separation}")]
    ToleranceTooWide { tolerance: u32, min_separation: u32 },

    #[error("alphabet: {0}")]
    Alphabet(#[from] AlphabetError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
