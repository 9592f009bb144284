//! framing/types.rs
//! Frame grid, observed-sample abstraction and framer errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alphabet::{MarkerKind, Rgb};
use crate::constants::{CHECKSUM_LEN, MAX_GRID_SIZE, MIN_GRID_SIZE};
use crate::utils::fmt_bytes;

/// A `g x g` grid of symbol values, displayed for one frame duration.
///
/// Encoders always emit solid frames. Observed frames may be non-uniform;
/// `representative` collapses them to one sample.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Rgb>>", into = "Vec<Vec<Rgb>>")]
pub struct Frame {
    size: usize,
    /// Row-major, `size * size` cells.
    cells: Vec<Rgb>,
}

impl Frame {
    /// Every cell set to `symbol`. `size` is clamped to the supported grid range.
    pub fn solid(symbol: Rgb, size: usize) -> Self {
        let size = size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        Self {
            size,
            cells: vec![symbol; size * size],
        }
    }

    pub fn from_rows(rows: Vec<Vec<Rgb>>) -> Result<Self, FramerError> {
        let size = rows.len();
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(FramerError::InvalidGrid { rows: size, cols: 0 });
        }
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(FramerError::InvalidGrid { rows: size, cols: row.len() });
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Rgb> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    pub fn rows(&self) -> Vec<Vec<Rgb>> {
        self.cells.chunks(self.size).map(<[Rgb]>::to_vec).collect()
    }

    pub fn is_uniform(&self) -> bool {
        self.cells.windows(2).all(|w| w[0] == w[1])
    }

    /// Per-channel median over all cells. Equals the cell value for solid
    /// frames; tolerates a minority of corrupted cells.
    pub fn representative(&self) -> Rgb {
        let n = self.cells.len();
        let mut rs = Vec::with_capacity(n);
        let mut gs = Vec::with_capacity(n);
        let mut bs = Vec::with_capacity(n);
        for c in &self.cells {
            rs.push(c.r);
            gs.push(c.g);
            bs.push(c.b);
        }
        rs.sort_unstable();
        gs.sort_unstable();
        bs.sort_unstable();
        let mid = n / 2;
        Rgb::new(rs[mid], gs[mid], bs[mid])
    }
}

impl TryFrom<Vec<Vec<Rgb>>> for Frame {
    type Error = FramerError;

    fn try_from(rows: Vec<Vec<Rgb>>) -> Result<Self, Self::Error> {
        Frame::from_rows(rows)
    }
}

impl From<Frame> for Vec<Vec<Rgb>> {
    fn from(f: Frame) -> Self {
        f.rows()
    }
}

/// Anything the decoder can reduce to one observed symbol value: a full
/// captured frame or an already-sampled color.
pub trait Sample {
    fn sample(&self) -> Rgb;
}

impl Sample for Frame {
    #[inline]
    fn sample(&self) -> Rgb {
        self.representative()
    }
}

impl Sample for Rgb {
    #[inline]
    fn sample(&self) -> Rgb {
        *self
    }
}

impl<T: Sample + ?Sized> Sample for &T {
    #[inline]
    fn sample(&self) -> Rgb {
        (**self).sample()
    }
}

/// Output of `encode_frames`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramedPayload {
    pub frames: Vec<Frame>,
    pub checksum: [u8; CHECKSUM_LEN],
    /// Zero bits appended to the final group.
    pub pad_bits: u8,
}

/// Output of `decode_frames`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeframedPayload {
    pub bytes: Vec<u8>,
    pub checksum: [u8; CHECKSUM_LEN],
    /// Samples that matched their symbol only outside the sample tolerance.
    pub untrusted_samples: usize,
}

#[derive(Debug, Error)]
pub enum FramerError {
    #[error("invalid frame grid: {rows} rows, row of {cols} cells")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("{marker} marker inside data run at index {index}")]
    UnexpectedMarker { index: usize, marker: MarkerKind },

    #[error("{leftover_bits} leftover bits for {symbol_bits}-bit symbols")]
    PaddingOverflow { leftover_bits: u8, symbol_bits: u8 },

    #[error("{bits} padding bits are not zero")]
    NonZeroPadding { bits: u8 },

    #[error("data run too short: {have} bytes, need at least {need}")]
    Truncated { have: usize, need: usize },

    #[error("checksum mismatch: expected {}, computed {}", fmt_bytes(expected), fmt_bytes(computed))]
    ChecksumMismatch { expected: [u8; CHECKSUM_LEN], computed: [u8; CHECKSUM_LEN] },
}
