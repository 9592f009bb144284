//! alphabet/types.rs
//! Symbol value types and classification results.

use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One symbol value in the alphabet's coordinate space (8-bit RGB).
///
/// Serialized as a bare `[r, g, b]` array so persisted patterns stay compact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const GRAY: Rgb  = Rgb::new(128, 128, 128);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance over the three channels.
    /// Exact integer arithmetic; max value is 3 * 255^2.
    #[inline]
    pub fn distance_sq(&self, other: &Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    #[inline]
    pub fn distance(&self, other: &Rgb) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(v: [u8; 3]) -> Self {
        Rgb::new(v[0], v[1], v[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        c.to_array()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Reserved structural symbols. Never carry payload bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Start,
    End,
    Auth,
}

impl MarkerKind {
    /// Tie-break order used by classification.
    pub const ORDER: [MarkerKind; 3] = [MarkerKind::Start, MarkerKind::End, MarkerKind::Auth];
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarkerKind::Start => "start",
            MarkerKind::End   => "end",
            MarkerKind::Auth  => "auth",
        };
        f.write_str(name)
    }
}

/// Marker colors. Defaults follow the display convention: white opens,
/// black closes, gray announces metadata.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSet {
    pub start: Rgb,
    pub end: Rgb,
    pub auth: Rgb,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            start: Rgb::WHITE,
            end: Rgb::BLACK,
            auth: Rgb::GRAY,
        }
    }
}

impl MarkerSet {
    #[inline]
    pub fn get(&self, kind: MarkerKind) -> Rgb {
        match kind {
            MarkerKind::Start => self.start,
            MarkerKind::End   => self.end,
            MarkerKind::Auth  => self.auth,
        }
    }
}

/// A `k`-bit group, right-aligned in a byte (`k <= 4`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitGroup(pub u8);

impl BitGroup {
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// What an observed sample was classified as.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SymbolClass {
    Data(BitGroup),
    Marker(MarkerKind),
}

impl SymbolClass {
    pub fn is_marker(&self, kind: MarkerKind) -> bool {
        matches!(self, SymbolClass::Marker(k) if *k == kind)
    }

    pub fn bits(&self) -> Option<BitGroup> {
        match self {
            SymbolClass::Data(bits) => Some(*bits),
            SymbolClass::Marker(_)  => None,
        }
    }
}

/// Best-effort nearest-neighbor result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SymbolMatch {
    pub class: SymbolClass,
    /// Squared distance from the observed sample to the matched symbol.
    pub distance_sq: u32,
    /// `true` when the match sits within the caller's tolerance radius.
    pub within_tolerance: bool,
}

#[derive(Debug, Error)]
pub enum AlphabetError {
    /// Data alphabet size must be one of the supported powers of two.
    #[error("invalid alphabet size: {size} (allowed: {allowed:?})")]
    InvalidSize { size: usize, allowed: &'static [usize] },

    /// Two symbols are closer than the configured discrimination threshold.
    #[error("symbols {a} and {b} are {distance:.1} apart, minimum separation is {min}")]
    TooClose { a: String, b: String, distance: f64, min: u32 },

    /// Threshold of zero would allow identical symbols.
    #[error("minimum separation must be non-zero")]
    ZeroSeparation,
}
