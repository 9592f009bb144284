//! alphabet/mod.rs
//! Fixed bijection between `k`-bit groups and visually distinct symbols,
//! plus the reserved marker symbols used for synchronization.
//!
//! Design notes:
//! - Distance metric: squared Euclidean distance over RGB channels (exact u32).
//! - Classification is a linear scan; alphabets hold at most 16 data symbols
//!   and three markers.
//! - Tie-break: data symbols in definition order, then markers in
//!   `Start, End, Auth` order. The first symbol at the minimum distance wins.
//! - Markers take part in the scan, so a marker observed inline is reported
//!   as `SymbolClass::Marker` instead of a silent default bit group.

pub mod types;
pub mod palette;

pub use types::*;
pub use palette::*;

use crate::constants::ALLOWED_ALPHABET_SIZES;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolAlphabet {
    data: Vec<Rgb>,
    markers: MarkerSet,
    bits_per_symbol: u8,
    min_separation: u32,
}

impl SymbolAlphabet {
    /// Build an alphabet and verify the pairwise separation invariant.
    ///
    /// # Errors
    /// - `InvalidSize` if `data.len()` is not a supported power of two.
    /// - `TooClose` if any two symbols (markers included) are closer than
    ///   `min_separation`.
    pub fn new(data: Vec<Rgb>, markers: MarkerSet, min_separation: u32) -> Result<Self, AlphabetError> {
        if !ALLOWED_ALPHABET_SIZES.contains(&data.len()) {
            return Err(AlphabetError::InvalidSize {
                size: data.len(),
                allowed: ALLOWED_ALPHABET_SIZES,
            });
        }
        if min_separation == 0 {
            return Err(AlphabetError::ZeroSeparation);
        }

        let alphabet = Self {
            bits_per_symbol: data.len().trailing_zeros() as u8,
            data,
            markers,
            min_separation,
        };
        alphabet.verify_separation()?;
        Ok(alphabet)
    }

    pub fn from_palette(palette: Palette, min_separation: u32) -> Result<Self, AlphabetError> {
        Self::new(palette.colors().to_vec(), MarkerSet::default(), min_separation)
    }

    fn labelled(&self) -> Vec<(String, Rgb)> {
        let mut all: Vec<(String, Rgb)> = self
            .data
            .iter()
            .enumerate()
            .map(|(i, c)| (format!("data[{}]={}", i, c), *c))
            .collect();
        for kind in MarkerKind::ORDER {
            let c = self.markers.get(kind);
            all.push((format!("{}={}", kind, c), c));
        }
        all
    }

    fn verify_separation(&self) -> Result<(), AlphabetError> {
        let min_sq = (self.min_separation as u64) * (self.min_separation as u64);
        let all = self.labelled();
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                let d = all[i].1.distance_sq(&all[j].1);
                if (d as u64) < min_sq {
                    return Err(AlphabetError::TooClose {
                        a: all[i].0.clone(),
                        b: all[j].0.clone(),
                        distance: (d as f64).sqrt(),
                        min: self.min_separation,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of data symbols (`2^k`).
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Bits carried per data symbol (`k`).
    #[inline]
    pub fn bits_per_symbol(&self) -> u8 {
        self.bits_per_symbol
    }

    #[inline]
    pub fn min_separation(&self) -> u32 {
        self.min_separation
    }

    pub fn data_symbols(&self) -> &[Rgb] {
        &self.data
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    #[inline]
    pub fn marker(&self, kind: MarkerKind) -> Rgb {
        self.markers.get(kind)
    }

    /// Map a bit group to its symbol. Total over `[0, 2^k)`; bits above `k`
    /// are masked off.
    #[inline]
    pub fn symbol_for(&self, bits: BitGroup) -> Rgb {
        let mask = (self.data.len() - 1) as u8;
        self.data[(bits.value() & mask) as usize]
    }

    /// Nearest-neighbor classification against data symbols and markers.
    pub fn classify(&self, observed: Rgb) -> SymbolMatch {
        let mut best_class = SymbolClass::Data(BitGroup(0));
        let mut best = u32::MAX;

        for (i, symbol) in self.data.iter().enumerate() {
            let d = observed.distance_sq(symbol);
            if d < best {
                best = d;
                best_class = SymbolClass::Data(BitGroup(i as u8));
            }
        }
        for kind in MarkerKind::ORDER {
            let d = observed.distance_sq(&self.markers.get(kind));
            if d < best {
                best = d;
                best_class = SymbolClass::Marker(kind);
            }
        }

        SymbolMatch {
            class: best_class,
            distance_sq: best,
            within_tolerance: true,
        }
    }

    /// Classify and flag whether the match lies within `tolerance`
    /// (Euclidean units). Never fails; trust is the caller's decision.
    pub fn bits_for(&self, observed: Rgb, tolerance: u32) -> SymbolMatch {
        let mut m = self.classify(observed);
        let tol_sq = (tolerance as u64) * (tolerance as u64);
        m.within_tolerance = (m.distance_sq as u64) <= tol_sq;
        m
    }

    /// Smallest Euclidean distance between any two symbols, markers included.
    pub fn min_pairwise_distance(&self) -> f64 {
        let all = self.labelled();
        let mut min = u32::MAX;
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                min = min.min(all[i].1.distance_sq(&all[j].1));
            }
        }
        (min as f64).sqrt()
    }
}
