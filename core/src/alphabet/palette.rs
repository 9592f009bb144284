//! alphabet/palette.rs
//! Built-in data palettes.
//!
//! Each palette lists colors in bit-group order: index `i` carries the bit
//! group `i` (MSB-first). All of them clear the default separation threshold
//! against each other and against the default markers.

use serde::{Deserialize, Serialize};

use crate::alphabet::types::Rgb;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    /// 4 colors, 2 bits per frame.
    Quad,
    /// 8 softened colors, 3 bits per frame.
    OctalBright,
    /// 8 saturated colors, 3 bits per frame.
    OctalPure,
    /// 16 colors on the {0, 128, 255} lattice, 4 bits per frame.
    Hex16,
}

const QUAD: [Rgb; 4] = [
    Rgb::new(255, 0, 0),   // 00 red
    Rgb::new(0, 255, 0),   // 01 green
    Rgb::new(0, 0, 255),   // 10 blue
    Rgb::new(255, 255, 0), // 11 yellow
];

const OCTAL_BRIGHT: [Rgb; 8] = [
    Rgb::new(255, 50, 50),   // 000 red
    Rgb::new(50, 255, 50),   // 001 green
    Rgb::new(50, 50, 255),   // 010 blue
    Rgb::new(255, 255, 50),  // 011 yellow
    Rgb::new(255, 50, 255),  // 100 magenta
    Rgb::new(50, 255, 255),  // 101 cyan
    Rgb::new(255, 150, 50),  // 110 orange
    Rgb::new(150, 50, 255),  // 111 purple
];

const OCTAL_PURE: [Rgb; 8] = [
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 128, 0),
    Rgb::new(128, 0, 255),
];

// White, black and mid gray are left out: they are the default markers.
const HEX16: [Rgb; 16] = [
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 128, 0),
    Rgb::new(128, 0, 255),
    Rgb::new(0, 128, 255),
    Rgb::new(255, 0, 128),
    Rgb::new(128, 255, 0),
    Rgb::new(0, 255, 128),
    Rgb::new(128, 0, 0),
    Rgb::new(0, 128, 0),
    Rgb::new(0, 0, 128),
    Rgb::new(128, 128, 0),
];

impl Palette {
    pub fn colors(self) -> &'static [Rgb] {
        match self {
            Palette::Quad        => &QUAD,
            Palette::OctalBright => &OCTAL_BRIGHT,
            Palette::OctalPure   => &OCTAL_PURE,
            Palette::Hex16       => &HEX16,
        }
    }

    pub fn len(self) -> usize {
        self.colors().len()
    }
}
