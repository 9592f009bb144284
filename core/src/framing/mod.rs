//! framing/mod.rs
//! Bytes to symbol frames and back.
//!
//! Bit stream: `ciphertext || checksum[4]`, read MSB-first, zero-padded to a
//! multiple of `k` bits. One solid frame per `k`-bit group. The decoder
//! derives the byte count from the frame count (`floor(frames * k / 8)`), so
//! no length field is carried.

pub mod types;
pub mod bits;
pub mod encode;
pub mod decode;

pub use types::*;
pub use bits::*;
pub use encode::*;
pub use decode::*;
