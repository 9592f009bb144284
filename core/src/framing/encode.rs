//! framing/encode.rs
//! Ciphertext bytes to data frames.

use tracing::trace;

use crate::alphabet::SymbolAlphabet;
use crate::framing::bits::split_bits;
use crate::framing::types::{Frame, FramedPayload};
use crate::utils::{compute_checksum, ChecksumAlg};

/// Append a checksum to `ciphertext`, split the bit stream into
/// `alphabet.bits_per_symbol()` groups and emit one solid frame per group.
///
/// Total over all inputs, empty included: the checksum alone always yields
/// at least one frame.
pub fn encode_frames(
    ciphertext: &[u8],
    alphabet: &SymbolAlphabet,
    grid_size: usize,
    checksum_alg: ChecksumAlg,
) -> FramedPayload {
    let checksum = compute_checksum(ciphertext, checksum_alg);

    let mut stream = Vec::with_capacity(ciphertext.len() + checksum.len());
    stream.extend_from_slice(ciphertext);
    stream.extend_from_slice(&checksum);

    let (groups, pad_bits) = split_bits(&stream, alphabet.bits_per_symbol());
    let frames: Vec<Frame> = groups
        .into_iter()
        .map(|g| Frame::solid(alphabet.symbol_for(g), grid_size))
        .collect();

    trace!(
        bytes = stream.len(),
        frames = frames.len(),
        pad_bits,
        "framed ciphertext"
    );

    FramedPayload { frames, checksum, pad_bits }
}
