//! framing/decode.rs
//! Observed data-run samples back to ciphertext bytes.

use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::alphabet::{BitGroup, SymbolAlphabet, SymbolClass};
use crate::constants::CHECKSUM_LEN;
use crate::framing::bits::join_bits;
use crate::framing::types::{DeframedPayload, FramerError, Sample};
use crate::utils::{compute_checksum, ChecksumAlg};

/// Classify each sample, rebuild the bit stream and verify the checksum.
///
/// `observed` must be the data run only (markers and metadata stripped by
/// the sync layer). A marker here means the run boundaries are wrong.
///
/// # Errors
/// - `UnexpectedMarker` if any sample is nearest to a marker.
/// - `PaddingOverflow` / `NonZeroPadding` if the group count or trailing
///   bits cannot come from `encode_frames`.
/// - `Truncated` if fewer than `CHECKSUM_LEN` bytes were recovered.
/// - `ChecksumMismatch` if the trailing checksum does not match.
pub fn decode_frames<T: Sample>(
    observed: &[T],
    alphabet: &SymbolAlphabet,
    checksum_alg: ChecksumAlg,
    tolerance: u32,
) -> Result<DeframedPayload, FramerError> {
    let mut groups: Vec<BitGroup> = Vec::with_capacity(observed.len());
    let mut untrusted = 0usize;

    for (index, item) in observed.iter().enumerate() {
        let m = alphabet.bits_for(item.sample(), tolerance);
        if !m.within_tolerance {
            untrusted += 1;
        }
        match m.class {
            SymbolClass::Data(bits) => groups.push(bits),
            SymbolClass::Marker(marker) => {
                return Err(FramerError::UnexpectedMarker { index, marker });
            }
        }
    }
    if untrusted > 0 {
        warn!(untrusted, total = observed.len(), "samples outside tolerance");
    }

    let mut stream = join_bits(&groups, alphabet.bits_per_symbol())?;
    if stream.len() < CHECKSUM_LEN {
        return Err(FramerError::Truncated { have: stream.len(), need: CHECKSUM_LEN });
    }

    let split = stream.len() - CHECKSUM_LEN;
    let mut checksum = [0u8; CHECKSUM_LEN];
    checksum.copy_from_slice(&stream[split..]);
    stream.truncate(split);

    let computed = compute_checksum(&stream, checksum_alg);
    if !bool::from(computed[..].ct_eq(&checksum[..])) {
        return Err(FramerError::ChecksumMismatch { expected: checksum, computed });
    }

    debug!(frames = observed.len(), bytes = stream.len(), "data run decoded");
    Ok(DeframedPayload {
        bytes: stream,
        checksum,
        untrusted_samples: untrusted,
    })
}
