//! sync/unwrap.rs

use tracing::{debug, warn};

use crate::alphabet::{BitGroup, MarkerKind, SymbolAlphabet, SymbolClass};
use crate::constants::SYNC_METADATA_BITS;
use crate::framing::{join_bits, Sample};
use crate::sync::types::{SyncError, SyncMetadata, SyncWindow};

/// Smallest sequence that can carry anything: start, one data frame, end.
pub const MIN_SEQUENCE_FRAMES: usize = 3;

/// Locate the first start marker and the first end marker after it, strip
/// the optional auth/metadata block and return the data run in between.
///
/// Samples before the start marker and after the end marker are ignored.
///
/// # Errors
/// - `TooFewFrames` if the input is shorter than 3 samples, the data run is
///   empty, or the metadata block is cut short.
/// - `MissingMarker` if no start marker, or no end marker after it, exists.
pub fn unwrap<'a, T: Sample>(
    observed: &'a [T],
    alphabet: &SymbolAlphabet,
) -> Result<SyncWindow<'a, T>, SyncError> {
    if observed.len() < MIN_SEQUENCE_FRAMES {
        return Err(SyncError::TooFewFrames { have: observed.len(), need: MIN_SEQUENCE_FRAMES });
    }

    let class_at = |i: usize| alphabet.classify(observed[i].sample()).class;

    let start_index = (0..observed.len())
        .find(|&i| class_at(i).is_marker(MarkerKind::Start))
        .ok_or(SyncError::MissingMarker("start"))?;
    let end_index = (start_index + 1..observed.len())
        .find(|&i| class_at(i).is_marker(MarkerKind::End))
        .ok_or(SyncError::MissingMarker("end"))?;

    let inner = &observed[start_index + 1..end_index];
    let mut metadata = None;
    let mut metadata_unreadable = false;
    let mut data = inner;

    if !inner.is_empty() && class_at(start_index + 1).is_marker(MarkerKind::Auth) {
        let symbols = SYNC_METADATA_BITS / alphabet.bits_per_symbol() as usize;
        let need = 1 + symbols + 1;
        if inner.len() < need {
            return Err(SyncError::TooFewFrames { have: inner.len(), need });
        }

        let groups: Option<Vec<BitGroup>> = inner[1..1 + symbols]
            .iter()
            .map(|s| match alphabet.classify(s.sample()).class {
                SymbolClass::Data(bits) => Some(bits),
                SymbolClass::Marker(_) => None,
            })
            .collect();

        match groups.and_then(|g| join_bits(&g, alphabet.bits_per_symbol()).ok()) {
            Some(bytes) if bytes.len() == 3 => {
                metadata = Some(SyncMetadata::from_bytes([bytes[0], bytes[1], bytes[2]]));
            }
            _ => {
                warn!("sync metadata block unreadable");
                metadata_unreadable = true;
            }
        }
        data = &inner[1 + symbols..];
    }

    if data.is_empty() {
        return Err(SyncError::TooFewFrames { have: 0, need: 1 });
    }

    debug!(
        start_index,
        end_index,
        data_frames = data.len(),
        metadata = metadata.is_some(),
        "sync window located"
    );

    Ok(SyncWindow {
        start_index,
        end_index,
        metadata,
        metadata_unreadable,
        data,
    })
}
