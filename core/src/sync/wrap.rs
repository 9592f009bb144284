//! sync/wrap.rs

use crate::alphabet::{MarkerKind, SymbolAlphabet};
use crate::framing::{split_bits, Frame};
use crate::sync::types::{FrameSequence, SyncMetadata};

/// Surround the data run with start/end markers and, when `metadata` is
/// given, an auth marker followed by `24 / k` metadata symbols.
pub fn wrap(
    data: Vec<Frame>,
    metadata: Option<&SyncMetadata>,
    alphabet: &SymbolAlphabet,
    grid_size: usize,
    frame_duration: f64,
) -> FrameSequence {
    let marker = |kind: MarkerKind| Frame::solid(alphabet.marker(kind), grid_size);

    let meta_frames: Vec<Frame> = match metadata {
        Some(m) => {
            // 24 bits split evenly for every supported k; no padding.
            let (groups, _) = split_bits(&m.to_bytes(), alphabet.bits_per_symbol());
            std::iter::once(marker(MarkerKind::Auth))
                .chain(groups.into_iter().map(|g| Frame::solid(alphabet.symbol_for(g), grid_size)))
                .collect()
        }
        None => Vec::new(),
    };

    let mut frames = Vec::with_capacity(data.len() + meta_frames.len() + 2);
    frames.push(marker(MarkerKind::Start));
    let metadata_frames = meta_frames.len();
    frames.extend(meta_frames);
    frames.extend(data);
    frames.push(marker(MarkerKind::End));

    FrameSequence::from_parts(frames, metadata_frames, frame_duration)
}
