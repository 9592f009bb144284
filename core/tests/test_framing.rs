// It is designed to validate correctness and error behavior across:

// * `split_bits` / `join_bits`
// * `encode_frames`
// * `decode_frames`
// * `Frame` grid handling

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rpattern_core::alphabet::{BitGroup, MarkerKind, Palette, Rgb, SymbolAlphabet};
    use rpattern_core::constants::{CHECKSUM_LEN, DEFAULT_MIN_SEPARATION};
    use rpattern_core::framing::{
        decode_frames, encode_frames, group_count, join_bits, split_bits, Frame, FramerError, Sample,
    };
    use rpattern_core::utils::ChecksumAlg;

    fn quad() -> SymbolAlphabet {
        SymbolAlphabet::from_palette(Palette::Quad, DEFAULT_MIN_SEPARATION).unwrap()
    }

    fn octal() -> SymbolAlphabet {
        SymbolAlphabet::from_palette(Palette::OctalBright, 100).unwrap()
    }

// # ✅ 1. Bit packing

    #[test]
    fn split_is_msb_first() {
        let (groups, pad) = split_bits(&[0b1011_0010], 2);
        assert_eq!(groups, vec![BitGroup(0b10), BitGroup(0b11), BitGroup(0b00), BitGroup(0b10)]);
        assert_eq!(pad, 0);
    }

    #[test]
    fn split_pads_last_group_with_zeros() {
        // 8 bits into 3-bit groups: 101|100|10+0
        let (groups, pad) = split_bits(&[0b1011_0010], 3);
        assert_eq!(groups, vec![BitGroup(0b101), BitGroup(0b100), BitGroup(0b100)]);
        assert_eq!(pad, 1);
        assert_eq!(join_bits(&groups, 3).unwrap(), vec![0b1011_0010]);
    }

    #[test]
    fn join_rejects_nonzero_padding() {
        let groups = vec![BitGroup(0b101), BitGroup(0b100), BitGroup(0b101)];
        assert!(matches!(join_bits(&groups, 3), Err(FramerError::NonZeroPadding { bits: 1 })));
    }

    #[test]
    fn join_rejects_extra_group() {
        // 4 groups of 3 bits = 12 bits: 4 leftover >= k
        let groups = vec![BitGroup(0); 4];
        assert!(matches!(join_bits(&groups, 3), Err(FramerError::PaddingOverflow { .. })));
    }

    #[test]
    fn group_count_matches_split() {
        for k in 1..=4u8 {
            for n in 0..20usize {
                let (groups, _) = split_bits(&vec![0xA5; n], k);
                assert_eq!(groups.len(), group_count(n, k));
            }
        }
    }

// # ✅ 2. Frames

    #[test]
    fn solid_frame_representative_is_its_color() {
        let f = Frame::solid(Rgb::new(1, 2, 3), 3);
        assert_eq!(f.size(), 3);
        assert_eq!(f.cells().len(), 9);
        assert!(f.is_uniform());
        assert_eq!(f.sample(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn representative_survives_minority_corruption() {
        let red = Rgb::new(255, 0, 0);
        let mut rows = Frame::solid(red, 3).rows();
        rows[0][0] = Rgb::WHITE;
        rows[1][1] = Rgb::BLACK;
        rows[2][2] = Rgb::new(0, 0, 255);
        let f = Frame::from_rows(rows).unwrap();
        assert!(!f.is_uniform());
        assert_eq!(f.representative(), red);
    }

    #[test]
    fn from_rows_rejects_non_square() {
        let rows = vec![vec![Rgb::BLACK; 3], vec![Rgb::BLACK; 2], vec![Rgb::BLACK; 3]];
        assert!(matches!(Frame::from_rows(rows), Err(FramerError::InvalidGrid { .. })));
        assert!(Frame::from_rows(Vec::new()).is_err());
    }

    #[test]
    fn frame_serializes_as_nested_arrays() {
        let f = Frame::solid(Rgb::new(9, 8, 7), 2);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, "[[[9,8,7],[9,8,7]],[[9,8,7],[9,8,7]]]");
        let back: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
        assert!(serde_json::from_str::<Frame>("[[[1,2,3]],[[1,2,3]]]").is_err());
    }

// # ✅ 3. Encode / decode

    #[test]
    fn frame_count_is_ceil_of_bits() {
        for alphabet in [quad(), octal()] {
            let k = alphabet.bits_per_symbol() as usize;
            for len in [0usize, 1, 7, 33, 100] {
                let framed = encode_frames(&vec![0x5A; len], &alphabet, 3, ChecksumAlg::Sha256);
                let bits = (len + CHECKSUM_LEN) * 8;
                assert_eq!(framed.frames.len(), (bits + k - 1) / k);
                assert_eq!(framed.pad_bits as usize, framed.frames.len() * k - bits);
            }
        }
    }

    #[test]
    fn decode_recovers_bytes_for_all_checksums() {
        let data = b"\x00\x01\x02 ciphertext \xFF\xFE";
        for alg in [ChecksumAlg::Crc32, ChecksumAlg::Sha256, ChecksumAlg::Blake3] {
            let framed = encode_frames(data, &octal(), 3, alg);
            let out = decode_frames(&framed.frames, &octal(), alg, 60).unwrap();
            assert_eq!(out.bytes, data);
            assert_eq!(out.checksum, framed.checksum);
            assert_eq!(out.untrusted_samples, 0);
        }
    }

    #[test]
    fn empty_input_still_frames_checksum() {
        let framed = encode_frames(&[], &quad(), 3, ChecksumAlg::Sha256);
        assert_eq!(framed.frames.len(), CHECKSUM_LEN * 8 / 2);
        let out = decode_frames(&framed.frames, &quad(), ChecksumAlg::Sha256, 60).unwrap();
        assert!(out.bytes.is_empty());
    }

    #[test]
    fn wrong_symbol_is_caught_by_checksum() {
        let a = quad();
        let framed = encode_frames(b"payload bytes", &a, 3, ChecksumAlg::Sha256);
        let mut frames = framed.frames.clone();
        let current = a.classify(frames[5].sample()).class.bits().unwrap();
        frames[5] = Frame::solid(a.symbol_for(BitGroup(current.value() ^ 1)), 3);
        assert!(matches!(
            decode_frames(&frames, &a, ChecksumAlg::Sha256, 60),
            Err(FramerError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn marker_inside_data_run_is_an_error() {
        let a = quad();
        let mut samples: Vec<Rgb> = encode_frames(b"abc", &a, 1, ChecksumAlg::Crc32)
            .frames
            .iter()
            .map(|f| f.sample())
            .collect();
        samples[2] = a.marker(MarkerKind::End);
        assert!(matches!(
            decode_frames(&samples, &a, ChecksumAlg::Crc32, 60),
            Err(FramerError::UnexpectedMarker { index: 2, marker: MarkerKind::End })
        ));
    }

    #[test]
    fn too_short_run_is_truncated() {
        let a = quad();
        let frames = vec![Frame::solid(a.symbol_for(BitGroup(0)), 1); 4]; // 1 byte
        assert!(matches!(
            decode_frames(&frames, &a, ChecksumAlg::Sha256, 60),
            Err(FramerError::Truncated { have: 1, .. })
        ));
    }

    #[test]
    fn off_palette_samples_are_counted_untrusted() {
        let a = octal();
        let framed = encode_frames(b"xyz", &a, 1, ChecksumAlg::Sha256);
        let samples: Vec<Rgb> = framed
            .frames
            .iter()
            .map(|f| {
                let c = f.sample();
                Rgb::new(c.r.saturating_sub(25), c.g.saturating_add(25), c.b)
            })
            .collect();
        let out = decode_frames(&samples, &a, ChecksumAlg::Sha256, 10).unwrap();
        assert_eq!(out.bytes, b"xyz");
        assert!(out.untrusted_samples > 0);
    }

    proptest! {
        #[test]
        fn prop_split_join_inverse(bytes in proptest::collection::vec(any::<u8>(), 0..64), k in 1u8..=4) {
            let (groups, pad) = split_bits(&bytes, k);
            prop_assert!(pad < k);
            prop_assert_eq!(join_bits(&groups, k).unwrap(), bytes);
        }
    }
}
