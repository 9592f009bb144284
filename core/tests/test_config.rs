#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rpattern_core::alphabet::{AlphabetError, BitGroup, MarkerKind, Palette, Rgb, SymbolClass};
    use rpattern_core::config::{CodecConfig, ConfigError};
    use rpattern_core::crypto::{CipherSuite, HkdfPrf};
    use rpattern_core::envelope::SecurityLevel;

    const LEVELS: [SecurityLevel; 4] = [
        SecurityLevel::Medium,
        SecurityLevel::High,
        SecurityLevel::Ultra,
        SecurityLevel::Military,
    ];

    #[test]
    fn every_preset_validates() {
        for level in LEVELS {
            let cfg = CodecConfig::preset(level);
            cfg.validate().unwrap();
            assert_eq!(cfg.security_level, level);
            assert_eq!(cfg.alphabet().unwrap().size(), cfg.palette.len());
            assert_eq!(cfg.envelope_params().security_level, level);
            assert_eq!(cfg.envelope_params().ttl.as_secs(), cfg.ttl_secs);
        }
    }

    #[test]
    fn preset_table() {
        let m = CodecConfig::preset(SecurityLevel::Medium);
        assert_eq!((m.grid_size, m.palette, m.ttl_secs, m.sync_metadata), (3, Palette::Quad, 300, false));
        assert_eq!(m.cipher_suite, CipherSuite::Chacha20Poly1305);

        let x = CodecConfig::preset(SecurityLevel::Military);
        assert_eq!((x.grid_size, x.palette, x.ttl_secs, x.sync_metadata), (4, Palette::Hex16, 30, true));
        assert_eq!(x.cipher_suite, CipherSuite::Aes256Gcm);
        assert_eq!(x.kdf_prf, HkdfPrf::Sha512);
        assert_eq!(x.alphabet().unwrap().bits_per_symbol(), 4);
    }

    #[test]
    fn preset_tolerance_is_quarter_separation() {
        for level in LEVELS {
            let cfg = CodecConfig::preset(level);
            assert_eq!(cfg.sample_tolerance, cfg.min_separation / 4, "level {level}");
            assert!(cfg.sample_tolerance * 2 < cfg.min_separation);
        }
    }

    #[test]
    fn drifted_red_read_as_orange_is_untrusted() {
        let cfg = CodecConfig::preset(SecurityLevel::High);
        let a = cfg.alphabet().unwrap();
        // 55 away from red, 45 away from orange.
        let m = a.bits_for(Rgb::new(255, 105, 50), cfg.sample_tolerance);
        assert_eq!(m.class, SymbolClass::Data(BitGroup(6)));
        assert_eq!(m.distance_sq, 45 * 45);
        assert!(!m.within_tolerance);
    }

    #[test]
    fn default_is_high() {
        assert_eq!(CodecConfig::default(), CodecConfig::preset(SecurityLevel::High));
    }

// # ✅ JSON

    #[test]
    fn json_round_trip() {
        let cfg = CodecConfig::preset(SecurityLevel::Ultra);
        let json = cfg.to_json().unwrap();
        assert!(json.contains("\"palette\": \"octal_pure\""));
        assert_eq!(CodecConfig::from_json(&json).unwrap(), cfg);
    }

    #[test]
    fn partial_json_fills_from_default() {
        let cfg = CodecConfig::from_json(
            r#"{ "ttl_secs": 45, "cipher_suite": "aes256_gcm", "checksum": "crc32" }"#,
        )
        .unwrap();
        assert_eq!(cfg.ttl_secs, 45);
        assert_eq!(cfg.cipher_suite, CipherSuite::Aes256Gcm);
        assert_eq!(cfg.grid_size, CodecConfig::default().grid_size);
        assert_eq!(cfg.palette, CodecConfig::default().palette);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = CodecConfig::from_json(r#"{ "grid": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn json_values_are_validated() {
        let err = CodecConfig::from_json(r#"{ "grid_size": 40 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGridSize { have: 40, .. }));
    }

// # ❌ validate

    #[test]
    fn validate_rejects_bad_ranges() {
        let base = CodecConfig::default();

        let cfg = CodecConfig { grid_size: 0, ..base.clone() };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidGridSize { have: 0, .. })));

        let cfg = CodecConfig { ttl_secs: 0, ..base.clone() };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroTtl)));

        for d in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let cfg = CodecConfig { frame_duration: d, ..base.clone() };
            assert!(matches!(cfg.validate(), Err(ConfigError::InvalidFrameDuration(_))));
        }
    }

    #[test]
    fn validate_rejects_crowded_palette() {
        let cfg = CodecConfig { min_separation: 200, ..CodecConfig::default() };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Alphabet(AlphabetError::TooClose { .. })));
        assert!(err.to_string().contains("alphabet"));

        let cfg = CodecConfig { min_separation: 0, ..CodecConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Alphabet(AlphabetError::ZeroSeparation))));
    }

    #[test]
    fn validate_rejects_tolerance_at_half_separation() {
        let base = CodecConfig::preset(SecurityLevel::High);
        CodecConfig { sample_tolerance: 49, ..base.clone() }.validate().unwrap();

        let cfg = CodecConfig { sample_tolerance: 50, ..base.clone() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ToleranceTooWide { tolerance: 50, min_separation: 100 })
        ));

        let err = CodecConfig::from_json(r#"{ "sample_tolerance": 60 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ToleranceTooWide { tolerance: 60, .. }));
    }

// # ✅ Tolerance (property)

    proptest! {
        #[test]
        fn prop_trusted_sample_is_far_from_every_other_symbol(
            level_idx in 0usize..4,
            r in any::<u8>(),
            g in any::<u8>(),
            b in any::<u8>(),
        ) {
            let cfg = CodecConfig::preset(LEVELS[level_idx]);
            let a = cfg.alphabet().unwrap();
            let sample = Rgb::new(r, g, b);
            let m = a.bits_for(sample, cfg.sample_tolerance);
            prop_assume!(m.within_tolerance);

            let nearest = match m.class {
                SymbolClass::Data(bits) => a.symbol_for(bits),
                SymbolClass::Marker(kind) => a.marker(kind),
            };
            let floor = (cfg.min_separation - cfg.sample_tolerance) as f64;
            let others = a
                .data_symbols()
                .iter()
                .copied()
                .chain(MarkerKind::ORDER.iter().map(|&k| a.marker(k)))
                .filter(|&c| c != nearest);
            for c in others {
                prop_assert!(sample.distance(&c) >= floor, "{sample:?} vs {c:?}");
            }
        }
    }
}
