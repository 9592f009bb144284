// AEAD seal/open and the ciphertext record.

#[cfg(test)]
mod tests {
    use rpattern_core::constants::MAGIC_CIPHERTEXT;
    use rpattern_core::crypto::{AeadImpl, CipherSuite, Ciphertext, CryptoError, TAG_LEN};

    const SUITES: [CipherSuite; 2] = [CipherSuite::Aes256Gcm, CipherSuite::Chacha20Poly1305];

    fn cipher(suite: CipherSuite, key_byte: u8) -> AeadImpl {
        AeadImpl::new(suite, &[key_byte; 32]).unwrap()
    }

// # ✅ 1. Round trip

    #[test]
    fn seal_open_round_trip() {
        for suite in SUITES {
            let c = cipher(suite, 1);
            let ct = c.seal(b"envelope bytes").unwrap();
            assert_eq!(ct.suite, suite);
            assert_eq!(ct.body_and_tag.len(), 14 + TAG_LEN);
            assert_eq!(c.open(&ct).unwrap(), b"envelope bytes");
        }
    }

    #[test]
    fn empty_plaintext_round_trips() {
        for suite in SUITES {
            let c = cipher(suite, 1);
            let bytes = c.seal(b"").unwrap().to_bytes();
            assert_eq!(bytes.len(), Ciphertext::HEADER_LEN + TAG_LEN);
            assert_eq!(c.open_bytes(&bytes).unwrap(), b"");
        }
    }

    #[test]
    fn record_layout() {
        let c = cipher(CipherSuite::Chacha20Poly1305, 1);
        let ct = c.seal_with_nonce([9; 12], b"abc").unwrap();
        let bytes = ct.to_bytes();
        assert_eq!(&bytes[..4], &MAGIC_CIPHERTEXT);
        assert_eq!(bytes[4], 1);
        assert_eq!(bytes[5], CipherSuite::Chacha20Poly1305 as u8);
        assert_eq!(&bytes[6..18], &[9; 12]);
        assert_eq!(Ciphertext::from_bytes(&bytes).unwrap(), ct);
    }

    #[test]
    fn nonces_are_fresh_per_seal() {
        let c = cipher(CipherSuite::Aes256Gcm, 1);
        let a = c.seal(b"same").unwrap();
        let b = c.seal(b"same").unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.body_and_tag, b.body_and_tag);
    }

// # ❌ 2. Failures

    #[test]
    fn wrong_key_fails_closed() {
        for suite in SUITES {
            let ct = cipher(suite, 1).seal(b"secret").unwrap();
            assert!(matches!(cipher(suite, 2).open(&ct), Err(CryptoError::TagMismatch)));
        }
    }

    #[test]
    fn every_single_bit_flip_is_rejected() {
        let c = cipher(CipherSuite::Chacha20Poly1305, 1);
        let bytes = c.seal(b"hello").unwrap().to_bytes();
        for i in 0..bytes.len() * 8 {
            let mut t = bytes.clone();
            t[i / 8] ^= 1 << (i % 8);
            assert!(c.open_bytes(&t).is_err(), "flip at bit {i} accepted");
        }
    }

    #[test]
    fn suite_mismatch_is_reported() {
        let ct = cipher(CipherSuite::Aes256Gcm, 1).seal(b"x").unwrap();
        let err = cipher(CipherSuite::Chacha20Poly1305, 1).open(&ct).unwrap_err();
        assert!(matches!(err, CryptoError::SuiteMismatch { .. }));
    }

    #[test]
    fn unknown_suite_and_bad_header() {
        let mut bytes = cipher(CipherSuite::Aes256Gcm, 1).seal(b"x").unwrap().to_bytes();

        let mut t = bytes.clone();
        t[5] = 0x7E;
        let err = Ciphertext::from_bytes(&t).unwrap_err();
        assert!(matches!(err, CryptoError::UnknownCipherSuite { raw: 0x7E }));
        assert!(err.to_string().contains("0x7e"));

        let mut t = bytes.clone();
        t[4] = 2;
        assert!(matches!(Ciphertext::from_bytes(&t), Err(CryptoError::UnsupportedVersion(2))));

        bytes[0] = b'X';
        assert!(matches!(Ciphertext::from_bytes(&bytes), Err(CryptoError::InvalidMagic { .. })));
    }

    #[test]
    fn truncated_record_is_rejected() {
        let bytes = cipher(CipherSuite::Aes256Gcm, 1).seal(b"x").unwrap().to_bytes();
        let need = Ciphertext::HEADER_LEN + TAG_LEN;
        assert!(matches!(
            Ciphertext::from_bytes(&bytes[..need - 1]),
            Err(CryptoError::Truncated { .. })
        ));
    }

    #[test]
    fn invalid_key_length() {
        let err = AeadImpl::new(CipherSuite::Aes256Gcm, &[0u8; 16]).err().unwrap();
        assert!(matches!(err, CryptoError::InvalidKeyLen { expected: 32, actual: 16 }));
    }
}
