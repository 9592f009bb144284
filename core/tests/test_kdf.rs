#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rpattern_core::crypto::{
        compute_integrity_tag, derive_aead_key, derive_integrity_key, verify_integrity_tag, CipherSuite,
        HkdfPrf, MasterKey,
    };

    fn master(b: u8) -> MasterKey {
        MasterKey::from_bytes([b; 32])
    }

    #[test]
    fn test_aead_key_is_deterministic() {
        let k1 = derive_aead_key(&master(1), HkdfPrf::Sha256, CipherSuite::Aes256Gcm).unwrap();
        let k2 = derive_aead_key(&master(1), HkdfPrf::Sha256, CipherSuite::Aes256Gcm).unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_aead_key_is_bound_to_suite() {
        let aes = derive_aead_key(&master(1), HkdfPrf::Sha256, CipherSuite::Aes256Gcm).unwrap();
        let cha = derive_aead_key(&master(1), HkdfPrf::Sha256, CipherSuite::Chacha20Poly1305).unwrap();
        assert_ne!(aes, cha);
    }

    #[test]
    fn test_prf_choice_changes_keys() {
        let a = derive_aead_key(&master(1), HkdfPrf::Sha256, CipherSuite::Aes256Gcm).unwrap();
        let b = derive_aead_key(&master(1), HkdfPrf::Sha512, CipherSuite::Aes256Gcm).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_subkeys_never_equal_master() {
        let m = master(9);
        let aead = derive_aead_key(&m, HkdfPrf::Sha256, CipherSuite::Aes256Gcm).unwrap();
        let integ = derive_integrity_key(&m, HkdfPrf::Sha256, &[0; 16]).unwrap();
        assert_ne!(&aead, m.as_bytes());
        assert_ne!(&integ, m.as_bytes());
        assert_ne!(aead, integ);
    }

    #[test]
    fn test_integrity_tag_detects_changes() {
        let key = derive_integrity_key(&master(3), HkdfPrf::Sha256, &[7; 16]).unwrap();
        let tag = compute_integrity_tag(&key, b"canonical bytes");
        assert!(verify_integrity_tag(&key, b"canonical bytes", &tag));
        assert!(!verify_integrity_tag(&key, b"canonical bytez", &tag));

        let other = derive_integrity_key(&master(4), HkdfPrf::Sha256, &[7; 16]).unwrap();
        assert!(!verify_integrity_tag(&other, b"canonical bytes", &tag));
    }

    #[test]
    fn test_integrity_tag_rejects_any_single_byte_change() {
        let key = derive_integrity_key(&master(3), HkdfPrf::Sha256, &[7; 16]).unwrap();
        let tag = compute_integrity_tag(&key, b"canonical bytes");
        for i in 0..tag.len() {
            for mask in [0x01u8, 0x80] {
                let mut t = tag;
                t[i] ^= mask;
                assert!(!verify_integrity_tag(&key, b"canonical bytes", &t), "byte {i} mask {mask:#x}");
            }
        }
    }

    // Property-based: distinct session ids give distinct integrity keys
    proptest! {
        #[test]
        fn prop_integrity_key_deterministic(sid in any::<[u8;16]>()) {
            let k1 = derive_integrity_key(&master(5), HkdfPrf::Sha512, &sid).unwrap();
            let k2 = derive_integrity_key(&master(5), HkdfPrf::Sha512, &sid).unwrap();
            prop_assert_eq!(k1, k2);
        }

        #[test]
        fn prop_integrity_key_unique_per_session(s1 in any::<[u8;16]>(), s2 in any::<[u8;16]>()) {
            let k1 = derive_integrity_key(&master(5), HkdfPrf::Sha256, &s1).unwrap();
            let k2 = derive_integrity_key(&master(5), HkdfPrf::Sha256, &s2).unwrap();
            if s1 != s2 {
                prop_assert_ne!(k1, k2);
            }
        }
    }
}
