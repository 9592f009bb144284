#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    use rpattern_core::crypto::{CryptoError, HkdfPrf, MasterKey};
    use rpattern_core::envelope::{Envelope, EnvelopeParams, SecurityLevel};
    use rpattern_core::session::{is_expired, Session, SessionId, Timestamp};

    #[test]
    fn sequence_starts_at_one_and_increases() {
        let s = Session::new_session().unwrap();
        assert_eq!(s.current_sequence(), 0);
        assert_eq!(s.next_sequence(), 1);
        assert_eq!(s.next_sequence(), 2);
        assert_eq!(s.current_sequence(), 2);
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let a = Session::new_session().unwrap();
        let b = Session::new_session().unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.master_key(), b.master_key());
    }

    #[test]
    fn with_key_keeps_caller_key() {
        let key = MasterKey::from_bytes([7u8; 32]);
        let s = Session::with_key(key.clone()).unwrap();
        assert_eq!(s.master_key(), &key);
    }

    #[test]
    fn from_parts_resumes_sequence() {
        let s = Session::from_parts(SessionId([1; 16]), MasterKey::from_bytes([2; 32]), 41);
        assert_eq!(s.next_sequence(), 42);
    }

    #[test]
    fn concurrent_sequences_never_repeat() {
        let s = Arc::new(Session::new_session().unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let s = Arc::clone(&s);
                std::thread::spawn(move || (0..500).map(|_| s.next_sequence()).collect::<Vec<_>>())
            })
            .collect();

        let mut all = HashSet::new();
        for h in handles {
            for n in h.join().unwrap() {
                assert!(all.insert(n), "duplicate sequence {n}");
            }
        }
        assert_eq!(all.len(), 4000);
        assert_eq!(s.current_sequence(), 4000);
    }

    #[test]
    fn master_key_from_slice_checks_length() {
        let err = MasterKey::from_slice(&[0u8; 31]).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeyLen { expected: 32, actual: 31 }));
        assert!(MasterKey::from_slice(&[0u8; 32]).is_ok());
    }

    #[test]
    fn master_key_debug_is_redacted() {
        let key = MasterKey::from_bytes([0xAB; 32]);
        let dbg = format!("{:?}", key);
        assert!(!dbg.contains("ab"));
        assert!(!dbg.contains("171"));
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let s = Session::new_session().unwrap();
        let params = EnvelopeParams {
            ttl: Duration::from_secs(1),
            security_level: SecurityLevel::High,
            kdf_prf: HkdfPrf::Sha256,
        };
        let t0 = Timestamp::from_millis(1_700_000_000_000);
        let env = Envelope::build("x", &params, &s, t0).unwrap();

        assert!(!is_expired(&env, t0));
        assert!(!is_expired(&env, t0.saturating_add_millis(1_000)));
        assert!(is_expired(&env, t0.saturating_add_millis(1_001)));
    }

    #[test]
    fn timestamp_helpers() {
        let t = Timestamp::from_millis(1_500);
        assert_eq!(t.as_secs(), 1);
        assert_eq!(t.checked_add(Duration::from_millis(500)), Some(Timestamp::from_millis(2_000)));
        assert_eq!(Timestamp::from_millis(u64::MAX).checked_add(Duration::from_millis(1)), None);
        assert_eq!(t.millis_until(Timestamp::from_millis(1_000)), 0);
        assert!(Timestamp::now() > Timestamp::from_millis(1_600_000_000_000));
    }

    #[test]
    fn timestamp_displays_as_rfc3339() {
        let t = Timestamp::from_millis(0);
        assert!(t.to_string().starts_with("1970-01-01T00:00:00"));
    }
}
