// ## 📂 File: `src/crypto/aead.rs`

//! src/crypto/aead.rs
//! AEAD interface for AES-256-GCM and ChaCha20-Poly1305, plus the
//! self-describing ciphertext record.
//!
//! Design notes:
//! - Both ciphers use 32-byte keys and 12-byte nonces.
//! - A fresh random nonce is drawn for every seal and carried in the record.
//! - The record header (magic, version, suite, nonce) is bound as AAD.
//! - Tag verification must fail closed (no partial plaintext).
//!
//! Record layout:
//! `magic[4] | version u8 | suite u8 | nonce[12] | body | tag[16]`

use crate::constants::{CIPHERTEXT_V1, MAGIC_CIPHERTEXT};
use crate::crypto::types::{fill_random, CipherSuite, CryptoError, KEY_LEN_32, NONCE_LEN_12, TAG_LEN};

// Import AEAD traits from aes_gcm's re-export to avoid unresolved `aead` path and duplicates.
use aes_gcm::aead::{Aead, KeyInit, Payload};

// Concrete AEAD types
use aes_gcm::{Aes256Gcm, Nonce as AesNonce};                // 32-byte key, 12-byte nonce
use chacha20poly1305::{ChaCha20Poly1305, Nonce as ChaNonce}; // 32-byte key, 12-byte nonce

/// Sealed envelope bytes as carried by the framer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub suite: CipherSuite,
    pub nonce: [u8; NONCE_LEN_12],
    /// Encrypted body followed by the 16-byte tag.
    pub body_and_tag: Vec<u8>,
}

impl Ciphertext {
    /// Header bytes, also used as AAD.
    pub const HEADER_LEN: usize = 4 + 1 + 1 + NONCE_LEN_12;

    pub fn header_bytes(&self) -> [u8; Self::HEADER_LEN] {
        build_header(self.suite, &self.nonce)
    }

    pub fn len(&self) -> usize {
        Self::HEADER_LEN + self.body_and_tag.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.header_bytes());
        out.extend_from_slice(&self.body_and_tag);
        out
    }

    /// Parse a record. Only structure is checked here; authenticity is
    /// established by `AeadImpl::open`.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, CryptoError> {
        let need = Self::HEADER_LEN + TAG_LEN;
        if buf.len() < need {
            return Err(CryptoError::Truncated { have: buf.len(), need });
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&buf[0..4]);
        if magic != MAGIC_CIPHERTEXT {
            return Err(CryptoError::InvalidMagic { have: magic });
        }
        if buf[4] != CIPHERTEXT_V1 {
            return Err(CryptoError::UnsupportedVersion(buf[4]));
        }
        let suite = CipherSuite::verify(buf[5])?;

        let mut nonce = [0u8; NONCE_LEN_12];
        nonce.copy_from_slice(&buf[6..Self::HEADER_LEN]);

        Ok(Self {
            suite,
            nonce,
            body_and_tag: buf[Self::HEADER_LEN..].to_vec(),
        })
    }
}

fn build_header(suite: CipherSuite, nonce: &[u8; NONCE_LEN_12]) -> [u8; Ciphertext::HEADER_LEN] {
    let mut h = [0u8; Ciphertext::HEADER_LEN];
    h[0..4].copy_from_slice(&MAGIC_CIPHERTEXT);
    h[4] = CIPHERTEXT_V1;
    h[5] = suite as u8;
    h[6..].copy_from_slice(nonce);
    h
}

/// Unified AEAD cipher implementation selected by configuration.
#[derive(Clone)]
pub enum AeadImpl {
    AesGcm(Aes256Gcm),
    ChaCha(ChaCha20Poly1305),
}

impl AeadImpl {
    /// Construct AEAD implementation from the configured suite and a derived key.
    pub fn new(suite: CipherSuite, key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != KEY_LEN_32 {
            return Err(CryptoError::InvalidKeyLen {
                expected: KEY_LEN_32,
                actual: key.len(),
            });
        }

        let bad_len = |_| CryptoError::InvalidKeyLen {
            expected: KEY_LEN_32,
            actual: key.len(),
        };
        match suite {
            CipherSuite::Aes256Gcm => Ok(Self::AesGcm(Aes256Gcm::new_from_slice(key).map_err(bad_len)?)),
            CipherSuite::Chacha20Poly1305 => {
                Ok(Self::ChaCha(ChaCha20Poly1305::new_from_slice(key).map_err(bad_len)?))
            }
        }
    }

    pub fn suite(&self) -> CipherSuite {
        match self {
            AeadImpl::AesGcm(_) => CipherSuite::Aes256Gcm,
            AeadImpl::ChaCha(_) => CipherSuite::Chacha20Poly1305,
        }
    }

    /// Seal plaintext under a fresh random nonce.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Ciphertext, CryptoError> {
        let mut nonce = [0u8; NONCE_LEN_12];
        fill_random(&mut nonce)?;
        self.seal_with_nonce(nonce, plaintext)
    }

    /// Seal with a caller-supplied nonce. Nonce reuse under one key breaks
    /// both suites; only `seal` should be used outside of tests.
    pub fn seal_with_nonce(
        &self,
        nonce: [u8; NONCE_LEN_12],
        plaintext: &[u8],
    ) -> Result<Ciphertext, CryptoError> {
        let aad = build_header(self.suite(), &nonce);
        let payload = Payload { msg: plaintext, aad: &aad };

        let body_and_tag = match self {
            AeadImpl::AesGcm(cipher) => cipher
                .encrypt(AesNonce::from_slice(&nonce), payload)
                .map_err(|_| CryptoError::SealFailed("AES-GCM seal failed".into()))?,
            AeadImpl::ChaCha(cipher) => cipher
                .encrypt(ChaNonce::from_slice(&nonce), payload)
                .map_err(|_| CryptoError::SealFailed("ChaCha20-Poly1305 seal failed".into()))?,
        };

        Ok(Ciphertext {
            suite: self.suite(),
            nonce,
            body_and_tag,
        })
    }

    /// Open a record. Any tag mismatch yields `TagMismatch` and no plaintext.
    pub fn open(&self, ct: &Ciphertext) -> Result<Vec<u8>, CryptoError> {
        if ct.suite != self.suite() {
            return Err(CryptoError::SuiteMismatch {
                expected: self.suite(),
                actual: ct.suite,
            });
        }
        if ct.body_and_tag.len() < TAG_LEN {
            return Err(CryptoError::Truncated {
                have: ct.len(),
                need: Ciphertext::HEADER_LEN + TAG_LEN,
            });
        }

        let aad = ct.header_bytes();
        let payload = Payload { msg: &ct.body_and_tag, aad: &aad };

        match self {
            AeadImpl::AesGcm(cipher) => cipher
                .decrypt(AesNonce::from_slice(&ct.nonce), payload)
                .map_err(|_| CryptoError::TagMismatch),
            AeadImpl::ChaCha(cipher) => cipher
                .decrypt(ChaNonce::from_slice(&ct.nonce), payload)
                .map_err(|_| CryptoError::TagMismatch),
        }
    }

    /// Parse and open raw record bytes.
    pub fn open_bytes(&self, buf: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let ct = Ciphertext::from_bytes(buf)?;
        self.open(&ct)
    }
}
