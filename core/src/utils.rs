use std::fmt;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::constants::CHECKSUM_LEN;

/// Framer checksum algorithms. All produce exactly `CHECKSUM_LEN` bytes.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumAlg {
    Crc32  = 0x01,
    Sha256 = 0x02, // truncated
    Blake3 = 0x03, // UN-KEYED Blake3, truncated
}

impl Default for ChecksumAlg {
    fn default() -> Self {
        ChecksumAlg::Sha256
    }
}

pub fn compute_checksum(data: &[u8], alg: ChecksumAlg) -> [u8; CHECKSUM_LEN] {
    match alg {
        ChecksumAlg::Crc32  => compute_crc32(data).to_be_bytes(),
        ChecksumAlg::Sha256 => truncate(&Sha256::digest(data)),
        ChecksumAlg::Blake3 => truncate(blake3::hash(data).as_bytes()),
    }
}

fn compute_crc32(data: &[u8]) -> u32 {
    use crc32fast::Hasher;
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

fn truncate(digest: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}
