use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384};

use super::{KerberosCryptoError, KerberosCryptoResult};

/// Keyed-hash families used by RFC 8009
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
}

impl HashAlgorithm {
    /// Digest size in bytes
    pub const fn output_size(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 256 / 8,
            HashAlgorithm::Sha384 => 384 / 8,
        }
    }

    /// Full (untruncated) HMAC of the concatenation of `parts`
    pub fn hmac(self, key: &[u8], parts: &[&[u8]]) -> KerberosCryptoResult<Vec<u8>> {
        match self {
            HashAlgorithm::Sha256 => hmac_parts::<Hmac<Sha256>>(key, parts),
            HashAlgorithm::Sha384 => hmac_parts::<Hmac<Sha384>>(key, parts),
        }
    }

    /// Checks `tag` against the leftmost bytes of the HMAC in constant time
    pub fn verify_truncated_hmac(self, key: &[u8], parts: &[&[u8]], tag: &[u8]) -> KerberosCryptoResult<()> {
        match self {
            HashAlgorithm::Sha256 => verify_parts::<Hmac<Sha256>>(key, parts, tag),
            HashAlgorithm::Sha384 => verify_parts::<Hmac<Sha384>>(key, parts, tag),
        }
    }

    pub fn pbkdf2(self, password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
        match self {
            HashAlgorithm::Sha256 => pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, rounds, out),
            HashAlgorithm::Sha384 => pbkdf2::pbkdf2_hmac::<Sha384>(password, salt, rounds, out),
        }
    }
}

fn keyed<M: Mac + hmac::digest::KeyInit>(key: &[u8], parts: &[&[u8]]) -> KerberosCryptoResult<M> {
    let mut hmacker = <M as Mac>::new_from_slice(key).map_err(|_| KerberosCryptoError::InvalidHmacKey)?;

    for part in parts {
        hmacker.update(part);
    }

    Ok(hmacker)
}

fn hmac_parts<M: Mac + hmac::digest::KeyInit>(key: &[u8], parts: &[&[u8]]) -> KerberosCryptoResult<Vec<u8>> {
    Ok(keyed::<M>(key, parts)?.finalize().into_bytes().to_vec())
}

fn verify_parts<M: Mac + hmac::digest::KeyInit>(key: &[u8], parts: &[&[u8]], tag: &[u8]) -> KerberosCryptoResult<()> {
    keyed::<M>(key, parts)?
        .verify_truncated_left(tag)
        .map_err(|_| KerberosCryptoError::IntegrityCheck)
}
