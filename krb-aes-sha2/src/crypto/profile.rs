use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{cksum_types, etypes};

use super::aes::{AesSize, AES_BLOCK_SIZE};
use super::{HashAlgorithm, KerberosCryptoError};

/// Fixed parameters of one RFC 8009 encryption type.
///
/// Profiles are only ever built as constants: every algorithm in this crate takes one by
/// reference and never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Profile {
    name: &'static str,
    aes_size: AesSize,
    hash: HashAlgorithm,
    mac_bit_len: usize,
    default_s2k_params: &'static str,
    etype_id: i32,
    checksum_type_id: i32,
}

/// [aes128-cts-hmac-sha256-128](https://www.rfc-editor.org/rfc/rfc8009.html#section-5)
pub const AES128_CTS_HMAC_SHA256_128: Profile = Profile {
    name: "aes128-cts-hmac-sha256-128",
    aes_size: AesSize::Aes128,
    hash: HashAlgorithm::Sha256,
    mac_bit_len: 128,
    // 32768 iterations
    default_s2k_params: "00008000",
    etype_id: etypes::AES128_CTS_HMAC_SHA256_128,
    checksum_type_id: cksum_types::HMAC_SHA256_128_AES128,
};

/// [aes256-cts-hmac-sha384-192](https://www.rfc-editor.org/rfc/rfc8009.html#section-5)
pub const AES256_CTS_HMAC_SHA384_192: Profile = Profile {
    name: "aes256-cts-hmac-sha384-192",
    aes_size: AesSize::Aes256,
    hash: HashAlgorithm::Sha384,
    mac_bit_len: 192,
    default_s2k_params: "00008000",
    etype_id: etypes::AES256_CTS_HMAC_SHA384_192,
    checksum_type_id: cksum_types::HMAC_SHA384_192_AES256,
};

impl Profile {
    /// Registry name, also used as the string-to-key salt prefix
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) const fn aes_size(&self) -> AesSize {
        self.aes_size
    }

    /// Protocol key size in bytes
    pub const fn key_size(&self) -> usize {
        self.aes_size.key_length()
    }

    pub const fn key_seed_bit_len(&self) -> usize {
        self.key_size() * 8
    }

    pub const fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// Length of the truncated HMAC carried in ciphertexts and checksums
    pub const fn mac_bit_len(&self) -> usize {
        self.mac_bit_len
    }

    pub const fn mac_size(&self) -> usize {
        self.mac_bit_len / 8
    }

    pub const fn confounder_byte_size(&self) -> usize {
        AES_BLOCK_SIZE
    }

    pub const fn cipher_block_bit_len(&self) -> usize {
        self.aes_size.block_bit_len()
    }

    /// CTS mode has no padding, so messages can be of any length
    pub const fn message_block_byte_size(&self) -> usize {
        1
    }

    pub const fn default_s2k_params(&self) -> &'static str {
        self.default_s2k_params
    }

    pub const fn etype_id(&self) -> i32 {
        self.etype_id
    }

    pub const fn checksum_type_id(&self) -> i32 {
        self.checksum_type_id
    }

    /// Output length of the pseudo-random function (full width of the hash)
    pub const fn prf_bit_len(&self) -> usize {
        self.hash.output_size() * 8
    }
}

/// Supported encryption types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CipherSuite {
    #[serde(rename = "aes128-cts-hmac-sha256-128")]
    Aes128CtsHmacSha256128,
    #[serde(rename = "aes256-cts-hmac-sha384-192")]
    Aes256CtsHmacSha384192,
}

impl CipherSuite {
    pub const ALL: [CipherSuite; 2] = [CipherSuite::Aes128CtsHmacSha256128, CipherSuite::Aes256CtsHmacSha384192];

    pub const fn profile(self) -> &'static Profile {
        match self {
            CipherSuite::Aes128CtsHmacSha256128 => &AES128_CTS_HMAC_SHA256_128,
            CipherSuite::Aes256CtsHmacSha384192 => &AES256_CTS_HMAC_SHA384_192,
        }
    }

    /// Checksum type bound to this encryption type
    pub const fn checksum_suite(self) -> ChecksumSuite {
        match self {
            CipherSuite::Aes128CtsHmacSha256128 => ChecksumSuite::HmacSha256128Aes128,
            CipherSuite::Aes256CtsHmacSha384192 => ChecksumSuite::HmacSha384192Aes256,
        }
    }
}

impl TryFrom<i32> for CipherSuite {
    type Error = KerberosCryptoError;

    fn try_from(etype: i32) -> Result<Self, Self::Error> {
        match etype {
            etypes::AES128_CTS_HMAC_SHA256_128 => Ok(Self::Aes128CtsHmacSha256128),
            etypes::AES256_CTS_HMAC_SHA384_192 => Ok(Self::Aes256CtsHmacSha384192),
            _ => Err(KerberosCryptoError::UnknownCipherSuite(etype)),
        }
    }
}

impl From<CipherSuite> for i32 {
    fn from(suite: CipherSuite) -> i32 {
        suite.profile().etype_id()
    }
}

impl FromStr for CipherSuite {
    type Err = KerberosCryptoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        CipherSuite::ALL
            .into_iter()
            .find(|suite| suite.profile().name() == name)
            .ok_or_else(|| KerberosCryptoError::UnknownAlgorithmName(name.to_owned()))
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name())
    }
}

/// Supported checksum types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChecksumSuite {
    #[serde(rename = "hmac-sha256-128-aes128")]
    HmacSha256128Aes128,
    #[serde(rename = "hmac-sha384-192-aes256")]
    HmacSha384192Aes256,
}

impl ChecksumSuite {
    pub const ALL: [ChecksumSuite; 2] = [ChecksumSuite::HmacSha256128Aes128, ChecksumSuite::HmacSha384192Aes256];

    pub const fn name(self) -> &'static str {
        match self {
            ChecksumSuite::HmacSha256128Aes128 => "hmac-sha256-128-aes128",
            ChecksumSuite::HmacSha384192Aes256 => "hmac-sha384-192-aes256",
        }
    }

    /// Checksums are computed with the profile of the associated encryption type
    pub const fn profile(self) -> &'static Profile {
        self.cipher_suite().profile()
    }

    pub const fn cipher_suite(self) -> CipherSuite {
        match self {
            ChecksumSuite::HmacSha256128Aes128 => CipherSuite::Aes128CtsHmacSha256128,
            ChecksumSuite::HmacSha384192Aes256 => CipherSuite::Aes256CtsHmacSha384192,
        }
    }
}

impl TryFrom<i32> for ChecksumSuite {
    type Error = KerberosCryptoError;

    fn try_from(checksum_type: i32) -> Result<Self, Self::Error> {
        match checksum_type {
            cksum_types::HMAC_SHA256_128_AES128 => Ok(Self::HmacSha256128Aes128),
            cksum_types::HMAC_SHA384_192_AES256 => Ok(Self::HmacSha384192Aes256),
            _ => Err(KerberosCryptoError::UnknownChecksumSuite(checksum_type)),
        }
    }
}

impl From<ChecksumSuite> for i32 {
    fn from(suite: ChecksumSuite) -> i32 {
        suite.profile().checksum_type_id()
    }
}

impl FromStr for ChecksumSuite {
    type Err = KerberosCryptoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ChecksumSuite::ALL
            .into_iter()
            .find(|suite| suite.name() == name)
            .ok_or_else(|| KerberosCryptoError::UnknownAlgorithmName(name.to_owned()))
    }
}

impl fmt::Display for ChecksumSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
