mod aes;
mod checksum;
mod common;
mod key_derivation;
mod profile;

use thiserror::Error;

pub use self::aes::{
    decrypt_data, decrypt_message, encrypt_data, encrypt_message, verify_integrity, EncryptedData, AES_BLOCK_SIZE,
};
pub use checksum::{checksum, verify_checksum};
pub use common::HashAlgorithm;
pub use key_derivation::{
    derive_key, derive_random, kdf_hmac_sha2, prf, random_to_key, string_to_key, string_to_key_with_default_params,
    KeyRole, S2kParams,
};
pub use profile::{
    ChecksumSuite, CipherSuite, Profile, AES128_CTS_HMAC_SHA256_128, AES256_CTS_HMAC_SHA384_192,
};

#[derive(Error, Debug)]
pub enum KerberosCryptoError {
    #[error("Invalid key length: {0}. Expected: {1}")]
    KeyLength(usize, usize),
    #[error("Invalid cipher length: {0}. Expected at least: {1}")]
    CipherLength(usize, usize),
    #[error("Invalid string-to-key parameters: {0}")]
    S2kParams(String),
    #[error("Bad integrity: calculated hmac is different than provided")]
    IntegrityCheck,
    #[error("Unsupported key usage: {0}")]
    KeyUsage(i32),
    #[error("Unknown cipher suite: {0}")]
    UnknownCipherSuite(i32),
    #[error("Unknown checksum suite: {0}")]
    UnknownChecksumSuite(i32),
    #[error("Unknown algorithm name: {0}")]
    UnknownAlgorithmName(String),
    #[error("Cipher error: {0}")]
    CipherError(String),
    #[error("Invalid hmac key")]
    InvalidHmacKey,
    #[error("Invalid KDF output length: {0} bytes")]
    KdfOutputLength(usize),
}

pub type KerberosCryptoResult<T> = Result<T, KerberosCryptoError>;
