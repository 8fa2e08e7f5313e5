mod decrypt;
mod encrypt;

use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::{Aes128, Aes256};

use crate::crypto::{KerberosCryptoError, KerberosCryptoResult};

pub use decrypt::{decrypt_data, decrypt_message, verify_integrity};
pub use encrypt::{encrypt_data, encrypt_message};
#[cfg(test)]
pub(crate) use encrypt::encrypt_message_with_confounder;

pub const AES_BLOCK_SIZE: usize = 16;

pub const AES128_KEY_SIZE: usize = 128 / 8;
pub const AES256_KEY_SIZE: usize = 256 / 8;

/// RFC 8009: the cipher state is all zeroes unless the protocol supplies one
pub(crate) const ZERO_IV: [u8; AES_BLOCK_SIZE] = [0; AES_BLOCK_SIZE];

/// Output of the AES-CTS layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData {
    /// Cipher state after the operation: the last full ciphertext block
    pub cipher_state: [u8; AES_BLOCK_SIZE],
    pub cipher: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AesSize {
    Aes256,
    Aes128,
}

impl AesSize {
    pub const fn key_length(&self) -> usize {
        match self {
            AesSize::Aes256 => AES256_KEY_SIZE,
            AesSize::Aes128 => AES128_KEY_SIZE,
        }
    }

    pub const fn block_bit_len(&self) -> usize {
        AES_BLOCK_SIZE * 8
    }
}

/// Plain CBC over block-aligned data
fn encrypt_aes_cbc(key: &[u8], iv: &[u8], plaintext: &[u8], aes_size: AesSize) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != aes_size.key_length() {
        return Err(KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()));
    }

    let mut payload = plaintext.to_vec();
    let payload_len = payload.len();

    match aes_size {
        AesSize::Aes128 => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|err| KerberosCryptoError::CipherError(err.to_string()))?
            .encrypt_padded_mut::<NoPadding>(&mut payload, payload_len)
            .map_err(|err| KerberosCryptoError::CipherError(format!("{:?}", err)))?,
        AesSize::Aes256 => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|err| KerberosCryptoError::CipherError(err.to_string()))?
            .encrypt_padded_mut::<NoPadding>(&mut payload, payload_len)
            .map_err(|err| KerberosCryptoError::CipherError(format!("{:?}", err)))?,
    };

    Ok(payload)
}

fn decrypt_aes_cbc(key: &[u8], iv: &[u8], cipher_data: &[u8], aes_size: AesSize) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != aes_size.key_length() {
        return Err(KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()));
    }

    let mut payload = cipher_data.to_vec();

    match aes_size {
        AesSize::Aes128 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|err| KerberosCryptoError::CipherError(err.to_string()))?
            .decrypt_padded_mut::<NoPadding>(&mut payload)
            .map_err(|err| KerberosCryptoError::CipherError(format!("{:?}", err)))?,
        AesSize::Aes256 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|err| KerberosCryptoError::CipherError(err.to_string()))?
            .decrypt_padded_mut::<NoPadding>(&mut payload)
            .map_err(|err| KerberosCryptoError::CipherError(format!("{:?}", err)))?,
    };

    Ok(payload)
}

fn swap_two_last_blocks(data: &mut [u8]) {
    let len = data.len();
    debug_assert!(len >= 2 * AES_BLOCK_SIZE && len % AES_BLOCK_SIZE == 0);

    let (head, last) = data.split_at_mut(len - AES_BLOCK_SIZE);
    head[len - 2 * AES_BLOCK_SIZE..].swap_with_slice(last);
}
