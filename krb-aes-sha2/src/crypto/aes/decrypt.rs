use zeroize::Zeroizing;

use crate::crypto::key_derivation::derive_key;
use crate::crypto::{KerberosCryptoError, KerberosCryptoResult, KeyRole, Profile};

use super::{decrypt_aes_cbc, swap_two_last_blocks, AesSize, AES_BLOCK_SIZE, ZERO_IV};

pub(super) fn decrypt_aes_cts(
    key: &[u8],
    iv: &[u8; AES_BLOCK_SIZE],
    cipher_data: &[u8],
    aes_size: AesSize,
) -> KerberosCryptoResult<Vec<u8>> {
    if cipher_data.len() < AES_BLOCK_SIZE {
        return Err(KerberosCryptoError::CipherLength(cipher_data.len(), AES_BLOCK_SIZE));
    }

    if cipher_data.len() == AES_BLOCK_SIZE {
        return decrypt_aes_cbc(key, iv, cipher_data, aes_size);
    }

    let pad_length = (AES_BLOCK_SIZE - (cipher_data.len() % AES_BLOCK_SIZE)) % AES_BLOCK_SIZE;

    let mut cipher_data = cipher_data.to_vec();

    if pad_length != 0 {
        // Decrypt Cn-1 with IV = 0: its tail is the stolen part of the last block
        let start = cipher_data.len() + pad_length - 2 * AES_BLOCK_SIZE;
        let dn = decrypt_aes_cbc(key, &ZERO_IV, &cipher_data[start..start + AES_BLOCK_SIZE], aes_size)?;

        cipher_data.extend_from_slice(&dn[AES_BLOCK_SIZE - pad_length..]);
    }

    swap_two_last_blocks(&mut cipher_data);

    let mut plaintext = decrypt_aes_cbc(key, iv, &cipher_data, aes_size)?;
    plaintext.truncate(cipher_data.len() - pad_length);

    Ok(plaintext)
}

/// Decrypts AES-CTS `data` under exactly `key` (no key derivation, no integrity check)
pub fn decrypt_data(profile: &Profile, key: &[u8], data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != profile.key_size() {
        return Err(KerberosCryptoError::KeyLength(key.len(), profile.key_size()));
    }

    decrypt_aes_cts(key, &ZERO_IV, data, profile.aes_size())
}

fn split_cipher_data<'a>(profile: &Profile, cipher_data: &'a [u8]) -> KerberosCryptoResult<(&'a [u8], &'a [u8])> {
    let min_len = profile.confounder_byte_size() + profile.mac_size();

    if cipher_data.len() < min_len {
        return Err(KerberosCryptoError::CipherLength(cipher_data.len(), min_len));
    }

    Ok(cipher_data.split_at(cipher_data.len() - profile.mac_size()))
}

fn check_integrity(profile: &Profile, key: &[u8], cipher: &[u8], checksum: &[u8], key_usage: i32) -> KerberosCryptoResult<()> {
    let ki = Zeroizing::new(derive_key(profile, key, key_usage, KeyRole::Integrity)?);

    profile
        .hash()
        .verify_truncated_hmac(&ki, &[ZERO_IV.as_slice(), cipher], checksum)
        .map_err(|err| {
            log::debug!("{}: integrity check failed for key usage {}", profile.name(), key_usage);
            err
        })
}

/// Checks the HMAC of a message produced by [encrypt_message](super::encrypt_message) without
/// decrypting it.
///
/// The HMAC covers the cipher state and the AES output, not the plaintext, so the plaintext is not
/// needed. Every failure (bad key, short input, wrong HMAC) yields `false`.
pub fn verify_integrity(profile: &Profile, key: &[u8], cipher_data: &[u8], key_usage: i32) -> bool {
    split_cipher_data(profile, cipher_data)
        .and_then(|(cipher, checksum)| check_integrity(profile, key, cipher, checksum, key_usage))
        .is_ok()
}

/// [Decryption](https://www.rfc-editor.org/rfc/rfc8009.html#section-5)
///
/// The HMAC is verified before anything gets decrypted.
pub fn decrypt_message(
    profile: &Profile,
    key: &[u8],
    cipher_data: &[u8],
    key_usage: i32,
) -> KerberosCryptoResult<Vec<u8>> {
    let (cipher, checksum) = split_cipher_data(profile, cipher_data)?;

    check_integrity(profile, key, cipher, checksum, key_usage)?;

    let ke = Zeroizing::new(derive_key(profile, key, key_usage, KeyRole::Encryption)?);
    let mut plaintext = Zeroizing::new(decrypt_aes_cts(&ke, &ZERO_IV, cipher, profile.aes_size())?);

    // [0..AES_BLOCK_SIZE..] = the first block is a random confounder bytes
    Ok(plaintext.split_off(profile.confounder_byte_size()))
}
