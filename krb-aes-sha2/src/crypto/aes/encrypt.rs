use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::crypto::key_derivation::derive_key;
use crate::crypto::{KerberosCryptoError, KerberosCryptoResult, KeyRole, Profile};

use super::{encrypt_aes_cbc, swap_two_last_blocks, AesSize, EncryptedData, AES_BLOCK_SIZE, ZERO_IV};

/// [AES-CTS](https://www.rfc-editor.org/rfc/rfc3962.html#section-5): CBC with the last two
/// blocks swapped and the final block truncated to the length of the plaintext
pub(super) fn encrypt_aes_cts(
    key: &[u8],
    iv: &[u8; AES_BLOCK_SIZE],
    payload: &[u8],
    aes_size: AesSize,
) -> KerberosCryptoResult<EncryptedData> {
    if payload.len() < AES_BLOCK_SIZE {
        return Err(KerberosCryptoError::CipherLength(payload.len(), AES_BLOCK_SIZE));
    }

    let pad_length = (AES_BLOCK_SIZE - (payload.len() % AES_BLOCK_SIZE)) % AES_BLOCK_SIZE;

    let mut padded_payload = payload.to_vec();
    padded_payload.resize(payload.len() + pad_length, 0);

    let mut cipher = encrypt_aes_cbc(key, iv, &padded_payload, aes_size)?;

    let mut cipher_state = [0; AES_BLOCK_SIZE];
    cipher_state.copy_from_slice(&cipher[cipher.len() - AES_BLOCK_SIZE..]);

    if cipher.len() > AES_BLOCK_SIZE {
        swap_two_last_blocks(&mut cipher);
    }

    cipher.truncate(payload.len());

    Ok(EncryptedData { cipher_state, cipher })
}

/// Encrypts `data` with AES-CTS under exactly `key` (no key derivation, no confounder)
pub fn encrypt_data(profile: &Profile, key: &[u8], data: &[u8]) -> KerberosCryptoResult<EncryptedData> {
    if key.len() != profile.key_size() {
        return Err(KerberosCryptoError::KeyLength(key.len(), profile.key_size()));
    }

    encrypt_aes_cts(key, &ZERO_IV, data, profile.aes_size())
}

/// [Encryption](https://www.rfc-editor.org/rfc/rfc8009.html#section-5)
///
/// ```not_rust
/// N = random-bytes(16)
/// C = E(Ke, N | plaintext, IV = 0)
/// H = HMAC(Ki, IV | C)
/// ciphertext = C | H[1..h]
/// ```
///
/// The returned [EncryptedData::cipher] contains `C | H`.
pub fn encrypt_message(
    profile: &Profile,
    key: &[u8],
    payload: &[u8],
    key_usage: i32,
) -> KerberosCryptoResult<EncryptedData> {
    let mut confounder = [0; AES_BLOCK_SIZE];
    OsRng.fill_bytes(&mut confounder);

    encrypt_message_with_confounder(profile, key, payload, key_usage, &confounder)
}

pub(crate) fn encrypt_message_with_confounder(
    profile: &Profile,
    key: &[u8],
    payload: &[u8],
    key_usage: i32,
    confounder: &[u8; AES_BLOCK_SIZE],
) -> KerberosCryptoResult<EncryptedData> {
    let ke = Zeroizing::new(derive_key(profile, key, key_usage, KeyRole::Encryption)?);
    let ki = Zeroizing::new(derive_key(profile, key, key_usage, KeyRole::Integrity)?);

    let mut data_to_encrypt = Zeroizing::new(Vec::with_capacity(confounder.len() + payload.len()));
    data_to_encrypt.extend_from_slice(confounder);
    data_to_encrypt.extend_from_slice(payload);

    let EncryptedData {
        cipher_state,
        mut cipher,
    } = encrypt_aes_cts(&ke, &ZERO_IV, &data_to_encrypt, profile.aes_size())?;

    let hmac = profile.hash().hmac(&ki, &[ZERO_IV.as_slice(), cipher.as_slice()])?;
    cipher.extend_from_slice(&hmac[..profile.mac_size()]);

    Ok(EncryptedData { cipher_state, cipher })
}
