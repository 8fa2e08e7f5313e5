use zeroize::Zeroizing;

use super::key_derivation::derive_key;
use super::{KerberosCryptoResult, KeyRole, Profile};

/// [Checksum](https://www.rfc-editor.org/rfc/rfc8009.html#section-5)
///
/// `HMAC(Kc, data)` truncated to the profile MAC length.
pub fn checksum(profile: &Profile, key: &[u8], payload: &[u8], key_usage: i32) -> KerberosCryptoResult<Vec<u8>> {
    let kc = Zeroizing::new(derive_key(profile, key, key_usage, KeyRole::Checksum)?);

    let mut hmac = profile.hash().hmac(&kc, &[payload])?;
    hmac.truncate(profile.mac_size());

    Ok(hmac)
}

/// Recomputes the checksum of `payload` and compares it with `checksum` in constant time.
///
/// Any failure, including a bad key, is reported as `false`.
pub fn verify_checksum(profile: &Profile, key: &[u8], payload: &[u8], checksum: &[u8], key_usage: i32) -> bool {
    if checksum.len() != profile.mac_size() {
        return false;
    }

    let kc = match derive_key(profile, key, key_usage, KeyRole::Checksum) {
        Ok(kc) => Zeroizing::new(kc),
        Err(_) => return false,
    };

    let verified = profile
        .hash()
        .verify_truncated_hmac(&kc, &[payload], checksum)
        .is_ok();

    if !verified {
        log::debug!("{}: checksum mismatch for key usage {}", profile.name(), key_usage);
    }

    verified
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::constants::key_usages::AP_REQ_AUTHENTICATOR_CKSUM;
    use crate::crypto::{Profile, AES128_CTS_HMAC_SHA256_128, AES256_CTS_HMAC_SHA384_192};

    use super::{checksum, verify_checksum};

    // https://www.rfc-editor.org/rfc/rfc8009.html#appendix-A
    #[rstest]
    #[case(
        &AES128_CTS_HMAC_SHA256_128,
        "3705d96080c17728a0e800eab6e0d23c",
        "d78367186643d67b411cba9139fc1dee"
    )]
    #[case(
        &AES256_CTS_HMAC_SHA384_192,
        "6d404d37faf79f9df0d33568d320669800eb4836472ea8a026d16b7182460c52",
        "45ee791567eefca37f4ac1e0222de80d43c3bfa06699672a"
    )]
    fn checksum_vectors(#[case] profile: &Profile, #[case] key: &str, #[case] expected: &str) {
        let key = hex::decode(key).unwrap();
        let payload = hex::decode("000102030405060708090a0b0c0d0e0f1011121314").unwrap();

        let cksum = checksum(profile, &key, &payload, 2).unwrap();

        assert_eq!(expected, hex::encode(&cksum));
        assert!(verify_checksum(profile, &key, &payload, &cksum, 2));
    }

    #[rstest]
    #[case(&AES128_CTS_HMAC_SHA256_128)]
    #[case(&AES256_CTS_HMAC_SHA384_192)]
    fn modified_payload_fails_verification(#[case] profile: &Profile) {
        let key = vec![0x17; profile.key_size()];
        let mut payload = b"authenticator".to_vec();

        let cksum = checksum(profile, &key, &payload, AP_REQ_AUTHENTICATOR_CKSUM).unwrap();
        assert_eq!(profile.mac_size(), cksum.len());

        payload[0] ^= 0x01;
        assert!(!verify_checksum(profile, &key, &payload, &cksum, AP_REQ_AUTHENTICATOR_CKSUM));
    }

    #[test]
    fn checksum_is_bound_to_key_usage() {
        let profile = &AES256_CTS_HMAC_SHA384_192;
        let key = [0x21; 32];

        let cksum = checksum(profile, &key, b"data", 6).unwrap();

        assert!(!verify_checksum(profile, &key, b"data", &cksum, 10));
    }

    #[test]
    fn verification_failures_are_false() {
        let profile = &AES128_CTS_HMAC_SHA256_128;
        let cksum = checksum(profile, &[1; 16], b"data", 2).unwrap();

        // bad key length
        assert!(!verify_checksum(profile, &[1; 15], b"data", &cksum, 2));
        // negative usage
        assert!(!verify_checksum(profile, &[1; 16], b"data", &cksum, -5));
        // truncated checksum
        assert!(!verify_checksum(profile, &[1; 16], b"data", &cksum[..8], 2));
        // bad key length surfaces as an error on the computing side
        assert!(checksum(profile, &[1; 15], b"data", 2).is_err());
    }
}
