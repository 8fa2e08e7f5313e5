use std::fmt;
use std::str::FromStr;

use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroizing;

use crate::constants::key_derivation::{KC_LABEL, KERBEROS, KE_LABEL, KI_LABEL, PRF};

use super::{HashAlgorithm, KerberosCryptoError, KerberosCryptoResult, Profile};

/// Purpose of a subkey derived from a protocol key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    /// Ke
    Encryption,
    /// Ki
    Integrity,
    /// Kc
    Checksum,
}

impl KeyRole {
    pub const fn label(self) -> u8 {
        match self {
            KeyRole::Encryption => KE_LABEL,
            KeyRole::Integrity => KI_LABEL,
            KeyRole::Checksum => KC_LABEL,
        }
    }

    /// Ke is as long as the protocol key, Ki and Kc as long as the truncated HMAC
    pub const fn key_len(self, profile: &Profile) -> usize {
        match self {
            KeyRole::Encryption => profile.key_size(),
            KeyRole::Integrity | KeyRole::Checksum => profile.mac_size(),
        }
    }
}

/// [KDF-HMAC-SHA2](https://www.rfc-editor.org/rfc/rfc8009.html#section-3)
///
/// ```not_rust
/// K(i) = HMAC(key, i | label | 0x00 | context | k)
/// KDF-HMAC-SHA2(key, label, context, k) = k-truncate(K(1) | K(2) | ...)
/// ```
///
/// `i` and `k` are 32-bit big-endian, `k` is the output length in bits.
pub fn kdf_hmac_sha2(
    hash: HashAlgorithm,
    key: &[u8],
    label: &[u8],
    context: &[u8],
    out_len: usize,
) -> KerberosCryptoResult<Vec<u8>> {
    let k = out_len
        .checked_mul(8)
        .and_then(|bits| u32::try_from(bits).ok())
        .ok_or(KerberosCryptoError::KdfOutputLength(out_len))?;

    let mut k_bytes = [0; 4];
    BigEndian::write_u32(&mut k_bytes, k);

    let mut out = Vec::with_capacity(out_len + hash.output_size());
    let mut counter: u32 = 1;

    while out.len() < out_len {
        let mut counter_bytes = [0; 4];
        BigEndian::write_u32(&mut counter_bytes, counter);

        let block = hash.hmac(key, &[counter_bytes.as_slice(), label, &[0x00_u8][..], context, k_bytes.as_slice()])?;
        out.extend_from_slice(&block);

        counter += 1;
    }

    out.truncate(out_len);

    Ok(out)
}

/// Derives the `role` subkey bound to `key_usage` from the protocol key
pub fn derive_key(profile: &Profile, key: &[u8], key_usage: i32, role: KeyRole) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != profile.key_size() {
        return Err(KerberosCryptoError::KeyLength(key.len(), profile.key_size()));
    }

    let usage = u32::try_from(key_usage).map_err(|_| KerberosCryptoError::KeyUsage(key_usage))?;

    let mut label = [0; 5];
    BigEndian::write_u32(&mut label[0..4], usage);
    label[4] = role.label();

    log::trace!("{}: deriving {:?} key for key usage {}", profile.name(), role, usage);

    kdf_hmac_sha2(profile.hash(), key, &label, &[], role.key_len(profile))
}

/// Raw KDF output of `len` bytes for an arbitrary `label`
pub fn derive_random(profile: &Profile, key: &[u8], label: &[u8], len: usize) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != profile.key_size() {
        return Err(KerberosCryptoError::KeyLength(key.len(), profile.key_size()));
    }

    kdf_hmac_sha2(profile.hash(), key, label, &[], len)
}

/// AES keys are used as given
pub fn random_to_key(profile: &Profile, random: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    if random.len() != profile.key_size() {
        return Err(KerberosCryptoError::KeyLength(random.len(), profile.key_size()));
    }

    Ok(random.to_vec())
}

/// [PRF](https://www.rfc-editor.org/rfc/rfc8009.html#section-5)
///
/// `PRF = KDF-HMAC-SHA2(base-key, "prf", octet-string, 256 or 384)`
pub fn prf(profile: &Profile, key: &[u8], input: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != profile.key_size() {
        return Err(KerberosCryptoError::KeyLength(key.len(), profile.key_size()));
    }

    kdf_hmac_sha2(profile.hash(), key, PRF, input, profile.prf_bit_len() / 8)
}

/// String-to-key parameters: the PBKDF2 iteration count, encoded on the wire as
/// 8 hexadecimal digits (32-bit big-endian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct S2kParams {
    iteration_count: u32,
}

impl S2kParams {
    pub fn new(iteration_count: u32) -> KerberosCryptoResult<Self> {
        if iteration_count == 0 {
            return Err(KerberosCryptoError::S2kParams("iteration count must not be zero".to_owned()));
        }

        Ok(Self { iteration_count })
    }

    /// An empty string selects the profile default
    pub fn parse(profile: &Profile, params: &str) -> KerberosCryptoResult<Self> {
        if params.is_empty() {
            profile.default_s2k_params().parse()
        } else {
            params.parse()
        }
    }

    pub fn iteration_count(&self) -> u32 {
        self.iteration_count
    }
}

impl FromStr for S2kParams {
    type Err = KerberosCryptoError;

    fn from_str(params: &str) -> Result<Self, Self::Err> {
        if params.len() != 8 || !params.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(KerberosCryptoError::S2kParams(format!(
                "expected 8 hexadecimal digits, got {:?}",
                params
            )));
        }

        let iteration_count =
            u32::from_str_radix(params, 16).map_err(|err| KerberosCryptoError::S2kParams(err.to_string()))?;

        Self::new(iteration_count)
    }
}

impl fmt::Display for S2kParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.iteration_count)
    }
}

/// [String-to-key](https://www.rfc-editor.org/rfc/rfc8009.html#section-4)
///
/// ```not_rust
/// saltp = enctype-name | 0x00 | salt
/// tkey = random-to-key(PBKDF2(passphrase, saltp, iter_count, keylength))
/// base-key = random-to-key(KDF-HMAC-SHA2(tkey, "kerberos", keylength))
/// ```
pub fn string_to_key<P: AsRef<[u8]>, S: AsRef<[u8]>>(
    profile: &Profile,
    password: P,
    salt: S,
    s2k_params: &str,
) -> KerberosCryptoResult<Vec<u8>> {
    let params = S2kParams::parse(profile, s2k_params)?;
    let salt = salt.as_ref();

    let mut saltp = Vec::with_capacity(profile.name().len() + 1 + salt.len());
    saltp.extend_from_slice(profile.name().as_bytes());
    saltp.push(0x00);
    saltp.extend_from_slice(salt);

    log::trace!(
        "{}: string-to-key with {} iterations",
        profile.name(),
        params.iteration_count()
    );

    let mut tmp = Zeroizing::new(vec![0; profile.key_size()]);
    profile
        .hash()
        .pbkdf2(password.as_ref(), &saltp, params.iteration_count(), &mut tmp);

    let temp_key = Zeroizing::new(random_to_key(profile, &tmp)?);
    let base_key = Zeroizing::new(derive_random(profile, &temp_key, KERBEROS, profile.key_size())?);

    random_to_key(profile, &base_key)
}

pub fn string_to_key_with_default_params<P: AsRef<[u8]>, S: AsRef<[u8]>>(
    profile: &Profile,
    password: P,
    salt: S,
) -> KerberosCryptoResult<Vec<u8>> {
    string_to_key(profile, password, salt, "")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::crypto::{
        derive_key, derive_random, prf, string_to_key, KerberosCryptoError, KeyRole, Profile, S2kParams,
        AES128_CTS_HMAC_SHA256_128, AES256_CTS_HMAC_SHA384_192,
    };

    const KEY_128: &str = "3705d96080c17728a0e800eab6e0d23c";
    const KEY_256: &str = "6d404d37faf79f9df0d33568d320669800eb4836472ea8a026d16b7182460c52";

    // https://www.rfc-editor.org/rfc/rfc8009.html#appendix-A
    #[rstest]
    #[case(&AES128_CTS_HMAC_SHA256_128, KEY_128, KeyRole::Checksum, "b31a018a48f54776f403e9a396325dc3")]
    #[case(&AES128_CTS_HMAC_SHA256_128, KEY_128, KeyRole::Encryption, "9b197dd1e8c5609d6e67c3e37c62c72e")]
    #[case(&AES128_CTS_HMAC_SHA256_128, KEY_128, KeyRole::Integrity, "9fda0e56ab2d85e1569a688696c26a6c")]
    #[case(
        &AES256_CTS_HMAC_SHA384_192,
        KEY_256,
        KeyRole::Checksum,
        "ef5718be86cc84963d8bbb5031e9f5c4ba41f28faf69e73d"
    )]
    #[case(
        &AES256_CTS_HMAC_SHA384_192,
        KEY_256,
        KeyRole::Encryption,
        "56ab22bee63d82d7bc5227f6773f8ea7a5eb1c825160c38312980c442e5c7e49"
    )]
    #[case(
        &AES256_CTS_HMAC_SHA384_192,
        KEY_256,
        KeyRole::Integrity,
        "69b16514e3cd8e56b82010d5c73012b622c4d00ffc23ed1f"
    )]
    fn key_derivation_for_usage_2(
        #[case] profile: &Profile,
        #[case] base_key: &str,
        #[case] role: KeyRole,
        #[case] expected: &str,
    ) {
        let base_key = hex::decode(base_key).unwrap();

        let key = derive_key(profile, &base_key, 2, role).unwrap();

        assert_eq!(expected, hex::encode(key));
    }

    #[rstest]
    #[case(&AES128_CTS_HMAC_SHA256_128, "089bca48b105ea6ea77ca5d2f39dc5e7")]
    #[case(
        &AES256_CTS_HMAC_SHA384_192,
        "45bd806dbf6a833a9cffc1c94589a222367a79bc21c413718906e9f578a78467"
    )]
    fn string_to_key_vectors(#[case] profile: &Profile, #[case] expected: &str) {
        let mut salt = hex::decode("10df9dd783e5bc8acea1730e74355f61").unwrap();
        salt.extend_from_slice(b"ATHENA.MIT.EDUraeburn");

        let key = string_to_key(profile, "password", &salt, "00008000").unwrap();
        assert_eq!(expected, hex::encode(&key));

        // empty parameters select the 32768 iterations default
        let key = string_to_key(profile, "password", &salt, "").unwrap();
        assert_eq!(expected, hex::encode(&key));
    }

    #[rstest]
    #[case(
        &AES128_CTS_HMAC_SHA256_128,
        KEY_128,
        "9d188616f63852fe86915bb840b4a886ff3e6bb0f819b49b893393d393854295"
    )]
    #[case(
        &AES256_CTS_HMAC_SHA384_192,
        KEY_256,
        "9801f69a368c2bf675e59521e177d9a07f67efe1cfde8d3c8d6f6a0256e3b17db3c1b62ad1b8553360d17367eb1514d2"
    )]
    fn prf_vectors(#[case] profile: &Profile, #[case] base_key: &str, #[case] expected: &str) {
        let base_key = hex::decode(base_key).unwrap();

        let output = prf(profile, &base_key, b"test").unwrap();

        assert_eq!(expected, hex::encode(output));
    }

    #[test]
    fn derived_keys_are_deterministic_and_role_bound() {
        let profile = &AES256_CTS_HMAC_SHA384_192;
        let base_key = hex::decode(KEY_256).unwrap();

        let ke = derive_key(profile, &base_key, 11, KeyRole::Encryption).unwrap();
        assert_eq!(ke, derive_key(profile, &base_key, 11, KeyRole::Encryption).unwrap());
        assert_eq!(32, ke.len());

        let ki = derive_key(profile, &base_key, 11, KeyRole::Integrity).unwrap();
        let kc = derive_key(profile, &base_key, 11, KeyRole::Checksum).unwrap();
        assert_eq!(24, ki.len());
        assert_ne!(ki, kc);
        assert_ne!(&ke[..24], ki.as_slice());

        let ke_other_usage = derive_key(profile, &base_key, 12, KeyRole::Encryption).unwrap();
        assert_ne!(ke, ke_other_usage);
    }

    #[test]
    fn derive_random_produces_requested_length() {
        let base_key = hex::decode(KEY_128).unwrap();

        // longer than one SHA-256 block: the counter gets incremented
        let long = derive_random(&AES128_CTS_HMAC_SHA256_128, &base_key, b"label", 100).unwrap();
        let short = derive_random(&AES128_CTS_HMAC_SHA256_128, &base_key, b"label", 10).unwrap();

        assert_eq!(100, long.len());
        assert_eq!(10, short.len());
        // k is part of the hashed input, so outputs of different lengths are unrelated
        assert_ne!(&long[..10], short.as_slice());
    }

    #[test]
    fn derive_key_errors() {
        assert!(matches!(
            derive_key(&AES128_CTS_HMAC_SHA256_128, &[0; 32], 2, KeyRole::Encryption),
            Err(KerberosCryptoError::KeyLength(32, 16))
        ));
        assert!(matches!(
            derive_key(&AES128_CTS_HMAC_SHA256_128, &[0; 16], -1, KeyRole::Encryption),
            Err(KerberosCryptoError::KeyUsage(-1))
        ));
    }

    #[rstest]
    #[case("")]
    #[case("8000")]
    #[case("0000800")]
    #[case("000080000")]
    #[case("0000800g")]
    #[case("+0008000")]
    #[case("00000000")]
    fn malformed_s2k_params(#[case] params: &str) {
        assert!(matches!(
            params.parse::<S2kParams>(),
            Err(KerberosCryptoError::S2kParams(_))
        ));
    }

    #[test]
    fn s2k_params_parsing() {
        let params = S2kParams::parse(&AES128_CTS_HMAC_SHA256_128, "").unwrap();
        assert_eq!(32768, params.iteration_count());

        let params: S2kParams = "0001E240".parse().unwrap();
        assert_eq!(123456, params.iteration_count());
        assert_eq!("0001e240", params.to_string());
    }

    #[test]
    fn string_to_key_rejects_malformed_params() {
        assert!(matches!(
            string_to_key(&AES256_CTS_HMAC_SHA384_192, "password", "EXAMPLE.COMuser", "zzzz"),
            Err(KerberosCryptoError::S2kParams(_))
        ));
    }

    #[test]
    fn string_to_key_is_deterministic() {
        let profile = &AES256_CTS_HMAC_SHA384_192;

        let key = string_to_key(profile, "5hYYSAfFJp", "EXAMPLE.COMtest1", "00000400").unwrap();

        assert_eq!(profile.key_size(), key.len());
        assert_eq!(
            key,
            string_to_key(profile, "5hYYSAfFJp", "EXAMPLE.COMtest1", "00000400").unwrap()
        );
        assert_ne!(
            key,
            string_to_key(profile, "5hYYSAfFJp", "EXAMPLE.COMtest2", "00000400").unwrap()
        );
    }
}
