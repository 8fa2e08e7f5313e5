pub mod key_usages {
    //= [Key Usage Numbers](https://datatracker.ietf.org/doc/html/rfc4120#section-7.5.1) =//
    pub const AS_REQ_TIMESTAMP: i32 = 1;
    pub const TICKET_REP: i32 = 2;
    pub const AS_REP_ENC: i32 = 3;
    pub const TGS_REQ_AUTH_DATA_SESSION_KEY: i32 = 4;
    pub const TGS_REQ_AUTH_DATA_SUB_KEY: i32 = 5;
    pub const TGS_REQ_PA_DATA_AP_REQ_AUTHENTICATOR_CKSUM: i32 = 6;
    pub const TGS_REQ_PA_DATA_AP_REQ_AUTHENTICATOR: i32 = 7;
    pub const TGS_REP_ENC_SESSION_KEY: i32 = 8;
    pub const TGS_REP_ENC_SUB_KEY: i32 = 9;
    pub const AP_REQ_AUTHENTICATOR_CKSUM: i32 = 10;
    pub const AP_REQ_AUTHENTICATOR: i32 = 11;
    pub const AP_REP_ENC: i32 = 12;
    pub const KRB_PRIV_ENC_PART: i32 = 13;
    pub const KRB_CRED_ENC_PART: i32 = 14;
    pub const KRB_SAFE_CKSUM: i32 = 15;

    //= [GSS API Key Usages](https://datatracker.ietf.org/doc/html/rfc4121#section-2) =//
    pub const ACCEPTOR_SEAL: i32 = 22;
    pub const ACCEPTOR_SIGN: i32 = 23;
    pub const INITIATOR_SEAL: i32 = 24;
    pub const INITIATOR_SIGN: i32 = 25;
}

//= [Kerberos Encryption Type Numbers](https://www.rfc-editor.org/rfc/rfc8009.html#section-8) =//
pub mod etypes {
    pub const AES128_CTS_HMAC_SHA256_128: i32 = 19;
    pub const AES256_CTS_HMAC_SHA384_192: i32 = 20;
}

//= [Kerberos Checksum Type Numbers](https://www.rfc-editor.org/rfc/rfc8009.html#section-8) =//
pub mod cksum_types {
    pub const HMAC_SHA256_128_AES128: i32 = 19;
    pub const HMAC_SHA384_192_AES256: i32 = 20;
}

//= [Key Derivation Function](https://www.rfc-editor.org/rfc/rfc8009.html#section-5) =//
pub mod key_derivation {
    /// Label octet for the encryption subkey (Ke)
    pub const KE_LABEL: u8 = 0xAA;
    /// Label octet for the integrity subkey (Ki)
    pub const KI_LABEL: u8 = 0x55;
    /// Label octet for the checksum subkey (Kc)
    pub const KC_LABEL: u8 = 0x99;

    /// Label of the final KDF pass of string-to-key
    pub const KERBEROS: &[u8; 8] = b"kerberos";
    /// Label of the pseudo-random function
    pub const PRF: &[u8; 3] = b"prf";
}
