//! Kerberos 5 `aes128-cts-hmac-sha256-128` and `aes256-cts-hmac-sha384-192`
//! encryption types ([RFC 8009](https://www.rfc-editor.org/rfc/rfc8009.html)).

pub mod constants;
pub mod crypto;
