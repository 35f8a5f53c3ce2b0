use std::fmt;

use secrecy::ExposeSecret;
use secrecy::SecretString;
use subtle::ConstantTimeEq;

/// Static shared secret authenticating a trusted machine caller.
///
/// `Debug` never prints the key.
pub struct ApiKey(SecretString);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Compare a presented key against the configured one in constant time.
    ///
    /// Unequal lengths compare as false without an early exit.
    pub fn verify(&self, provided: &str) -> bool {
        let expected = self.0.expose_secret();
        expected.as_bytes().ct_eq(provided.as_bytes()).into()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}
