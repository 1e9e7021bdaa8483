use std::fmt;

use crate::error::SignatureError;

/// Secret used to sign and verify URLs.
///
/// The bytes are used as-is as the HMAC key. `Debug` never prints them.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Create a key, rejecting empty input.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SignatureError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SignatureError::MissingKey);
        }
        Ok(Self(bytes))
    }

    /// Create a key from an optional configuration value.
    pub fn from_config(value: Option<&str>) -> Result<Self, SignatureError> {
        Self::new(value.unwrap_or_default().as_bytes())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([redacted])")
    }
}
