use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::key::SigningKey;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer over canonical URL strings.
#[derive(Debug, Clone)]
pub struct Signer {
    key: SigningKey,
}

impl Signer {
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Lowercase hex HMAC-SHA256 of `canonical`.
    pub fn sign(&self, canonical: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(self.key.as_bytes()).expect("HMAC can take key of any size");
        mac.update(canonical.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Check a provided hex signature against `canonical`.
    ///
    /// The comparison is over the hex text, so uppercase hex does not match.
    pub fn verify(&self, canonical: &str, provided: &str) -> bool {
        let expected = self.sign(canonical);
        constant_time_eq(&expected, provided)
    }
}

/// String equality whose running time does not depend on where the inputs
/// differ. Unequal lengths return early.
pub fn constant_time_eq(left: &str, right: &str) -> bool {
    left.as_bytes().ct_eq(right.as_bytes()).into()
}
