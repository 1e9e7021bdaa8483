//! signed-url: HMAC-SHA256 signed URL primitives
//!
//! This crate holds the framework-free half of URL signing. It knows nothing
//! about HTTP requests or root URLs; callers hand it strings and get strings
//! or booleans back.
//!
//! # Quick Start
//!
//! ```
//! use signed_url::{canonical_url, filter_query, IgnoreSet, Signer, SigningKey};
//!
//! let key = SigningKey::new("secret").unwrap();
//! let signer = Signer::new(key);
//!
//! // The query as it arrived, including the signature to strip
//! let raw_query = "signature=abc&foo=bar";
//! let filtered = filter_query(raw_query, &IgnoreSet::default());
//! assert_eq!(filtered, "foo=bar");
//!
//! let canonical = canonical_url("https://example.com/invoice/1", &filtered);
//! assert_eq!(canonical, "https://example.com/invoice/1?foo=bar");
//!
//! let signature = signer.sign(&canonical);
//! assert!(signer.verify(&canonical, &signature));
//! ```
//!
//! # Canonical URLs
//!
//! The signature covers the base URL plus the query string *as received*:
//! parameters keep their original order and encoding, and only the names in
//! the [`IgnoreSet`] are removed. `signature` is always part of that set.
//!
//! # Expiry
//!
//! [`has_expired`] interprets the `expires` parameter. A missing, empty or
//! `0` value never expires.

mod error;
mod expiry;
mod key;
mod query;
mod signer;

pub use error::SignatureError;
pub use expiry::has_expired;
pub use key::SigningKey;
pub use query::{
    append_query, canonical_url, filter_query, parameter_name, IgnoreSet, EXPIRES_PARAM,
    SIGNATURE_PARAM,
};
pub use signer::{constant_time_eq, Signer};
