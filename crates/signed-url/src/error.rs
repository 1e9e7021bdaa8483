use thiserror::Error;

/// Errors raised while signing or verifying.
///
/// A signature that simply does not match is *not* an error; verification
/// returns `false` for that. These variants describe misuse or
/// misconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The signing key is absent or empty.
    #[error("Application key is not set")]
    MissingKey,

    /// A caller tried to sign a URL with a parameter the signer owns.
    #[error("Reserved query parameter: {0}")]
    ReservedParameter(String),
}
