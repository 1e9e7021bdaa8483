pub mod context;
pub mod signature;
pub mod signed;

pub use signature::{validate_relative_signature, validate_signature};
pub use signed::{handle_root, handle_signed, RootResponse, SignedResourceResponse};
