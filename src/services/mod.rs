pub mod root_url;
pub mod url_generator;
pub mod url_signer;

pub use root_url::{ForcedRoot, RootUrlPolicy, RuntimeMode};
pub use url_generator::UrlGenerator;
pub use url_signer::UrlSigner;
