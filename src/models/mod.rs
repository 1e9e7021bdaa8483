pub mod config;
pub mod request;
pub mod root_url;

pub use config::{AppConfig, AppSection, Secret, SigningConfig, PRODUCTION};
pub use request::RequestContext;
pub use root_url::{RootUrl, RootUrlError};
