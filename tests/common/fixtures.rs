//! Test fixtures and constants.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use urlseal::models::{AppConfig, Secret};

/// Signing key used by every test app
pub const KEY: &str = "secret";

/// Public URL of the fixed-root test app
pub const APP_URL: &str = "https://example.com";

/// Hosts sent in the Host header
pub mod hosts {
    pub const PUBLIC: &str = "api.example.com";
    pub const INTERNAL: &str = "internal:8080";
    pub const LOCALHOST: &str = "localhost:3000";
}

/// Production config with a fixed public root
pub fn production_config() -> AppConfig {
    config("production", Some(APP_URL), Some(KEY))
}

/// Production config whose URL points at localhost
pub fn localhost_config() -> AppConfig {
    config("production", Some("http://localhost"), Some(KEY))
}

pub fn config(env: &str, url: Option<&str>, key: Option<&str>) -> AppConfig {
    let mut config = AppConfig::default();
    config.app.env = env.to_string();
    config.app.url = url.map(str::to_string);
    config.app.key = key.map(Secret::new);
    config
}

/// Reference HMAC-SHA256, computed independently of the crate under test
pub fn hmac_hex(key: &str, message: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes()).unwrap();
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Unix timestamp `offset` seconds from now
pub fn timestamp_from_now(offset: i64) -> i64 {
    chrono::Utc::now().timestamp() + offset
}
