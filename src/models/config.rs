use serde::Deserialize;
use signed_url::{IgnoreSet, SignatureError, SigningKey};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment name that turns on root-URL normalization.
pub const PRODUCTION: &str = "production";

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Application identity, URL and key
    #[serde(default)]
    pub app: AppSection,

    /// Defaults for issuing and checking signed URLs
    #[serde(default)]
    pub signing: SigningConfig,
}

/// The `app:` section
#[derive(Debug, Deserialize, Clone)]
pub struct AppSection {
    #[serde(default = "default_name")]
    pub name: String,

    /// Environment name (`production`, `local`, `testing`, ...)
    #[serde(default = "default_env")]
    pub env: String,

    /// Public base URL, e.g. `https://app.example.com`
    #[serde(default)]
    pub url: Option<String>,

    /// HMAC key for signed URLs
    #[serde(default)]
    pub key: Option<Secret>,
}

fn default_name() -> String {
    "urlseal".to_string()
}

fn default_env() -> String {
    PRODUCTION.to_string()
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            env: default_env(),
            url: None,
            key: None,
        }
    }
}

/// The `signing:` section
#[derive(Debug, Deserialize, Clone)]
pub struct SigningConfig {
    /// Lifetime of temporary signed URLs in seconds
    #[serde(default = "default_ttl")]
    pub ttl_secs: u32,

    /// Sign the full URL (true) or only the path and query (false)
    #[serde(default = "default_absolute")]
    pub absolute: bool,

    /// Extra query parameters left out of the signature
    #[serde(default)]
    pub ignore_query: Vec<String>,
}

fn default_ttl() -> u32 {
    3600 // 1 hour
}

fn default_absolute() -> bool {
    true
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            absolute: default_absolute(),
            ignore_query: Vec::new(),
        }
    }
}

/// A configuration string that must never be printed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redacted]")
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        env = %config.app.env,
                        url = ?config.app.url,
                        key_set = config.app.key.is_some(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `CONFIG_FILE` and apply `APP_*` environment overrides.
    pub fn from_env() -> Self {
        let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
        Self::load(config_file.as_deref()).with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Override `env`, `url` and `key` from `APP_ENV`, `APP_URL`, `APP_KEY`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("APP_ENV") {
            self.app.env = env;
        }
        if let Some(url) = lookup("APP_URL") {
            self.app.url = Some(url);
        }
        if let Some(key) = lookup("APP_KEY") {
            self.app.key = Some(Secret::new(key));
        }
        self
    }

    pub fn is_production(&self) -> bool {
        self.app.env == PRODUCTION
    }

    /// The configured signing key, or `MissingKey` when unset or empty.
    pub fn signing_key(&self) -> Result<SigningKey, SignatureError> {
        SigningKey::from_config(self.app.key.as_ref().map(Secret::expose))
    }

    /// Configured ignore list, always including `signature`.
    pub fn ignore_query(&self) -> IgnoreSet {
        self.signing.ignore_query.iter().cloned().collect()
    }
}
