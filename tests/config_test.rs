//! Tests for loading configuration from disk.

mod common;

use std::io::Write;

use common::fixtures::hmac_hex;
use signed_url::IgnoreSet;
use urlseal::models::{AppConfig, RequestContext};
use urlseal::server::create_app_state;
use urlseal::services::{RootUrlPolicy, RuntimeMode};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_load_config_file() {
    let file = write_config(
        r#"
app:
  env: production
  url: http://billing.example.com
  key: file-key
signing:
  ttl_secs: 120
  ignore_query: [ref]
"#,
    );

    let config = AppConfig::load(Some(file.path()));

    assert_eq!(config.app.url.as_deref(), Some("http://billing.example.com"));
    assert_eq!(config.signing.ttl_secs, 120);
    assert!(config.ignore_query().contains("ref"));
}

#[test]
fn test_loaded_config_drives_state() {
    let file = write_config(
        r#"
app:
  env: production
  url: http://billing.example.com
  key: file-key
"#,
    );

    let state = create_app_state(AppConfig::load(Some(file.path())), RuntimeMode::Console);

    assert!(matches!(state.generator.policy(), RootUrlPolicy::Fixed(_)));
    assert_eq!(state.generator.root(None), "https://billing.example.com");

    let signature = hmac_hex("file-key", "https://billing.example.com/invoice/9");
    let request = RequestContext::parse(&format!(
        "https://billing.example.com/invoice/9?signature={signature}"
    ))
    .unwrap();
    assert!(state
        .signer
        .has_valid_signature(&request, true, &IgnoreSet::default())
        .unwrap());
}

#[test]
fn test_invalid_yaml_falls_back_to_defaults() {
    let file = write_config("app: [this is: not valid");

    let config = AppConfig::load(Some(file.path()));

    assert_eq!(config.app.name, "urlseal");
    assert!(config.app.key.is_none());
}

#[test]
fn test_env_overrides_win_over_file() {
    let file = write_config("app:\n  env: production\n  url: https://file.example.com\n");

    let config = AppConfig::load(Some(file.path())).with_env_overrides(|name| match name {
        "APP_ENV" => Some("local".to_string()),
        _ => None,
    });

    assert_eq!(config.app.env, "local");
    assert_eq!(config.app.url.as_deref(), Some("https://file.example.com"));
}
