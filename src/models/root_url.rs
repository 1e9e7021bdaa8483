use axum::http::uri::{InvalidUri, Uri};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RootUrlError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL: {0}")]
    Invalid(#[from] InvalidUri),
}

/// Scheme, host, port and path prefix of generated absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootUrl {
    /// Lowercase scheme; empty when the source had none (`//host/...`)
    pub scheme: String,
    /// Host as written in the source
    pub host: String,
    /// Port as written, including a scheme-default one
    pub port: Option<u16>,
    /// Path prefix without trailing slash, e.g. `/base` or empty
    pub path: String,
}

impl RootUrl {
    /// Parse a configured base URL, keeping host, port and path as written.
    ///
    /// Scheme-relative input (`//host/path`) parses with an empty scheme.
    /// Input without `://` has no authority and is taken as a bare path.
    pub fn parse(raw: &str) -> Result<Self, RootUrlError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(RootUrlError::Empty);
        }

        let (scheme, uri) = if let Some(rest) = raw.strip_prefix("//") {
            (String::new(), format!("https://{rest}").parse::<Uri>()?)
        } else if raw.contains("://") {
            let uri = raw.parse::<Uri>()?;
            let scheme = uri.scheme_str().unwrap_or_default().to_ascii_lowercase();
            (scheme, uri)
        } else {
            return Ok(Self {
                scheme: String::new(),
                host: String::new(),
                port: None,
                path: raw.trim_end_matches('/').to_string(),
            });
        };

        let authority = uri.authority();
        Ok(Self {
            scheme,
            host: authority.map(|a| a.host().to_string()).unwrap_or_default(),
            port: authority.and_then(|a| a.port_u16()),
            path: uri.path().trim_end_matches('/').to_string(),
        })
    }

    /// The root used when nothing else is known.
    pub fn localhost() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: None,
            path: String::new(),
        }
    }

    pub fn is_localhost(&self) -> bool {
        self.host == "localhost"
    }

    /// `host` or `host:port`
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        }
    }
}

impl fmt::Display for RootUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.authority(), self.path)
    }
}
