//! Boot-time decision about the root of generated URLs.
//!
//! Production links are forced onto HTTPS and, when possible, onto the
//! public host. The decision is made once from configuration; only the
//! request-host fallback looks at individual requests.

use std::fmt;

use crate::models::{AppConfig, RequestContext, RootUrl};

const SECURE_SCHEME: &str = "https";
const LOCALHOST: &str = "localhost";

/// Whether the process serves HTTP requests or runs a one-shot command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Server,
    Console,
}

/// How the root of generated URLs is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootUrlPolicy {
    /// Not production: use whatever the request or configuration says.
    Passthrough,
    /// Force this root for every URL.
    Fixed(RootUrl),
    /// Force `https://{request host}`, or HTTPS only when the host is unusable.
    RequestHost,
    /// Force the HTTPS scheme and keep the host.
    HttpsOnly,
}

/// Root override for one URL-generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForcedRoot {
    None,
    Root(String),
    Scheme(&'static str),
}

impl RootUrlPolicy {
    /// Decide the policy for this process.
    pub fn boot(config: &AppConfig, mode: RuntimeMode) -> Self {
        if !config.is_production() {
            tracing::debug!(env = %config.app.env, "Root URL left unforced outside production");
            return Self::Passthrough;
        }

        let policy = Self::decide(config.app.url.as_deref(), mode);
        tracing::info!(policy = %policy, mode = ?mode, "Root URL policy resolved");
        policy
    }

    fn decide(app_url: Option<&str>, mode: RuntimeMode) -> Self {
        let Some(raw) = app_url.map(str::trim).filter(|u| !u.is_empty()) else {
            return Self::HttpsOnly;
        };

        let parsed = match RootUrl::parse(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(%e, "Configured application URL is malformed, forcing https only");
                return Self::HttpsOnly;
            }
        };

        if !parsed.host.is_empty() && !parsed.is_localhost() {
            let scheme = if parsed.scheme.is_empty() || parsed.scheme == "http" {
                SECURE_SCHEME.to_string()
            } else {
                parsed.scheme.clone()
            };
            return Self::Fixed(RootUrl { scheme, ..parsed });
        }

        match mode {
            RuntimeMode::Console => Self::HttpsOnly,
            RuntimeMode::Server => Self::RequestHost,
        }
    }

    /// Concrete override for a call, given the request being served (if any).
    pub fn resolve(&self, request: Option<&RequestContext>) -> ForcedRoot {
        match self {
            Self::Passthrough => ForcedRoot::None,
            Self::Fixed(root) => ForcedRoot::Root(root.to_string()),
            Self::HttpsOnly => ForcedRoot::Scheme(SECURE_SCHEME),
            Self::RequestHost => match request.and_then(RequestContext::host) {
                Some(host) if host != LOCALHOST => ForcedRoot::Root(format!("https://{host}")),
                _ => ForcedRoot::Scheme(SECURE_SCHEME),
            },
        }
    }

    /// Production requests are treated as HTTPS-originated.
    pub fn marks_secure(&self) -> bool {
        !matches!(self, Self::Passthrough)
    }

    pub fn apply(&self, request: &mut RequestContext) {
        if self.marks_secure() {
            request.mark_secure();
        }
    }
}

impl fmt::Display for RootUrlPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passthrough => f.write_str("passthrough"),
            Self::Fixed(root) => write!(f, "fixed({root})"),
            Self::RequestHost => f.write_str("request-host"),
            Self::HttpsOnly => f.write_str("https-only"),
        }
    }
}
