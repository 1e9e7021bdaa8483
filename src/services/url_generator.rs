use crate::models::{AppConfig, RequestContext, RootUrl};
use crate::services::root_url::{ForcedRoot, RootUrlPolicy, RuntimeMode};

/// Builds absolute URLs from a path, honoring the root URL policy.
#[derive(Debug, Clone)]
pub struct UrlGenerator {
    policy: RootUrlPolicy,
    /// Root used when there is no request to take the host from
    fallback: RootUrl,
}

impl UrlGenerator {
    pub fn new(policy: RootUrlPolicy, fallback: RootUrl) -> Self {
        Self { policy, fallback }
    }

    /// Boot the root URL policy and remember the configured URL as fallback.
    pub fn from_config(config: &AppConfig, mode: RuntimeMode) -> Self {
        let policy = RootUrlPolicy::boot(config, mode);
        let fallback = config
            .app
            .url
            .as_deref()
            .and_then(|url| RootUrl::parse(url).ok())
            .filter(|root| !root.host.is_empty() && !root.scheme.is_empty())
            .unwrap_or_else(RootUrl::localhost);
        Self::new(policy, fallback)
    }

    pub fn policy(&self) -> &RootUrlPolicy {
        &self.policy
    }

    /// Root for URLs generated while serving `request` (or outside any request).
    pub fn root(&self, request: Option<&RequestContext>) -> String {
        let forced_scheme = match self.policy.resolve(request) {
            ForcedRoot::Root(root) => return root,
            ForcedRoot::Scheme(scheme) => Some(scheme),
            ForcedRoot::None => None,
        };

        match request.and_then(|r| r.http_host().map(|host| (r.scheme(), host))) {
            Some((scheme, host)) => format!("{}://{host}", forced_scheme.unwrap_or(scheme)),
            None => {
                let mut root = self.fallback.clone();
                if let Some(scheme) = forced_scheme {
                    root.scheme = scheme.to_string();
                }
                root.to_string()
            }
        }
    }

    /// Absolute URL for `path`. The path is expected to be percent-encoded.
    pub fn to(&self, path: &str, request: Option<&RequestContext>) -> String {
        let root = self.root(request);
        let path = path.trim_matches('/');
        if path.is_empty() {
            root
        } else {
            format!("{}/{path}", root.trim_end_matches('/'))
        }
    }
}
