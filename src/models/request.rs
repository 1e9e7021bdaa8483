//! Read-only view of an inbound request.
//!
//! Holds exactly what signature checks and URL generation need: path,
//! raw query string, decoded query parameters, host and the secure flag.

use axum::http::{
    header::HOST,
    request::Parts,
    uri::{Authority, InvalidUri},
    Method, Uri,
};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    path_info: String,
    raw_query: Option<String>,
    query: Vec<(String, String)>,
    host: Option<String>,
    port: Option<u16>,
    secure: bool,
}

impl RequestContext {
    /// Build from the parts of an axum request.
    ///
    /// The host comes from the `Host` header, falling back to the URI
    /// authority (HTTP/2 requests carry it there).
    pub fn from_parts(parts: &Parts) -> Self {
        let authority = parts
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Authority::from_str(v).ok())
            .or_else(|| parts.uri.authority().cloned());

        Self::build(parts.method.clone(), &parts.uri, authority.as_ref())
    }

    /// Build from a method and a URI; host and scheme come from the URI.
    pub fn from_uri(method: Method, uri: &Uri) -> Self {
        Self::build(method, uri, uri.authority())
    }

    /// Parse a URL string into a GET request context.
    pub fn parse(url: &str) -> Result<Self, InvalidUri> {
        let uri: Uri = url.parse()?;
        Ok(Self::from_uri(Method::GET, &uri))
    }

    fn build(method: Method, uri: &Uri, authority: Option<&Authority>) -> Self {
        let raw_query = uri.query().map(str::to_string);
        let query = raw_query
            .as_deref()
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        Self {
            method,
            path_info: uri.path().to_string(),
            raw_query,
            query,
            host: authority
                .map(|a| a.host().to_ascii_lowercase())
                .filter(|h| !h.is_empty()),
            port: authority.and_then(Authority::port_u16),
            secure: uri.scheme_str() == Some("https"),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path without surrounding slashes, or `/` for the root.
    ///
    /// Percent-encoding is left as received.
    pub fn path(&self) -> &str {
        let trimmed = self.path_info.trim_matches('/');
        if trimmed.is_empty() {
            "/"
        } else {
            trimmed
        }
    }

    /// Raw query string as received, or empty.
    pub fn raw_query(&self) -> &str {
        self.raw_query.as_deref().unwrap_or_default()
    }

    /// Decoded value of a query parameter. The last occurrence wins.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn query_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.query(name).unwrap_or(default)
    }

    /// Lowercased host without port.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Host plus port, with the port left out when it is the scheme default.
    pub fn http_host(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        let default_port = if self.secure { 443 } else { 80 };
        match self.port {
            Some(port) if port != default_port => Some(format!("{host}:{port}")),
            _ => Some(host.to_string()),
        }
    }

    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Treat the connection as HTTPS, e.g. behind a TLS-terminating proxy.
    pub fn mark_secure(&mut self) {
        self.secure = true;
    }
}
