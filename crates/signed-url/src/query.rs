//! Query-string filtering and canonical URL assembly.

use std::collections::BTreeSet;

/// Query parameter carrying the hex signature.
pub const SIGNATURE_PARAM: &str = "signature";

/// Query parameter carrying the unix expiry timestamp.
pub const EXPIRES_PARAM: &str = "expires";

/// Parameter names excluded from the canonical URL.
///
/// Always contains [`SIGNATURE_PARAM`]; names can be added but never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet(BTreeSet<String>);

impl IgnoreSet {
    pub fn new() -> Self {
        let mut names = BTreeSet::new();
        names.insert(SIGNATURE_PARAM.to_string());
        Self(names)
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.0.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl<S: Into<String>> Extend<S> for IgnoreSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

/// Name of a raw `name=value` query piece: everything before the first `=`.
///
/// The name is compared still percent-encoded, so `a%3Db=1` is named
/// `a%3Db`, not `a`.
pub fn parameter_name(piece: &str) -> &str {
    piece.split_once('=').map_or(piece, |(name, _)| name)
}

/// Drop ignored parameters from a raw query string.
///
/// Surviving pieces keep their order and encoding. Empty pieces (from `&&`)
/// are kept as they are.
pub fn filter_query(raw_query: &str, ignore: &IgnoreSet) -> String {
    raw_query
        .split('&')
        .filter(|piece| !ignore.contains(parameter_name(piece)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Join a base URL and a filtered query into the string that gets signed.
pub fn canonical_url(base: &str, filtered_query: &str) -> String {
    format!("{base}?{filtered_query}")
        .trim_end_matches('?')
        .to_string()
}

/// Append `name=value` to a URL, choosing `?` or `&` as needed.
///
/// `value` is appended verbatim.
pub fn append_query(url: &str, name: &str, value: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{name}={value}")
}
