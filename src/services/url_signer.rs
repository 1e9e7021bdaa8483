use chrono::{DateTime, Utc};
use signed_url::{
    append_query, canonical_url, filter_query, has_expired, IgnoreSet, SignatureError, Signer,
    SigningKey, EXPIRES_PARAM, SIGNATURE_PARAM,
};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::{AppConfig, RequestContext};
use crate::services::url_generator::UrlGenerator;

/// Issues and checks signed URLs for the application.
///
/// Holds no per-request state; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct UrlSigner {
    signer: Option<Signer>,
    generator: Arc<UrlGenerator>,
}

impl UrlSigner {
    /// A signer without a key reports `MissingKey` on every call.
    pub fn new(key: Option<SigningKey>, generator: Arc<UrlGenerator>) -> Self {
        Self {
            signer: key.map(Signer::new),
            generator,
        }
    }

    pub fn from_config(config: &AppConfig, generator: Arc<UrlGenerator>) -> Self {
        let key = match config.signing_key() {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::warn!(%e, "Signed URL checks will fail until a key is configured");
                None
            }
        };
        Self::new(key, generator)
    }

    fn signer(&self) -> Result<&Signer, SignatureError> {
        self.signer.as_ref().ok_or(SignatureError::MissingKey)
    }

    /// The string the request's signature must have been computed over.
    pub fn canonical_url(
        &self,
        request: &RequestContext,
        absolute: bool,
        ignore_query: &IgnoreSet,
    ) -> String {
        let base = if absolute {
            self.generator.to(request.path(), Some(request))
        } else {
            relative_path(request.path())
        };
        canonical_url(&base, &filter_query(request.raw_query(), ignore_query))
    }

    /// Whether the `signature` parameter matches the request URL.
    ///
    /// A missing or malformed signature is `Ok(false)`; only a missing key
    /// is an error.
    pub fn has_correct_signature(
        &self,
        request: &RequestContext,
        absolute: bool,
        ignore_query: &IgnoreSet,
    ) -> Result<bool, SignatureError> {
        let signer = self.signer()?;
        let canonical = self.canonical_url(request, absolute, ignore_query);
        let provided = request.query_or(SIGNATURE_PARAM, "");

        let valid = signer.verify(&canonical, provided);
        if !valid {
            tracing::debug!(
                path = request.path(),
                absolute,
                has_signature = !provided.is_empty(),
                "Signature mismatch"
            );
        }
        Ok(valid)
    }

    pub fn signature_has_not_expired(&self, request: &RequestContext) -> bool {
        let expired = has_expired(request.query(EXPIRES_PARAM), Utc::now().timestamp());
        if expired {
            tracing::debug!(path = request.path(), "Signature expired");
        }
        !expired
    }

    /// Correct signature and not expired.
    pub fn has_valid_signature(
        &self,
        request: &RequestContext,
        absolute: bool,
        ignore_query: &IgnoreSet,
    ) -> Result<bool, SignatureError> {
        Ok(self.has_correct_signature(request, absolute, ignore_query)?
            && self.signature_has_not_expired(request))
    }

    /// [`Self::has_valid_signature`] over the path and query only.
    pub fn has_valid_relative_signature(
        &self,
        request: &RequestContext,
        ignore_query: &IgnoreSet,
    ) -> Result<bool, SignatureError> {
        self.has_valid_signature(request, false, ignore_query)
    }

    /// Sign `path` with `params`, optionally expiring at `expires_at`.
    ///
    /// Parameters are sorted by name; `signature` is always the last one.
    /// `path` must already be percent-encoded.
    pub fn signed_url(
        &self,
        path: &str,
        params: &BTreeMap<String, String>,
        expires_at: Option<DateTime<Utc>>,
        absolute: bool,
        request: Option<&RequestContext>,
    ) -> Result<String, SignatureError> {
        let signer = self.signer()?;

        if let Some(reserved) = [SIGNATURE_PARAM, EXPIRES_PARAM]
            .into_iter()
            .find(|name| params.contains_key(*name))
        {
            return Err(SignatureError::ReservedParameter(reserved.to_string()));
        }

        let mut params = params.clone();
        if let Some(expires_at) = expires_at {
            params.insert(EXPIRES_PARAM.to_string(), expires_at.timestamp().to_string());
        }

        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter())
            .finish();

        let base = if absolute {
            self.generator.to(path, request)
        } else {
            relative_path(path)
        };

        let canonical = canonical_url(&base, &query);
        let signature = signer.sign(&canonical);
        Ok(append_query(&canonical, SIGNATURE_PARAM, &signature))
    }

    /// Sign `path` with an expiry `ttl_secs` seconds from now.
    pub fn temporary_signed_url(
        &self,
        path: &str,
        params: &BTreeMap<String, String>,
        ttl_secs: u32,
        absolute: bool,
        request: Option<&RequestContext>,
    ) -> Result<String, SignatureError> {
        let expires_at = Utc::now() + chrono::Duration::seconds(i64::from(ttl_secs));
        self.signed_url(path, params, Some(expires_at), absolute, request)
    }
}

fn relative_path(path: &str) -> String {
    format!("/{}", path.trim_matches('/'))
}
