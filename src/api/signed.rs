use axum::{extract::State, response::Json};
use serde::Serialize;
use signed_url::EXPIRES_PARAM;

use crate::models::RequestContext;
use crate::server::AppState;

/// Response for a resource reached through a valid signed URL
#[derive(Debug, Serialize)]
pub struct SignedResourceResponse {
    /// Status code (always 200; failures never reach the handler)
    pub status: u16,
    /// Request path without surrounding slashes
    pub path: String,
    /// Unix expiry of the link, absent for permanent links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
}

/// Response describing the root URL generated links use for this request
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: u16,
    pub root: String,
    /// Whether the request is treated as HTTPS
    pub secure: bool,
}

/// Serve a resource behind a signature middleware.
pub async fn handle_signed(context: RequestContext) -> Json<SignedResourceResponse> {
    let expires = context
        .query(EXPIRES_PARAM)
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|&v| v != 0);

    tracing::debug!(path = context.path(), ?expires, "Signed resource served");

    Json(SignedResourceResponse {
        status: 200,
        path: context.path().to_string(),
        expires,
    })
}

/// Report the root URL for the current request.
pub async fn handle_root(
    State(state): State<AppState>,
    context: RequestContext,
) -> Json<RootResponse> {
    Json(RootResponse {
        status: 200,
        root: state.generator.root(Some(&context)),
        secure: context.is_secure(),
    })
}
