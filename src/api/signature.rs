//! Middleware rejecting requests without a valid URL signature.
//!
//! Mount with `axum::middleware::from_fn_with_state`. On success the
//! [`RequestContext`] used for the check is stored in the request
//! extensions for handlers to reuse.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::server::AppState;

/// Require a valid signature over the absolute URL.
pub async fn validate_signature(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    enforce(&state, request, next, true).await
}

/// Require a valid signature over the path and query only.
pub async fn validate_relative_signature(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    enforce(&state, request, next, false).await
}

async fn enforce(
    state: &AppState,
    request: Request,
    next: Next,
    absolute: bool,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();
    let context = state.request_context(&parts);

    if !state
        .signer
        .has_valid_signature(&context, absolute, &state.ignore_query)?
    {
        tracing::info!(
            method = %context.method(),
            path = context.path(),
            absolute,
            "Rejected request with invalid signature"
        );
        return Err(ApiError::InvalidSignature);
    }

    parts.extensions.insert(context);
    Ok(next.run(Request::from_parts(parts, body)).await)
}
