use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use signed_url::SignatureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid signature.")]
    InvalidSignature,

    #[error("Signature configuration error: {0}")]
    Signature(#[from] SignatureError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidSignature => StatusCode::FORBIDDEN,
            ApiError::Signature(SignatureError::MissingKey) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Signature(SignatureError::ReservedParameter(_)) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
