//! urlseal - signed URLs and production root URLs
//!
//! HMAC-signed link verification with expiry, and normalization of the root
//! URL used for generated links. The framework-free primitives live in the
//! `signed-url` crate; this library adds configuration, the request model,
//! the root URL policy and the axum integration.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
