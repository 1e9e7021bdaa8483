//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{http::request::Parts, middleware, routing::get, Router};
use signed_url::IgnoreSet;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::models::{AppConfig, RequestContext};
use crate::services::{RuntimeMode, UrlGenerator, UrlSigner};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub generator: Arc<UrlGenerator>,
    pub signer: Arc<UrlSigner>,
    pub ignore_query: Arc<IgnoreSet>,
}

impl AppState {
    /// Context for an inbound request, with the root URL policy applied.
    pub fn request_context(&self, parts: &Parts) -> RequestContext {
        let mut context = RequestContext::from_parts(parts);
        self.generator.policy().apply(&mut context);
        context
    }
}

/// Create application state from configuration.
///
/// The root URL policy is decided here, once.
pub fn create_app_state(config: AppConfig, mode: RuntimeMode) -> AppState {
    let generator = Arc::new(UrlGenerator::from_config(&config, mode));
    let signer = Arc::new(UrlSigner::from_config(&config, generator.clone()));
    let ignore_query = Arc::new(config.ignore_query());

    AppState {
        config: Arc::new(config),
        generator,
        signer,
        ignore_query,
    }
}

/// Build the router with all endpoints and middleware.
///
/// `/signed/*` checks the absolute URL, `/relative/*` only path and query.
pub fn build_router(state: AppState) -> Router {
    let signed = Router::new()
        .route("/signed/*path", get(api::handle_signed))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::validate_signature,
        ));

    let relative = Router::new()
        .route("/relative/*path", get(api::handle_signed))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::validate_relative_signature,
        ));

    Router::new()
        .route("/api/root", get(api::handle_root))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .merge(signed)
        .merge(relative)
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
