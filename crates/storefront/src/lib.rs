//! Driftline Storefront library.
//!
//! The full application router is assembled here so integration tests can
//! run the same stack the binary serves.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;

use axum::Router;
use axum::http::{HeaderValue, header};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router with the full middleware stack.
///
/// Layer order, outermost first: Sentry (hub scope + transactions), request
/// tracing, request ID, CSP nonce, session, security headers. The cart
/// mutation routes carry their rate limiter inside
/// [`routes::cart_routes`]. Static assets are content-hashed by the build
/// script, so they get an immutable cache policy; the security-header layer
/// leaves existing `Cache-Control` values alone.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    let static_assets = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=31536000, immutable"),
        ))
        .service(ServeDir::new("crates/storefront/static"));

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", static_assets)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::csp_nonce_middleware))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
