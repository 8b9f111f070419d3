//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness probe
//! GET  /health/ready           - Readiness probe
//!
//! # Catalog
//! GET  /products               - Product listing (cursor-paginated, sortable)
//! GET  /products/{handle}      - Product detail
//! GET  /collections            - Collection listing
//! GET  /collections/{handle}   - Collection detail
//! GET  /search                 - Product search
//!
//! # Content
//! GET  /pages/{handle}         - Metaobject-driven marketing page
//! GET  /policies/{handle}      - Shop policy page
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart                   - Mutation dispatcher (envelope form field)
//! POST /cart/preview           - Optimistic preview (no platform call)
//! GET  /cart/count             - Cart count badge fragment
//! GET  /cart/checkout          - 303 to the platform checkout
//!
//! # Deferred fragments (always 200)
//! GET  /fragments/menu/{handle}
//! GET  /fragments/products/{handle}/recommendations
//! GET  /fragments/products/{handle}/reviews
//! GET  /fragments/sections/{handle}
//!
//! # Crawlers
//! GET  /sitemap.xml
//! GET  /robots.txt
//! ```

pub mod cart;
pub mod collections;
pub mod fragments;
pub mod home;
pub mod pages;
pub mod products;
pub mod search;
pub mod sitemap;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::middleware::cart_rate_limiter;
use crate::state::AppState;

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}

/// Readiness probe.
pub async fn readiness(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    if state.config().shopify.store.is_empty() {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok("READY")
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{handle}", get(products::show))
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index))
        .route("/{handle}", get(collections::show))
}

/// Create the cart routes router.
///
/// The two mutation routes carry the per-client rate limiter; reads stay
/// unthrottled so badge polling can't starve real traffic.
pub fn cart_routes() -> Router<AppState> {
    let mutations = Router::new()
        .route("/", post(cart::dispatch))
        .route("/preview", post(cart::preview))
        .route_layer(cart_rate_limiter());

    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/checkout", get(cart::checkout))
        .merge(mutations)
}

/// Create the deferred fragment routes router.
pub fn fragment_routes() -> Router<AppState> {
    Router::new()
        .route("/menu/{handle}", get(fragments::menu))
        .route(
            "/products/{handle}/recommendations",
            get(fragments::recommendations),
        )
        .route("/products/{handle}/reviews", get(fragments::reviews))
        .route("/sections/{handle}", get(fragments::section))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/products", product_routes())
        .nest("/collections", collection_routes())
        .route("/search", get(search::index))
        .route("/pages/{handle}", get(pages::show))
        .route("/policies/{handle}", get(pages::policy))
        .nest("/cart", cart_routes())
        .nest("/fragments", fragment_routes())
        .route("/sitemap.xml", get(sitemap::sitemap))
        .route("/robots.txt", get(sitemap::robots))
}
