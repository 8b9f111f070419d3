//! Home page route handler.
//!
//! The featured product grid is the page's critical data; menus and
//! marketing sections are deferred to fragment endpoints and load after
//! first paint.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::config::AnalyticsConfig;
use crate::error::AppError;
use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;

use super::products::ProductCardView;

/// Handle of the collection merchandised on the home page.
pub const FEATURED_COLLECTION: &str = "frontpage";

/// Products shown in the featured grid.
pub const FEATURED_PRODUCTS: i64 = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub collection_title: String,
    pub products: Vec<ProductCardView>,
    pub analytics: AnalyticsConfig,
    pub nonce: String,
}

/// GET / home page.
#[instrument(skip(state, nonce))]
pub async fn home(
    State(state): State<AppState>,
    nonce: CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let collection = state
        .storefront()
        .get_collection_by_handle(FEATURED_COLLECTION, FEATURED_PRODUCTS, None)
        .await?;

    Ok(HomeTemplate {
        collection_title: collection.title.clone(),
        products: collection
            .products
            .products
            .iter()
            .map(ProductCardView::from)
            .collect(),
        analytics: state.config().analytics.clone(),
        nonce: nonce.0,
    })
}
