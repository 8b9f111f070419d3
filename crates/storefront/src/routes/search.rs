//! Search route handler.
//!
//! Search is a thin pass-through to the platform's product query: the `q`
//! parameter becomes the query string and the platform ranks by relevance.
//! An empty query renders the empty state without a platform call.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::config::AnalyticsConfig;
use crate::error::AppError;
use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;

use super::products::{PageView, ProductCardView};

/// Results per search page.
pub const RESULTS_PER_PAGE: i64 = 12;

/// Search page query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub after: Option<String>,
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    pub query: String,
    pub products: Vec<ProductCardView>,
    pub page: PageView,
    pub analytics: AnalyticsConfig,
    pub nonce: String,
}

/// GET /search.
#[instrument(skip(state, nonce), fields(query = %query.q))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    nonce: CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let term = query.q.trim();

    let (products, page) = if term.is_empty() {
        (Vec::new(), PageView { has_next_page: false, end_cursor: None })
    } else {
        let connection = state
            .storefront()
            .get_products(
                RESULTS_PER_PAGE,
                query.after,
                Some(term.to_string()),
                None,
                None,
            )
            .await?;
        (
            connection.products.iter().map(ProductCardView::from).collect(),
            PageView::from(&connection.page_info),
        )
    };

    Ok(SearchTemplate {
        query: term.to_string(),
        products,
        page,
        analytics: state.config().analytics.clone(),
        nonce: nonce.0,
    })
}
