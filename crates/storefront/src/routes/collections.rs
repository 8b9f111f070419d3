//! Collection route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::config::AnalyticsConfig;
use crate::error::AppError;
use crate::filters;
use crate::middleware::CspNonce;
use crate::shopify::types::Collection;
use crate::state::AppState;

pub use super::products::{ImageView, PageView, ProductCardView};

/// Collections per index page.
pub const COLLECTIONS_PER_PAGE: i64 = 24;

/// Products per collection page.
pub const PRODUCTS_PER_PAGE: i64 = 12;

/// Collection display data for templates.
#[derive(Debug, Clone)]
pub struct CollectionView {
    pub handle: String,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<ImageView>,
}

impl From<&Collection> for CollectionView {
    fn from(collection: &Collection) -> Self {
        Self {
            handle: collection.handle.clone(),
            title: collection.title.clone(),
            description: if collection.description.is_empty() {
                None
            } else {
                Some(collection.description.clone())
            },
            image: collection.image.as_ref().map(ImageView::from),
        }
    }
}

/// Cursor query parameters.
#[derive(Debug, Deserialize)]
pub struct CursorQuery {
    pub after: Option<String>,
}

/// Collection index page template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/index.html")]
pub struct CollectionsIndexTemplate {
    pub collections: Vec<CollectionView>,
    pub page: PageView,
    pub analytics: AnalyticsConfig,
    pub nonce: String,
}

/// Collection detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/show.html")]
pub struct CollectionShowTemplate {
    pub collection: CollectionView,
    pub products: Vec<ProductCardView>,
    pub page: PageView,
    pub analytics: AnalyticsConfig,
    pub nonce: String,
}

/// GET / collection index.
#[instrument(skip(state, nonce))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CursorQuery>,
    nonce: CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let connection = state
        .storefront()
        .get_collections(COLLECTIONS_PER_PAGE, query.after)
        .await?;

    Ok(CollectionsIndexTemplate {
        collections: connection
            .collections
            .iter()
            .map(CollectionView::from)
            .collect(),
        page: PageView::from(&connection.page_info),
        analytics: state.config().analytics.clone(),
        nonce: nonce.0,
    })
}

/// GET /{handle} collection detail, paginating over the collection's
/// products.
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<CursorQuery>,
    nonce: CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let collection = state
        .storefront()
        .get_collection_by_handle(&handle, PRODUCTS_PER_PAGE, query.after)
        .await?;

    Ok(CollectionShowTemplate {
        products: collection
            .products
            .products
            .iter()
            .map(ProductCardView::from)
            .collect(),
        page: PageView::from(&collection.products.page_info),
        collection: CollectionView::from(&collection),
        analytics: state.config().analytics.clone(),
        nonce: nonce.0,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::shopify::types::{Image, PageInfo, ProductConnection};

    fn collection(description: &str) -> Collection {
        Collection {
            id: "gid://shopify/Collection/1".to_string(),
            handle: "new-arrivals".to_string(),
            title: "New Arrivals".to_string(),
            description: description.to_string(),
            description_html: String::new(),
            updated_at: None,
            image: Some(Image {
                id: None,
                url: "https://cdn.example.com/collection.jpg".to_string(),
                alt_text: None,
                width: None,
                height: None,
            }),
            products: ProductConnection {
                products: vec![],
                page_info: PageInfo {
                    has_next_page: false,
                    has_previous_page: false,
                    start_cursor: None,
                    end_cursor: None,
                },
            },
        }
    }

    #[test]
    fn empty_description_becomes_none() {
        let view = CollectionView::from(&collection(""));
        assert_eq!(view.description, None);
        assert_eq!(view.image.as_ref().unwrap().alt, "");
    }

    #[test]
    fn description_is_kept_when_present() {
        let view = CollectionView::from(&collection("Fresh this week."));
        assert_eq!(view.description.as_deref(), Some("Fresh this week."));
    }
}
