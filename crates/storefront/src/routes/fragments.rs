//! Deferred fragment endpoints.
//!
//! Pages render placeholders for slow sections; the enhancement script
//! fetches these endpoints after load and swaps the snippets in. Every
//! handler returns 200 even on failure, with an inline error snippet in
//! place of the content, so a broken fragment never takes down its page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::filters;
use crate::routes::pages::{MARKETING_SECTION_TYPE, SectionView};
use crate::routes::products::ProductCardView;
use crate::services::reviews::ProductReviews;
use crate::shopify::ShopifyError;
use crate::shopify::types::{Menu, MenuItem, ProductRecommendationIntent};
use crate::state::AppState;

/// Inline error snippet, confined to the fragment's section.
#[derive(Template, WebTemplate)]
#[template(path = "partials/fragment_error.html")]
pub struct FragmentErrorTemplate {
    pub message: &'static str,
}

fn fragment_error(message: &'static str) -> Response {
    FragmentErrorTemplate { message }.into_response()
}

// =============================================================================
// Menu
// =============================================================================

/// Menu item display data.
#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub title: String,
    pub url: String,
    pub children: Vec<MenuItemView>,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            title: item.title.clone(),
            url: item.url.clone().unwrap_or_else(|| "#".to_string()),
            children: item.items.iter().map(MenuItemView::from).collect(),
        }
    }
}

/// Menu fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/menu.html")]
pub struct MenuTemplate {
    pub items: Vec<MenuItemView>,
}

/// GET /fragments/menu/{handle}.
#[instrument(skip(state))]
pub async fn menu(State(state): State<AppState>, Path(handle): Path<String>) -> Response {
    match state.storefront().get_menu(&handle).await {
        Ok(menu) => MenuTemplate {
            items: menu_items(&menu),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!("Failed to load menu {handle}: {e}");
            fragment_error("Navigation is unavailable right now.")
        }
    }
}

fn menu_items(menu: &Menu) -> Vec<MenuItemView> {
    menu.items.iter().map(MenuItemView::from).collect()
}

// =============================================================================
// Recommendations
// =============================================================================

/// Recommendations fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/recommendations.html")]
pub struct RecommendationsTemplate {
    pub products: Vec<ProductCardView>,
}

/// GET /fragments/products/{handle}/recommendations.
#[instrument(skip(state))]
pub async fn recommendations(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Response {
    match related_products(&state, &handle).await {
        Ok(products) => RecommendationsTemplate {
            products: products.iter().map(ProductCardView::from).collect(),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!("Failed to load recommendations for {handle}: {e}");
            fragment_error("Recommendations are unavailable right now.")
        }
    }
}

/// The recommendations query wants a product ID, so the handle is resolved
/// first; both calls go through the read cache.
async fn related_products(
    state: &AppState,
    handle: &str,
) -> Result<Vec<crate::shopify::types::Product>, ShopifyError> {
    let product = state.storefront().get_product_by_handle(handle).await?;
    state
        .storefront()
        .get_product_recommendations(&product.id, Some(ProductRecommendationIntent::Related))
        .await
}

// =============================================================================
// Reviews
// =============================================================================

/// Reviews fragment template. `reviews` is `None` when no review service is
/// configured, which renders the empty state rather than an error.
#[derive(Template, WebTemplate)]
#[template(path = "partials/reviews.html")]
pub struct ReviewsTemplate {
    pub reviews: Option<ProductReviews>,
}

/// GET /fragments/products/{handle}/reviews.
#[instrument(skip(state))]
pub async fn reviews(State(state): State<AppState>, Path(handle): Path<String>) -> Response {
    let Some(client) = state.reviews() else {
        return ReviewsTemplate { reviews: None }.into_response();
    };

    match client.product_reviews(&handle).await {
        Ok(reviews) => ReviewsTemplate {
            reviews: Some(reviews),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!("Failed to load reviews for {handle}: {e}");
            fragment_error("Reviews are unavailable right now.")
        }
    }
}

// =============================================================================
// Marketing Sections
// =============================================================================

/// Marketing section fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/section.html")]
pub struct SectionTemplate {
    pub section: Option<SectionView>,
}

/// GET /fragments/sections/{handle}.
///
/// A missing metaobject renders an empty fragment: home placeholders just
/// disappear when merchandising hasn't published the section.
#[instrument(skip(state))]
pub async fn section(State(state): State<AppState>, Path(handle): Path<String>) -> Response {
    match state
        .storefront()
        .get_metaobject_by_handle(MARKETING_SECTION_TYPE, &handle)
        .await
    {
        Ok(metaobject) => SectionTemplate {
            section: Some(SectionView::from(&metaobject)),
        }
        .into_response(),
        Err(ShopifyError::NotFound(_)) => SectionTemplate { section: None }.into_response(),
        Err(e) => {
            tracing::warn!("Failed to load section {handle}: {e}");
            fragment_error("This section is unavailable right now.")
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn menu_items_keep_nesting_and_default_missing_urls() {
        let menu = Menu {
            id: "gid://shopify/Menu/1".to_string(),
            handle: "main-menu".to_string(),
            title: "Main menu".to_string(),
            items: vec![MenuItem {
                id: "gid://shopify/MenuItem/1".to_string(),
                title: "Shop".to_string(),
                url: None,
                kind: "COLLECTION".to_string(),
                items: vec![MenuItem {
                    id: "gid://shopify/MenuItem/2".to_string(),
                    title: "Throws".to_string(),
                    url: Some("/collections/throws".to_string()),
                    kind: "COLLECTION".to_string(),
                    items: vec![],
                }],
            }],
        };

        let items = menu_items(&menu);
        assert_eq!(items[0].url, "#");
        assert_eq!(items[0].children[0].url, "/collections/throws");
        assert_eq!(items[0].children[0].title, "Throws");
    }
}
