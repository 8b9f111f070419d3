//! Product route handlers.
//!
//! The listing page paginates over cursors rather than page numbers, so the
//! "next" link carries the platform's opaque `end_cursor` straight through.
//! The detail page picks a variant from the `variant` query parameter and
//! falls back to the first one, then pre-serializes the add-to-cart envelope
//! so the template only has to drop it into a hidden field.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use driftline_core::SalePricing;
use serde::Deserialize;
use tracing::instrument;

use crate::cart::{CartAction, OptimisticLineDisplay, OptimisticLineInput};
use crate::config::AnalyticsConfig;
use crate::error::AppError;
use crate::filters;
use crate::middleware::CspNonce;
use crate::shopify::types::{PageInfo, Product, ProductSortKey, ProductVariant};
use crate::state::AppState;

/// Products per listing page.
pub const PRODUCTS_PER_PAGE: i64 = 12;

/// Product display data for listing grids.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub handle: String,
    pub title: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub percent_off: Option<u8>,
    pub image: Option<ImageView>,
    pub available: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let sale = SalePricing::derive(
            &product.price_range.min_variant_price,
            product
                .compare_at_price_range
                .as_ref()
                .map(|range| &range.min_variant_price),
        );
        Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            price: product.price_range.min_variant_price.display(),
            compare_at_price: sale.as_ref().map(|s| s.original.display()),
            percent_off: sale.as_ref().map(|s| s.percent_off),
            image: product.featured_image.as_ref().map(ImageView::from),
            available: product.available_for_sale,
        }
    }
}

/// Image display data for templates.
#[derive(Debug, Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

impl From<&crate::shopify::types::Image> for ImageView {
    fn from(image: &crate::shopify::types::Image) -> Self {
        Self {
            url: image.url.clone(),
            alt: image.alt_text.clone().unwrap_or_default(),
        }
    }
}

/// Variant display data for the detail page selector.
#[derive(Debug, Clone)]
pub struct VariantView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub available: bool,
    pub selected: bool,
}

/// Option display data for the detail page.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub name: String,
    pub values: Vec<String>,
}

/// Product detail display data.
///
/// `add_envelope` is the serialized cart action the add-to-cart form posts,
/// built from the selected variant together with the display payload the
/// optimistic preview renders before the platform confirms the line.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    pub handle: String,
    pub title: String,
    pub vendor: String,
    pub description_html: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub percent_off: Option<u8>,
    pub available: bool,
    pub images: Vec<ImageView>,
    pub options: Vec<OptionView>,
    pub variants: Vec<VariantView>,
    pub add_envelope: String,
}

impl ProductDetailView {
    /// Build the detail view with `selected_variant` marked, defaulting to
    /// the first variant when the ID is absent or unknown.
    #[must_use]
    pub fn new(product: &Product, selected_variant: Option<&str>) -> Self {
        let selected = selected_variant
            .and_then(|id| product.variants.iter().find(|v| v.id == id))
            .or_else(|| product.variants.first());

        let variants = product
            .variants
            .iter()
            .map(|variant| VariantView {
                id: variant.id.clone(),
                title: variant.title.clone(),
                price: variant.price.display(),
                available: variant.available_for_sale,
                selected: selected.is_some_and(|s| s.id == variant.id),
            })
            .collect();

        let sale = selected.and_then(|variant| {
            SalePricing::derive(&variant.price, variant.compare_at_price.as_ref())
        });

        Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            vendor: product.vendor.clone(),
            description_html: product.description_html.clone(),
            price: selected.map_or_else(
                || product.price_range.min_variant_price.display(),
                |variant| variant.price.display(),
            ),
            compare_at_price: sale.as_ref().map(|s| s.original.display()),
            percent_off: sale.as_ref().map(|s| s.percent_off),
            available: selected.is_some_and(|v| v.available_for_sale),
            images: product.images.iter().map(ImageView::from).collect(),
            options: product
                .options
                .iter()
                .map(|option| OptionView {
                    name: option.name.clone(),
                    values: option.values.clone(),
                })
                .collect(),
            variants,
            add_envelope: selected.map_or_else(String::new, |v| add_envelope(product, v)),
        }
    }
}

/// Serialize the lines-add envelope for one unit of `variant`.
fn add_envelope(product: &Product, variant: &ProductVariant) -> String {
    let action = CartAction::LinesAdd {
        lines: vec![OptimisticLineInput {
            merchandise_id: variant.id.clone(),
            quantity: 1,
            attributes: None,
            selling_plan_id: None,
            display: Some(OptimisticLineDisplay {
                product_handle: product.handle.clone(),
                product_title: product.title.clone(),
                variant_title: variant.title.clone(),
                price: variant.price.clone(),
                image_url: variant
                    .image
                    .as_ref()
                    .or(product.featured_image.as_ref())
                    .map(|image| image.url.clone()),
            }),
        }],
    };
    serde_json::to_string(&action).unwrap_or_default()
}

/// Cursor pagination state for listing templates.
#[derive(Debug, Clone)]
pub struct PageView {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl From<&PageInfo> for PageView {
    fn from(info: &PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            end_cursor: info.end_cursor.clone(),
        }
    }
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub after: Option<String>,
    pub sort: Option<String>,
}

/// Map the `sort` query parameter onto a platform sort key and direction.
///
/// Unknown values fall back to the platform default ordering.
#[must_use]
pub fn sort_mapping(sort: Option<&str>) -> (Option<ProductSortKey>, Option<bool>) {
    match sort {
        Some("title") => (Some(ProductSortKey::Title), None),
        Some("price-asc") => (Some(ProductSortKey::Price), None),
        Some("price-desc") => (Some(ProductSortKey::Price), Some(true)),
        Some("newest") => (Some(ProductSortKey::CreatedAt), Some(true)),
        Some("best-selling") => (Some(ProductSortKey::BestSelling), None),
        _ => (None, None),
    }
}

/// Detail page query parameters.
#[derive(Debug, Deserialize)]
pub struct ShowQuery {
    pub variant: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub page: PageView,
    pub sort: String,
    pub analytics: AnalyticsConfig,
    pub nonce: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub analytics: AnalyticsConfig,
    pub nonce: String,
}

/// GET / products listing.
#[instrument(skip(state, nonce))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    nonce: CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let (sort_key, reverse) = sort_mapping(query.sort.as_deref());
    let connection = state
        .storefront()
        .get_products(PRODUCTS_PER_PAGE, query.after, None, sort_key, reverse)
        .await?;

    Ok(ProductsIndexTemplate {
        products: connection.products.iter().map(ProductCardView::from).collect(),
        page: PageView::from(&connection.page_info),
        sort: query.sort.unwrap_or_default(),
        analytics: state.config().analytics.clone(),
        nonce: nonce.0,
    })
}

/// GET /{handle} product detail.
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<ShowQuery>,
    nonce: CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let product = state.storefront().get_product_by_handle(&handle).await?;

    Ok(ProductShowTemplate {
        product: ProductDetailView::new(&product, query.variant.as_deref()),
        analytics: state.config().analytics.clone(),
        nonce: nonce.0,
    })
}
