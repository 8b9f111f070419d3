//! Wire structs for Storefront API responses.
//!
//! One shared set of payload types deserialized from the platform's
//! camelCase JSON. Every cart mutation aliases its root field to `result`,
//! so all six mutations share [`CartMutationData`] instead of carrying a
//! near-identical payload type each.

use driftline_core::Money;
use serde::Deserialize;

// =============================================================================
// Connection wrappers
// =============================================================================

/// A connection queried without pagination info (`nodes` only).
#[derive(Debug, Deserialize)]
pub struct NodesPayload<T> {
    pub nodes: Vec<T>,
}

impl<T> Default for NodesPayload<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// A connection queried with pagination info.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPayload<T> {
    pub nodes: Vec<T>,
    pub page_info: PageInfoPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoPayload {
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

// =============================================================================
// Shared payloads
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangePayload {
    pub min_variant_price: Money,
    pub max_variant_price: Money,
}

#[derive(Debug, Deserialize)]
pub struct SelectedOptionPayload {
    pub name: String,
    pub value: String,
}

// =============================================================================
// Product payloads
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionPayload {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub option_values: Vec<OptionValuePayload>,
}

#[derive(Debug, Deserialize)]
pub struct OptionValuePayload {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    #[serde(default)]
    pub sku: Option<String>,
    pub price: Money,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOptionPayload>,
    #[serde(default)]
    pub image: Option<ImagePayload>,
}

/// Product payload covering both the card selection (lists) and the full
/// selection (product page); card queries leave the detail fields at their
/// defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_html: String,
    pub available_for_sale: bool,
    pub vendor: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub price_range: PriceRangePayload,
    #[serde(default)]
    pub compare_at_price_range: Option<PriceRangePayload>,
    #[serde(default)]
    pub featured_image: Option<ImagePayload>,
    #[serde(default)]
    pub images: NodesPayload<ImagePayload>,
    #[serde(default)]
    pub options: Vec<ProductOptionPayload>,
    #[serde(default)]
    pub variants: NodesPayload<VariantPayload>,
}

// =============================================================================
// Collection payloads
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPayload {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_html: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub image: Option<ImagePayload>,
    /// Absent on collection-card selections.
    #[serde(default)]
    pub products: Option<ConnectionPayload<ProductPayload>>,
}

// =============================================================================
// Menu payloads
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct MenuPayload {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<MenuItemPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPayload {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub items: Vec<MenuItemPayload>,
}

// =============================================================================
// Metaobject payloads
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaobjectPayload {
    pub id: String,
    pub handle: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub fields: Vec<MetaobjectFieldPayload>,
}

#[derive(Debug, Deserialize)]
pub struct MetaobjectFieldPayload {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub reference: Option<ReferencePayload>,
}

/// A metaobject field reference; only media image references are selected.
#[derive(Debug, Deserialize)]
pub struct ReferencePayload {
    #[serde(default)]
    pub image: Option<ImagePayload>,
}

// =============================================================================
// Shop policy payloads
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopPoliciesPayload {
    #[serde(default)]
    pub privacy_policy: Option<PolicyPayload>,
    #[serde(default)]
    pub refund_policy: Option<PolicyPayload>,
    #[serde(default)]
    pub terms_of_service: Option<PolicyPayload>,
    #[serde(default)]
    pub shipping_policy: Option<PolicyPayload>,
}

#[derive(Debug, Deserialize)]
pub struct PolicyPayload {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub body: String,
}

// =============================================================================
// Localization payloads
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationPayload {
    #[serde(default)]
    pub available_countries: Vec<CountryPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryPayload {
    pub iso_code: String,
    pub name: String,
}

// =============================================================================
// Cart payloads
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AttributePayload {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerIdentityPayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub customer: Option<CustomerPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCostPayload {
    pub subtotal_amount: Money,
    pub total_amount: Money,
    #[serde(default)]
    pub total_tax_amount: Option<Money>,
    #[serde(default)]
    pub total_duty_amount: Option<Money>,
}

#[derive(Debug, Deserialize)]
pub struct DiscountCodePayload {
    pub code: String,
    pub applicable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountAllocationPayload {
    pub discounted_amount: Money,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseProductPayload {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub vendor: String,
    #[serde(default)]
    pub featured_image: Option<ImagePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandisePayload {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub available_for_sale: bool,
    pub requires_shipping: bool,
    pub price: Money,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOptionPayload>,
    #[serde(default)]
    pub image: Option<ImagePayload>,
    pub product: MerchandiseProductPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinePayload {
    pub id: String,
    pub quantity: i64,
    #[serde(default)]
    pub attributes: Vec<AttributePayload>,
    pub cost: CartLineCostPayload,
    pub merchandise: MerchandisePayload,
    #[serde(default)]
    pub discount_allocations: Vec<DiscountAllocationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCostPayload {
    pub amount_per_quantity: Money,
    #[serde(default)]
    pub compare_at_amount_per_quantity: Option<Money>,
    pub subtotal_amount: Money,
    pub total_amount: Money,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayload {
    pub id: String,
    pub checkout_url: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub note: Option<String>,
    pub total_quantity: i64,
    #[serde(default)]
    pub attributes: Vec<AttributePayload>,
    #[serde(default)]
    pub buyer_identity: Option<BuyerIdentityPayload>,
    pub cost: CartCostPayload,
    #[serde(default)]
    pub discount_codes: Vec<DiscountCodePayload>,
    #[serde(default)]
    pub lines: NodesPayload<CartLinePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserErrorPayload {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Shared payload for every cart mutation (root field aliased to `result`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    #[serde(default)]
    pub cart: Option<CartPayload>,
    #[serde(default)]
    pub user_errors: Vec<UserErrorPayload>,
}

#[derive(Debug, Deserialize)]
pub struct CartMutationData {
    #[serde(default)]
    pub result: Option<CartMutationPayload>,
}
