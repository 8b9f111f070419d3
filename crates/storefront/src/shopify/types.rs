//! Domain types for the Shopify Storefront API.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! structs the GraphQL layer deserializes.

use driftline_core::Money;
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Price range for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
    /// Maximum price among all variants.
    pub max_variant_price: Money,
}

// =============================================================================
// Image Types
// =============================================================================

/// Product or collection image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Shopify image ID.
    pub id: Option<String>,
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

// =============================================================================
// Product Types
// =============================================================================

/// Selected option on a product variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size", "Color").
    pub name: String,
    /// Selected value (e.g., "Large", "Blue").
    pub value: String,
}

/// Product option definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option ID.
    pub id: String,
    /// Option name (e.g., "Size").
    pub name: String,
    /// Available values (e.g., `["Small", "Medium", "Large"]`).
    pub values: Vec<String>,
}

/// A product variant (specific combination of options).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID.
    pub id: String,
    /// Variant title (combination of option values).
    pub title: String,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// SKU code.
    pub sku: Option<String>,
    /// Current price.
    pub price: Money,
    /// Compare-at price (original price if on sale).
    pub compare_at_price: Option<Money>,
    /// Selected options for this variant.
    pub selected_options: Vec<SelectedOption>,
    /// Variant image.
    pub image: Option<Image>,
}

/// A product in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    /// Whether any variant is available.
    pub available_for_sale: bool,
    /// Vendor name.
    pub vendor: String,
    /// Product tags.
    pub tags: Vec<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
    /// Price range across variants.
    pub price_range: PriceRange,
    /// Compare-at price range.
    pub compare_at_price_range: Option<PriceRange>,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// All product images.
    pub images: Vec<Image>,
    /// Product options.
    pub options: Vec<ProductOption>,
    /// Product variants.
    pub variants: Vec<ProductVariant>,
}

// =============================================================================
// Collection Types
// =============================================================================

/// A collection of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    /// Last update timestamp.
    pub updated_at: Option<String>,
    /// Collection image.
    pub image: Option<Image>,
    /// Products in this collection, with their page info.
    pub products: ProductConnection,
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor for the first item.
    pub start_cursor: Option<String>,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}

/// Paginated list of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConnection {
    /// Products in this page.
    pub products: Vec<Product>,
    /// Pagination info.
    pub page_info: PageInfo,
}

/// Paginated list of collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConnection {
    /// Collections in this page.
    pub collections: Vec<Collection>,
    /// Pagination info.
    pub page_info: PageInfo,
}

/// Paginated list of metaobjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaobjectConnection {
    /// Metaobjects in this page.
    pub metaobjects: Vec<Metaobject>,
    /// Pagination info.
    pub page_info: PageInfo,
}

// =============================================================================
// Menu Types
// =============================================================================

/// A navigation menu configured in the platform admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    /// Menu ID.
    pub id: String,
    /// URL handle (e.g., "main-menu", "footer").
    pub handle: String,
    /// Menu title.
    pub title: String,
    /// Top-level items.
    pub items: Vec<MenuItem>,
}

/// One menu entry, possibly nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Item ID.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Destination URL.
    pub url: Option<String>,
    /// Item type (e.g., "COLLECTION", "PAGE", "HTTP").
    #[serde(rename = "item_type")]
    pub kind: String,
    /// Nested items.
    pub items: Vec<MenuItem>,
}

// =============================================================================
// Metaobject Types (CMS content)
// =============================================================================

/// A structured content record driving marketing sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metaobject {
    /// Metaobject ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Metaobject definition type (e.g., "marketing_section").
    #[serde(rename = "object_type")]
    pub kind: String,
    /// Last update timestamp.
    pub updated_at: Option<String>,
    /// Field values.
    pub fields: Vec<MetaobjectField>,
}

/// One field on a metaobject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaobjectField {
    /// Field key.
    pub key: String,
    /// Raw field value.
    pub value: Option<String>,
    /// Resolved image reference, when the field references media.
    pub reference_image: Option<Image>,
}

impl Metaobject {
    /// Look up a field's raw value by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .and_then(|f| f.value.as_deref())
    }

    /// Look up a field's image reference by key.
    #[must_use]
    pub fn image(&self, key: &str) -> Option<&Image> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .and_then(|f| f.reference_image.as_ref())
    }
}

// =============================================================================
// Shop Policy Types
// =============================================================================

/// A shop policy document (privacy, refunds, terms, shipping).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopPolicy {
    /// Policy ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Policy title.
    pub title: String,
    /// Policy body HTML.
    pub body: String,
}

// =============================================================================
// Localization Types
// =============================================================================

/// A country the shop can sell to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub iso_code: String,
    /// Display name.
    pub name: String,
}

// =============================================================================
// Cart Types
// =============================================================================

/// Custom attribute (key-value pair).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: Option<String>,
}

/// Input for custom attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInput {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: String,
}

/// Merchandise in a cart line (simplified product variant info).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartMerchandise {
    /// Variant ID.
    pub id: String,
    /// Variant title.
    pub title: String,
    /// SKU.
    pub sku: Option<String>,
    /// Whether available for sale.
    pub available_for_sale: bool,
    /// Whether requires shipping.
    pub requires_shipping: bool,
    /// Current price.
    pub price: Money,
    /// Compare-at price.
    pub compare_at_price: Option<Money>,
    /// Selected options.
    pub selected_options: Vec<SelectedOption>,
    /// Variant image.
    pub image: Option<Image>,
    /// Parent product info.
    pub product: CartMerchandiseProduct,
}

/// Simplified product info for cart merchandise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartMerchandiseProduct {
    /// Product ID.
    pub id: String,
    /// Product handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Vendor.
    pub vendor: String,
    /// Featured image.
    pub featured_image: Option<Image>,
}

/// Cost for a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineCost {
    /// Price per unit.
    pub amount_per_quantity: Money,
    /// Compare-at price per unit.
    pub compare_at_amount_per_quantity: Option<Money>,
    /// Subtotal (before discounts).
    pub subtotal_amount: Money,
    /// Total (after discounts).
    pub total_amount: Money,
}

/// A line item in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Cart line ID.
    pub id: String,
    /// Quantity.
    pub quantity: i64,
    /// Custom attributes.
    pub attributes: Vec<Attribute>,
    /// Line cost.
    pub cost: CartLineCost,
    /// Product variant.
    pub merchandise: CartMerchandise,
    /// Discount amounts applied to this line.
    pub discount_allocations: Vec<DiscountAllocation>,
}

/// Discount allocation on a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountAllocation {
    /// Amount discounted.
    pub discounted_amount: Money,
}

/// Cart cost summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartCost {
    /// Subtotal before tax/shipping.
    #[serde(rename = "subtotal_amount")]
    pub subtotal: Money,
    /// Total amount.
    #[serde(rename = "total_amount")]
    pub total: Money,
    /// Total tax amount.
    #[serde(rename = "total_tax_amount")]
    pub total_tax: Option<Money>,
    /// Total duty amount.
    #[serde(rename = "total_duty_amount")]
    pub total_duty: Option<Money>,
}

/// Discount code applied to cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartDiscountCode {
    /// The discount code.
    pub code: String,
    /// Whether the code is applicable.
    pub applicable: bool,
}

/// Customer info in buyer identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartCustomer {
    /// Customer ID.
    pub id: String,
    /// Email.
    pub email: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
}

/// Buyer identity for the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartBuyerIdentity {
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Country code.
    pub country_code: Option<String>,
    /// Logged-in customer.
    pub customer: Option<CartCustomer>,
}

/// A shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart ID.
    pub id: String,
    /// Checkout URL.
    pub checkout_url: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Cart note.
    pub note: Option<String>,
    /// Total item quantity.
    pub total_quantity: i64,
    /// Custom attributes.
    pub attributes: Vec<Attribute>,
    /// Buyer identity.
    pub buyer_identity: Option<CartBuyerIdentity>,
    /// Cart cost summary.
    pub cost: CartCost,
    /// Applied discount codes.
    pub discount_codes: Vec<CartDiscountCode>,
    /// Cart lines.
    pub lines: Vec<CartLine>,
}

/// Input for adding a line to cart.
///
/// Serializes in the platform's camelCase input shape so it can be passed
/// straight through as mutation variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: String,
    /// Quantity to add.
    pub quantity: i64,
    /// Custom attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeInput>>,
    /// Selling plan ID (for subscriptions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_plan_id: Option<String>,
}

/// Input for updating a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineUpdateInput {
    /// Cart line ID.
    pub id: String,
    /// New quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// New merchandise ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchandise_id: Option<String>,
    /// New attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeInput>>,
    /// New selling plan ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_plan_id: Option<String>,
}

/// Input for updating the cart's buyer identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartBuyerIdentityInput {
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// User error from cart mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartUserError {
    /// Error code.
    pub code: Option<String>,
    /// Field path that caused the error.
    pub field: Option<Vec<String>>,
    /// Human-readable error message.
    pub message: String,
}

// =============================================================================
// Sort Keys
// =============================================================================

/// Sort keys for product queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSortKey {
    /// Sort by title.
    Title,
    /// Sort by last update.
    UpdatedAt,
    /// Sort by creation date.
    CreatedAt,
    /// Sort by best selling.
    BestSelling,
    /// Sort by price.
    Price,
    /// Sort by ID.
    Id,
    /// Sort by relevance (for search).
    Relevance,
}

/// Sort keys for collection queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionSortKey {
    /// Sort by title.
    Title,
    /// Sort by last update.
    UpdatedAt,
    /// Sort by ID.
    Id,
    /// Sort by relevance.
    Relevance,
}

/// Intent for product recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductRecommendationIntent {
    /// Related products.
    Related,
    /// Complementary products.
    Complementary,
}
