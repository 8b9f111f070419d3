//! Canned platform responses.
//!
//! Builders here produce the GraphQL wire shapes the storefront client
//! expects, keyed on the `operationName` each request carries. Tests mount
//! only the operations they need; an unmatched request fails loudly as a
//! 404 from the mock server, which the client surfaces as a gateway error.

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

/// Checkout URL every canned cart points at.
pub const CHECKOUT_URL: &str = "https://checkout.driftline.test/c/1";

/// Mock a successful GraphQL operation.
#[must_use]
pub fn operation(name: &str, data: Value) -> Mock {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({ "operationName": name })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
}

/// Mock a platform-side failure for one operation.
#[must_use]
pub fn operation_failure(name: &str, status: u16) -> Mock {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({ "operationName": name })))
        .respond_with(ResponseTemplate::new(status))
}

/// A money object in the platform's string-amount shape.
#[must_use]
pub fn money(amount: &str) -> Value {
    json!({ "amount": amount, "currencyCode": "USD" })
}

#[must_use]
pub fn page_info(has_next_page: bool, end_cursor: Option<&str>) -> Value {
    json!({
        "hasNextPage": has_next_page,
        "hasPreviousPage": false,
        "startCursor": null,
        "endCursor": end_cursor,
    })
}

#[must_use]
pub fn connection(nodes: Vec<Value>, page: Value) -> Value {
    json!({ "nodes": nodes, "pageInfo": page })
}

/// A product slim enough for grid cards.
#[must_use]
pub fn product_card(handle: &str, title: &str, price: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{handle}"),
        "handle": handle,
        "title": title,
        "vendor": "Driftline",
        "availableForSale": true,
        "featuredImage": null,
        "priceRange": {
            "minVariantPrice": money(price),
            "maxVariantPrice": money(price),
        },
        "compareAtPriceRange": null,
    })
}

/// A product with enough detail for the product page.
#[must_use]
pub fn product_full(handle: &str, title: &str, price: &str) -> Value {
    let mut product = product_card(handle, title, price);
    let detail = json!({
        "description": "",
        "descriptionHtml": "<p>Cut for long hauls.</p>",
        "options": [],
        "variants": {
            "nodes": [{
                "id": format!("gid://shopify/ProductVariant/{handle}"),
                "title": "Default Title",
                "availableForSale": true,
                "requiresShipping": true,
                "price": money(price),
                "compareAtPrice": null,
                "selectedOptions": [],
                "image": null,
                "sku": null,
            }],
        },
        "images": { "nodes": [] },
        "seo": null,
        "updatedAt": "2026-01-01T00:00:00Z",
    });
    if let (Value::Object(product), Value::Object(detail)) = (&mut product, detail) {
        product.extend(detail);
    }
    product
}

/// One cart line at a fixed $24 unit price.
#[must_use]
pub fn cart_line(id: &str, handle: &str, title: &str, quantity: u32) -> Value {
    let subtotal = format!("{}.00", 24 * quantity);
    json!({
        "id": id,
        "quantity": quantity,
        "attributes": [],
        "cost": {
            "amountPerQuantity": money("24.00"),
            "subtotalAmount": money(&subtotal),
            "totalAmount": money(&subtotal),
        },
        "merchandise": {
            "id": format!("gid://shopify/ProductVariant/{handle}"),
            "title": "Default Title",
            "availableForSale": true,
            "requiresShipping": true,
            "price": money("24.00"),
            "image": null,
            "selectedOptions": [],
            "product": {
                "id": format!("gid://shopify/Product/{handle}"),
                "handle": handle,
                "title": title,
                "vendor": "Driftline",
            },
        },
        "sellingPlanAllocation": null,
    })
}

/// A cart holding the given lines, totals summed at $24 a unit.
#[must_use]
pub fn cart(id: &str, lines: Vec<Value>) -> Value {
    let total_quantity: u64 = lines
        .iter()
        .map(|line| line["quantity"].as_u64().unwrap_or(0))
        .sum();
    let total = format!("{}.00", 24 * total_quantity);
    json!({
        "id": id,
        "checkoutUrl": CHECKOUT_URL,
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-01T00:00:00Z",
        "totalQuantity": total_quantity,
        "note": null,
        "lines": { "nodes": lines },
        "cost": {
            "subtotalAmount": money(&total),
            "totalAmount": money(&total),
            "totalTaxAmount": null,
            "totalDutyAmount": null,
        },
        "discountCodes": [],
        "discountAllocations": [],
        "buyerIdentity": null,
    })
}

/// Wrap a cart in the mutation result envelope.
#[must_use]
pub fn mutation_result(cart: Value) -> Value {
    json!({ "result": { "cart": cart, "userErrors": [] } })
}

/// A mutation the platform rejected with one user error.
#[must_use]
pub fn mutation_user_error(message: &str) -> Value {
    json!({
        "result": {
            "cart": null,
            "userErrors": [{ "code": "INVALID", "field": null, "message": message }],
        },
    })
}

/// A two-item navigation menu.
#[must_use]
pub fn menu(handle: &str) -> Value {
    json!({
        "menu": {
            "id": format!("gid://shopify/Menu/{handle}"),
            "handle": handle,
            "title": "Main menu",
            "items": [
                {
                    "id": "gid://shopify/MenuItem/1",
                    "title": "Shop All",
                    "url": "https://driftline-dev.myshopify.com/products",
                    "type": "ALL_PRODUCTS",
                    "items": [],
                },
                {
                    "id": "gid://shopify/MenuItem/2",
                    "title": "Collections",
                    "url": "https://driftline-dev.myshopify.com/collections",
                    "type": "COLLECTIONS",
                    "items": [],
                },
            ],
        },
    })
}

/// The localization payload with two shippable countries.
#[must_use]
pub fn countries() -> Value {
    json!({
        "localization": {
            "availableCountries": [
                { "isoCode": "US", "name": "United States" },
                { "isoCode": "SE", "name": "Sweden" },
            ],
        },
    })
}

/// A marketing section metaobject with a banner layout.
#[must_use]
pub fn marketing_section(handle: &str, heading: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Metaobject/{handle}"),
        "handle": handle,
        "type": "marketing_section",
        "updatedAt": "2026-01-01T00:00:00Z",
        "fields": [
            { "key": "heading", "value": heading, "reference": null },
            { "key": "body", "value": "<p>Welcome to the drift.</p>", "reference": null },
            { "key": "layout", "value": "banner", "reference": null },
        ],
    })
}

/// An envelope that adds one line of the given product.
#[must_use]
pub fn add_envelope(handle: &str, quantity: u32) -> Value {
    json!({
        "action": "lines-add",
        "input": {
            "lines": [{
                "merchandiseId": format!("gid://shopify/ProductVariant/{handle}"),
                "quantity": quantity,
                "display": {
                    "productHandle": handle,
                    "productTitle": handle,
                    "variantTitle": "Default Title",
                    "price": money("24.00"),
                },
            }],
        },
    })
}
