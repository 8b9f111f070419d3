//! Cart type conversion functions.

use crate::shopify::storefront::wire;
use crate::shopify::types::{
    Attribute, Cart, CartBuyerIdentity, CartCost, CartCustomer, CartDiscountCode, CartLine,
    CartLineCost, CartMerchandise, CartMerchandiseProduct, CartUserError, DiscountAllocation,
};

use super::products::{convert_image, convert_selected_option};

pub fn convert_cart(cart: wire::CartPayload) -> Cart {
    Cart {
        id: cart.id,
        checkout_url: cart.checkout_url,
        created_at: cart.created_at,
        updated_at: cart.updated_at,
        note: cart.note,
        total_quantity: cart.total_quantity,
        attributes: cart.attributes.into_iter().map(convert_attribute).collect(),
        buyer_identity: cart.buyer_identity.map(convert_buyer_identity),
        cost: convert_cart_cost(cart.cost),
        discount_codes: cart
            .discount_codes
            .into_iter()
            .map(|d| CartDiscountCode {
                code: d.code,
                applicable: d.applicable,
            })
            .collect(),
        lines: cart.lines.nodes.into_iter().map(convert_cart_line).collect(),
    }
}

pub fn convert_user_error(error: wire::UserErrorPayload) -> CartUserError {
    CartUserError {
        code: error.code,
        field: error.field,
        message: error.message,
    }
}

fn convert_attribute(a: wire::AttributePayload) -> Attribute {
    Attribute {
        key: a.key,
        value: a.value,
    }
}

fn convert_buyer_identity(b: wire::BuyerIdentityPayload) -> CartBuyerIdentity {
    CartBuyerIdentity {
        email: b.email,
        phone: b.phone,
        country_code: b.country_code,
        customer: b.customer.map(|c| CartCustomer {
            id: c.id,
            email: c.email,
            first_name: c.first_name,
            last_name: c.last_name,
        }),
    }
}

fn convert_cart_cost(cost: wire::CartCostPayload) -> CartCost {
    CartCost {
        subtotal: cost.subtotal_amount,
        total: cost.total_amount,
        total_tax: cost.total_tax_amount,
        total_duty: cost.total_duty_amount,
    }
}

fn convert_cart_line(line: wire::CartLinePayload) -> CartLine {
    CartLine {
        id: line.id,
        quantity: line.quantity,
        attributes: line.attributes.into_iter().map(convert_attribute).collect(),
        cost: CartLineCost {
            amount_per_quantity: line.cost.amount_per_quantity,
            compare_at_amount_per_quantity: line.cost.compare_at_amount_per_quantity,
            subtotal_amount: line.cost.subtotal_amount,
            total_amount: line.cost.total_amount,
        },
        merchandise: convert_merchandise(line.merchandise),
        discount_allocations: line
            .discount_allocations
            .into_iter()
            .map(|d| DiscountAllocation {
                discounted_amount: d.discounted_amount,
            })
            .collect(),
    }
}

fn convert_merchandise(v: wire::MerchandisePayload) -> CartMerchandise {
    CartMerchandise {
        id: v.id,
        title: v.title,
        sku: v.sku,
        available_for_sale: v.available_for_sale,
        requires_shipping: v.requires_shipping,
        price: v.price,
        compare_at_price: v.compare_at_price,
        selected_options: v
            .selected_options
            .into_iter()
            .map(convert_selected_option)
            .collect(),
        image: v.image.map(convert_image),
        product: CartMerchandiseProduct {
            id: v.product.id,
            handle: v.product.handle,
            title: v.product.title,
            vendor: v.product.vendor,
            featured_image: v.product.featured_image.map(convert_image),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cart_payload_converts() {
        let json = serde_json::json!({
            "id": "gid://shopify/Cart/abc123",
            "checkoutUrl": "https://shop.example.com/checkouts/abc123",
            "createdAt": "2026-05-01T12:00:00Z",
            "updatedAt": "2026-05-01T12:05:00Z",
            "note": null,
            "totalQuantity": 3,
            "attributes": [],
            "buyerIdentity": {
                "email": "anna@example.com",
                "countryCode": "SE",
                "customer": null
            },
            "cost": {
                "subtotalAmount": { "amount": "267.00", "currencyCode": "SEK" },
                "totalAmount": { "amount": "267.00", "currencyCode": "SEK" },
                "totalTaxAmount": null
            },
            "discountCodes": [{ "code": "WELCOME10", "applicable": true }],
            "lines": { "nodes": [{
                "id": "gid://shopify/CartLine/1",
                "quantity": 3,
                "attributes": [{ "key": "gift_note", "value": "Grattis!" }],
                "cost": {
                    "amountPerQuantity": { "amount": "89.00", "currencyCode": "SEK" },
                    "subtotalAmount": { "amount": "267.00", "currencyCode": "SEK" },
                    "totalAmount": { "amount": "267.00", "currencyCode": "SEK" }
                },
                "merchandise": {
                    "id": "gid://shopify/ProductVariant/10",
                    "title": "Single",
                    "sku": "DL-CP-1",
                    "availableForSale": true,
                    "requiresShipping": true,
                    "price": { "amount": "89.00", "currencyCode": "SEK" },
                    "selectedOptions": [{ "name": "Size", "value": "Single" }],
                    "product": {
                        "id": "gid://shopify/Product/2",
                        "handle": "classic-pack",
                        "title": "Classic Pack",
                        "vendor": "Driftline"
                    }
                },
                "discountAllocations": []
            }] }
        });

        let payload: wire::CartPayload = serde_json::from_value(json).unwrap();
        let cart = convert_cart(payload);

        assert_eq!(cart.id, "gid://shopify/Cart/abc123");
        assert_eq!(cart.total_quantity, 3);
        assert_eq!(cart.cost.subtotal.display(), "SEK 267.00");
        assert_eq!(cart.discount_codes.len(), 1);
        assert!(cart.discount_codes[0].applicable);

        let line = &cart.lines[0];
        assert_eq!(line.quantity, 3);
        assert_eq!(line.merchandise.product.handle, "classic-pack");
        assert_eq!(line.attributes[0].value.as_deref(), Some("Grattis!"));

        let identity = cart.buyer_identity.unwrap();
        assert_eq!(identity.country_code.as_deref(), Some("SE"));
    }

    #[test]
    fn user_error_converts_verbatim() {
        let json = serde_json::json!({
            "code": "INVALID",
            "field": ["lines", "0", "quantity"],
            "message": "Quantity must be positive"
        });

        let payload: wire::UserErrorPayload = serde_json::from_value(json).unwrap();
        let error = convert_user_error(payload);

        assert_eq!(error.code.as_deref(), Some("INVALID"));
        assert_eq!(
            error.field,
            Some(vec![
                "lines".to_string(),
                "0".to_string(),
                "quantity".to_string()
            ])
        );
        assert_eq!(error.message, "Quantity must be positive");
    }
}
