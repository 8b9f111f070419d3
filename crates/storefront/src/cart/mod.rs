//! Cart mutation envelope, optimistic overlay, and view models.
//!
//! Every cart-mutating form on the site posts to a single route with one
//! `envelope` field containing a JSON-encoded [`CartAction`]. The same
//! envelope, posted to the preview route instead, is merged over the last
//! authoritative snapshot by [`overlay`] without calling the platform, so
//! the UI can reflect the user's intent before the real mutation confirms.

pub mod overlay;
pub mod snapshots;
pub mod view;

use driftline_core::Money;
use serde::{Deserialize, Serialize};

use crate::shopify::types::{
    AttributeInput, CartBuyerIdentityInput, CartLineInput, CartLineUpdateInput,
};

/// One cart mutation intent, as posted by storefront forms.
///
/// The action set is closed: anything else in the `action` tag fails to
/// parse and the request is rejected before any platform call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "input", rename_all = "kebab-case")]
pub enum CartAction {
    LinesAdd { lines: Vec<OptimisticLineInput> },
    LinesUpdate { lines: Vec<CartLineUpdateInput> },
    LinesRemove { line_ids: Vec<String> },
    DiscountCodesUpdate { discount_codes: Vec<String> },
    BuyerIdentityUpdate { buyer_identity: CartBuyerIdentityInput },
}

/// Parse the `envelope` form field.
///
/// # Errors
///
/// Returns the underlying serde error for malformed JSON or an action
/// outside the closed set.
pub fn parse_envelope(raw: &str) -> Result<CartAction, serde_json::Error> {
    serde_json::from_str(raw)
}

/// A line to add, together with the display payload the optimistic overlay
/// renders before the platform confirms the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimisticLineInput {
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
    /// Display data for the unconfirmed line. Never sent to the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<OptimisticLineDisplay>,
}

impl OptimisticLineInput {
    /// The platform input for this line, with the display payload stripped.
    #[must_use]
    pub fn to_line_input(&self) -> CartLineInput {
        CartLineInput {
            merchandise_id: self.merchandise_id.clone(),
            quantity: self.quantity,
            attributes: self.attributes.clone(),
            selling_plan_id: self.selling_plan_id.clone(),
        }
    }
}

/// What an unconfirmed line looks like while the mutation is in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimisticLineDisplay {
    /// Product handle, for the line's link.
    pub product_handle: String,
    /// Product title.
    pub product_title: String,
    /// Variant title.
    pub variant_title: String,
    /// Unit price.
    pub price: Money,
    /// Line image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn lines_add_envelope_parses() {
        let raw = r#"{
            "action": "lines-add",
            "input": { "lines": [{
                "merchandiseId": "gid://shopify/ProductVariant/42",
                "quantity": 2,
                "display": {
                    "productHandle": "classic-pack",
                    "productTitle": "Classic Pack",
                    "variantTitle": "Single",
                    "price": { "amount": "89.00", "currencyCode": "SEK" }
                }
            }] }
        }"#;

        let action = parse_envelope(raw).unwrap();
        let CartAction::LinesAdd { lines } = action else {
            panic!("expected lines-add");
        };
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].merchandise_id, "gid://shopify/ProductVariant/42");
        assert_eq!(
            lines[0].display.as_ref().unwrap().product_handle,
            "classic-pack"
        );
    }

    #[test]
    fn every_action_tag_round_trips() {
        let actions = vec![
            CartAction::LinesAdd { lines: vec![] },
            CartAction::LinesUpdate { lines: vec![] },
            CartAction::LinesRemove { line_ids: vec!["gid://shopify/CartLine/1".to_string()] },
            CartAction::DiscountCodesUpdate { discount_codes: vec!["WELCOME10".to_string()] },
            CartAction::BuyerIdentityUpdate {
                buyer_identity: CartBuyerIdentityInput {
                    email: None,
                    phone: None,
                    country_code: Some("SE".to_string()),
                },
            },
        ];
        let tags = [
            "lines-add",
            "lines-update",
            "lines-remove",
            "discount-codes-update",
            "buyer-identity-update",
        ];

        for (action, tag) in actions.into_iter().zip(tags) {
            let json = serde_json::to_value(&action).unwrap();
            assert_eq!(json["action"], *tag);
            let back = parse_envelope(&json.to_string()).unwrap();
            assert_eq!(serde_json::to_value(&back).unwrap(), json);
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        let raw = r#"{ "action": "cart-steal", "input": {} }"#;
        assert!(parse_envelope(raw).is_err());
    }

    #[test]
    fn display_payload_is_stripped_from_platform_input() {
        let input = OptimisticLineInput {
            merchandise_id: "gid://shopify/ProductVariant/42".to_string(),
            quantity: 1,
            attributes: None,
            selling_plan_id: None,
            display: Some(OptimisticLineDisplay {
                product_handle: "classic-pack".to_string(),
                product_title: "Classic Pack".to_string(),
                variant_title: "Single".to_string(),
                price: Money::parse("89.00", "SEK").unwrap(),
                image_url: None,
            }),
        };

        let json = serde_json::to_value(input.to_line_input()).unwrap();
        assert!(json.get("display").is_none());
        assert_eq!(json["merchandiseId"], "gid://shopify/ProductVariant/42");
    }
}
