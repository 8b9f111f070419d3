//! Cart view models for templates.
//!
//! Both the authoritative cart and the optimistic overlay render through
//! [`CartView`], so the cart page, the drawer fragment, and the preview
//! fragment all share one template.

use driftline_core::{Money, SalePricing};
use rust_decimal::Decimal;

use crate::cart::CartAction;
use crate::shopify::types::{Cart, CartLine, CartLineUpdateInput};

use super::overlay::{OptimisticCart, OptimisticLine};

/// The platform's variant title for single-variant products; not worth
/// showing.
const DEFAULT_VARIANT_TITLE: &str = "Default Title";

#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub id: Option<String>,
    pub checkout_url: Option<String>,
    pub lines: Vec<CartLineView>,
    pub total_quantity: i64,
    /// Display subtotal. Estimated (and possibly absent) while optimistic.
    pub subtotal: Option<String>,
    pub discount_codes: Vec<DiscountCodeView>,
    /// Whether any rendered line is ahead of the authoritative snapshot.
    pub is_optimistic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLineView {
    pub id: String,
    pub merchandise_id: String,
    pub product_handle: String,
    pub product_title: String,
    pub variant_title: Option<String>,
    pub quantity: i64,
    pub unit_price: Option<String>,
    pub line_total: Option<String>,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    pub is_optimistic: bool,
    pub sale: Option<SaleView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCodeView {
    pub code: String,
    pub applicable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleView {
    pub original: String,
    pub percent_off: u8,
}

impl SaleView {
    fn derive(current: &Money, compare_at: Option<&Money>) -> Option<Self> {
        SalePricing::derive(current, compare_at).map(|sale| Self {
            original: sale.original.display(),
            percent_off: sale.percent_off,
        })
    }
}

impl CartView {
    /// The view for a session with no cart yet.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: None,
            checkout_url: None,
            lines: Vec::new(),
            total_quantity: 0,
            subtotal: None,
            discount_codes: Vec::new(),
            is_optimistic: false,
        }
    }

    /// The view for an overlay result, carrying the snapshot's identity and
    /// discount codes when one exists.
    #[must_use]
    pub fn from_overlay(snapshot: Option<&Cart>, merged: &OptimisticCart) -> Self {
        Self {
            id: snapshot.map(|cart| cart.id.clone()),
            checkout_url: snapshot.map(|cart| cart.checkout_url.clone()),
            lines: merged.lines.iter().map(CartLineView::from).collect(),
            total_quantity: merged.total_quantity,
            subtotal: merged.estimated_subtotal.as_ref().map(Money::display),
            discount_codes: snapshot.map_or_else(Vec::new, discount_codes),
            is_optimistic: merged.lines.iter().any(|line| line.is_optimistic),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Envelope that reapplies every discount code except `code`.
    ///
    /// The discount mutation takes a full replacement list, so removing one
    /// code means resubmitting the rest.
    #[must_use]
    pub fn remove_discount_envelope(&self, code: &str) -> String {
        let discount_codes = self
            .discount_codes
            .iter()
            .filter(|c| c.code != code)
            .map(|c| c.code.clone())
            .collect();
        serde_json::to_string(&CartAction::DiscountCodesUpdate { discount_codes })
            .unwrap_or_default()
    }

    /// Envelope that resubmits the current code list unchanged. The apply
    /// form ships this as its hidden field; the enhancement script appends
    /// the typed code before submitting, so a script-less post is a no-op
    /// rather than a surprise.
    #[must_use]
    pub fn reapply_discount_envelope(&self) -> String {
        let discount_codes = self.discount_codes.iter().map(|c| c.code.clone()).collect();
        serde_json::to_string(&CartAction::DiscountCodesUpdate { discount_codes })
            .unwrap_or_default()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            id: Some(cart.id.clone()),
            checkout_url: Some(cart.checkout_url.clone()),
            lines: cart.lines.iter().map(CartLineView::from).collect(),
            total_quantity: cart.total_quantity,
            subtotal: Some(cart.cost.subtotal.display()),
            discount_codes: discount_codes(cart),
            is_optimistic: false,
        }
    }
}

impl CartLineView {
    /// Envelope for setting this line to `quantity`. A quantity of 0 is a
    /// removal as far as the platform and overlay are concerned.
    #[must_use]
    pub fn update_envelope(&self, quantity: i64) -> String {
        serde_json::to_string(&CartAction::LinesUpdate {
            lines: vec![CartLineUpdateInput {
                id: self.id.clone(),
                quantity: Some(quantity.max(0)),
                merchandise_id: None,
                attributes: None,
                selling_plan_id: None,
            }],
        })
        .unwrap_or_default()
    }

    /// Envelope for removing this line.
    #[must_use]
    pub fn remove_envelope(&self) -> String {
        serde_json::to_string(&CartAction::LinesRemove {
            line_ids: vec![self.id.clone()],
        })
        .unwrap_or_default()
    }
}

fn discount_codes(cart: &Cart) -> Vec<DiscountCodeView> {
    cart.discount_codes
        .iter()
        .map(|code| DiscountCodeView {
            code: code.code.clone(),
            applicable: code.applicable,
        })
        .collect()
}

fn variant_title(title: &str) -> Option<String> {
    (title != DEFAULT_VARIANT_TITLE).then(|| title.to_string())
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            merchandise_id: line.merchandise.id.clone(),
            product_handle: line.merchandise.product.handle.clone(),
            product_title: line.merchandise.product.title.clone(),
            variant_title: variant_title(&line.merchandise.title),
            quantity: line.quantity,
            unit_price: Some(line.cost.amount_per_quantity.display()),
            line_total: Some(line.cost.total_amount.display()),
            image_url: line
                .merchandise
                .image
                .as_ref()
                .or(line.merchandise.product.featured_image.as_ref())
                .map(|image| image.url.clone()),
            image_alt: line
                .merchandise
                .image
                .as_ref()
                .and_then(|image| image.alt_text.clone()),
            is_optimistic: false,
            sale: SaleView::derive(
                &line.merchandise.price,
                line.merchandise.compare_at_price.as_ref(),
            ),
        }
    }
}

impl From<&OptimisticLine> for CartLineView {
    fn from(entry: &OptimisticLine) -> Self {
        if let Some(line) = &entry.line {
            let mut view = Self::from(line);
            view.quantity = entry.quantity;
            view.is_optimistic = entry.is_optimistic;
            if entry.is_optimistic {
                // The authoritative total is for the old quantity.
                view.line_total = entry.unit_price().map(|unit| {
                    Money::new(
                        unit.amount * Decimal::from(entry.quantity),
                        unit.currency_code.clone(),
                    )
                    .display()
                });
            }
            return view;
        }

        let display = entry.display.as_ref();
        Self {
            id: entry.id.clone(),
            merchandise_id: entry.merchandise_id.clone(),
            product_handle: display.map(|d| d.product_handle.clone()).unwrap_or_default(),
            product_title: display.map(|d| d.product_title.clone()).unwrap_or_default(),
            variant_title: display.and_then(|d| variant_title(&d.variant_title)),
            quantity: entry.quantity,
            unit_price: display.map(|d| d.price.display()),
            line_total: display.map(|d| {
                Money::new(
                    d.price.amount * Decimal::from(entry.quantity),
                    d.price.currency_code.clone(),
                )
                .display()
            }),
            image_url: display.and_then(|d| d.image_url.clone()),
            image_alt: None,
            is_optimistic: entry.is_optimistic,
            sale: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::cart::overlay::{self, optimistic_line_id};
    use crate::cart::{CartAction, OptimisticLineDisplay, OptimisticLineInput};
    use crate::shopify::types::{
        CartCost, CartLineCost, CartLineUpdateInput, CartMerchandise, CartMerchandiseProduct,
    };

    use super::*;

    fn sek(amount: &str) -> Money {
        Money::parse(amount, "SEK").unwrap()
    }

    fn line(id: &str, quantity: i64, unit: &str, compare_at: Option<&str>) -> CartLine {
        let unit_price = sek(unit);
        let subtotal = Money::new(
            unit_price.amount * Decimal::from(quantity),
            unit_price.currency_code.clone(),
        );
        CartLine {
            id: id.to_string(),
            quantity,
            attributes: vec![],
            cost: CartLineCost {
                amount_per_quantity: unit_price.clone(),
                compare_at_amount_per_quantity: None,
                subtotal_amount: subtotal.clone(),
                total_amount: subtotal,
            },
            merchandise: CartMerchandise {
                id: "gid://shopify/ProductVariant/10".to_string(),
                title: "Default Title".to_string(),
                sku: None,
                available_for_sale: true,
                requires_shipping: true,
                price: unit_price,
                compare_at_price: compare_at.map(sek),
                selected_options: vec![],
                image: None,
                product: CartMerchandiseProduct {
                    id: "gid://shopify/Product/1".to_string(),
                    handle: "classic-pack".to_string(),
                    title: "Classic Pack".to_string(),
                    vendor: "Driftline".to_string(),
                    featured_image: None,
                },
            },
            discount_allocations: vec![],
        }
    }

    fn cart(lines: Vec<CartLine>) -> Cart {
        let total_quantity = lines.iter().map(|l| l.quantity).sum();
        let subtotal = lines
            .iter()
            .fold(Money::zero("SEK"), |acc, l| acc.plus(&l.cost.subtotal_amount));
        Cart {
            id: "gid://shopify/Cart/abc".to_string(),
            checkout_url: "https://shop.example.com/checkouts/abc".to_string(),
            created_at: "2026-05-01T12:00:00Z".to_string(),
            updated_at: "2026-05-01T12:00:00Z".to_string(),
            note: None,
            total_quantity,
            attributes: vec![],
            buyer_identity: None,
            cost: CartCost {
                subtotal: subtotal.clone(),
                total: subtotal,
                total_tax: None,
                total_duty: None,
            },
            discount_codes: vec![],
            lines,
        }
    }

    #[test]
    fn authoritative_cart_renders_exact_totals() {
        let cart = cart(vec![line("gid://shopify/CartLine/1", 2, "89.00", None)]);
        let view = CartView::from(&cart);

        assert!(!view.is_optimistic);
        assert_eq!(view.subtotal.as_deref(), Some("SEK 178.00"));
        assert_eq!(view.lines[0].line_total.as_deref(), Some("SEK 178.00"));
        assert_eq!(view.lines[0].unit_price.as_deref(), Some("SEK 89.00"));
    }

    #[test]
    fn default_variant_title_is_suppressed() {
        let cart = cart(vec![line("gid://shopify/CartLine/1", 1, "89.00", None)]);
        let view = CartView::from(&cart);

        assert_eq!(view.lines[0].variant_title, None);
        assert_eq!(view.lines[0].product_title, "Classic Pack");
    }

    #[test]
    fn sale_badge_derives_from_compare_at_price() {
        let cart = cart(vec![line(
            "gid://shopify/CartLine/1",
            1,
            "89.00",
            Some("99.00"),
        )]);
        let view = CartView::from(&cart);

        let sale = view.lines[0].sale.as_ref().unwrap();
        assert_eq!(sale.original, "SEK 99.00");
        assert_eq!(sale.percent_off, 10);
    }

    #[test]
    fn bumped_line_estimates_total_from_unit_price() {
        let snapshot = cart(vec![line("gid://shopify/CartLine/1", 2, "89.00", None)]);
        let merged = overlay::apply(
            Some(&snapshot),
            &[CartAction::LinesUpdate {
                lines: vec![CartLineUpdateInput {
                    id: "gid://shopify/CartLine/1".to_string(),
                    quantity: Some(3),
                    merchandise_id: None,
                    attributes: None,
                    selling_plan_id: None,
                }],
            }],
        );
        let view = CartView::from_overlay(Some(&snapshot), &merged);

        assert!(view.is_optimistic);
        assert_eq!(view.id.as_deref(), Some("gid://shopify/Cart/abc"));
        assert_eq!(view.lines[0].quantity, 3);
        assert_eq!(view.lines[0].line_total.as_deref(), Some("SEK 267.00"));
        assert_eq!(view.subtotal.as_deref(), Some("SEK 267.00"));
    }

    #[test]
    fn placeholder_line_renders_from_display_payload() {
        let merged = overlay::apply(
            None,
            &[CartAction::LinesAdd {
                lines: vec![OptimisticLineInput {
                    merchandise_id: "gid://shopify/ProductVariant/42".to_string(),
                    quantity: 2,
                    attributes: None,
                    selling_plan_id: None,
                    display: Some(OptimisticLineDisplay {
                        product_handle: "sea-salt-licorice".to_string(),
                        product_title: "Sea Salt Licorice".to_string(),
                        variant_title: "Default Title".to_string(),
                        price: sek("49.00"),
                        image_url: Some("https://cdn.example.com/p/1.jpg".to_string()),
                    }),
                }],
            }],
        );
        let view = CartView::from_overlay(None, &merged);

        assert!(view.is_optimistic);
        assert_eq!(view.id, None);
        let entry = &view.lines[0];
        assert_eq!(entry.id, optimistic_line_id("gid://shopify/ProductVariant/42"));
        assert!(entry.is_optimistic);
        assert_eq!(entry.product_title, "Sea Salt Licorice");
        assert_eq!(entry.variant_title, None);
        assert_eq!(entry.line_total.as_deref(), Some("SEK 98.00"));
    }

    #[test]
    fn empty_view_has_no_identity() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.checkout_url, None);
        assert_eq!(view.subtotal, None);
    }

    #[test]
    fn line_envelopes_round_trip_and_floor_at_zero() {
        let cart = cart(vec![line("gid://shopify/CartLine/1", 1, "89.00", None)]);
        let view = CartView::from(&cart);
        let line_view = &view.lines[0];

        let bumped = crate::cart::parse_envelope(&line_view.update_envelope(2)).unwrap();
        let CartAction::LinesUpdate { lines } = bumped else {
            panic!("expected lines-update");
        };
        assert_eq!(lines[0].id, "gid://shopify/CartLine/1");
        assert_eq!(lines[0].quantity, Some(2));

        let floored = crate::cart::parse_envelope(&line_view.update_envelope(-3)).unwrap();
        let CartAction::LinesUpdate { lines } = floored else {
            panic!("expected lines-update");
        };
        assert_eq!(lines[0].quantity, Some(0));

        let removed = crate::cart::parse_envelope(&line_view.remove_envelope()).unwrap();
        assert_eq!(
            removed,
            CartAction::LinesRemove {
                line_ids: vec!["gid://shopify/CartLine/1".to_string()],
            }
        );
    }

    #[test]
    fn removing_one_discount_code_resubmits_the_rest() {
        let mut cart = cart(vec![]);
        cart.discount_codes = vec![
            crate::shopify::types::CartDiscountCode {
                code: "WELCOME10".to_string(),
                applicable: true,
            },
            crate::shopify::types::CartDiscountCode {
                code: "FREESHIP".to_string(),
                applicable: true,
            },
        ];
        let view = CartView::from(&cart);

        let envelope = crate::cart::parse_envelope(&view.remove_discount_envelope("WELCOME10"));
        assert_eq!(
            envelope.unwrap(),
            CartAction::DiscountCodesUpdate {
                discount_codes: vec!["FREESHIP".to_string()],
            }
        );
    }
}
