//! Cart route handlers.
//!
//! Every cart-mutating form posts one `envelope` field to `POST /cart`; the
//! action inside decides which platform mutation runs. The enhancement
//! script posts the same envelope to `POST /cart/preview` first, which
//! merges it over the last authoritative snapshot and returns the preview
//! fragment without touching the platform. Enhanced requests are detected
//! by the `HX-Request` header and get the lines fragment back; plain form
//! posts get a 303 to the cart page.
//!
//! Cart IDs live in the session; a first lines-add with no session cart
//! creates one on the platform.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::view::CartView;
use crate::cart::{CartAction, OptimisticLineInput, overlay, parse_envelope};
use crate::config::AnalyticsConfig;
use crate::error::AppError;
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::session_keys;
use crate::shopify::ShopifyError;
use crate::shopify::types::{Cart, CartBuyerIdentityInput, CartLineUpdateInput};
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart ID from the session.
async fn get_cart_id(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Set the cart ID in the session.
async fn set_cart_id(
    session: &Session,
    cart_id: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART_ID, cart_id).await
}

// =============================================================================
// Request / Response Plumbing
// =============================================================================

/// The single cart mutation form: one field, one JSON envelope.
#[derive(Debug, Deserialize)]
pub struct CartEnvelopeForm {
    pub envelope: String,
}

/// Whether the request came from the enhancement script.
fn is_hx_request(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|value| value == "true")
}

/// Line IDs the platform knows about. Placeholder IDs from the optimistic
/// overlay never reach the platform.
fn confirmed_line_ids(line_ids: &[String]) -> Vec<String> {
    line_ids
        .iter()
        .filter(|id| !id.starts_with(overlay::OPTIMISTIC_ID_PREFIX))
        .cloned()
        .collect()
}

/// Line updates targeting platform-confirmed lines only.
fn confirmed_line_updates(lines: &[CartLineUpdateInput]) -> Vec<CartLineUpdateInput> {
    lines
        .iter()
        .filter(|line| !line.id.starts_with(overlay::OPTIMISTIC_ID_PREFIX))
        .cloned()
        .collect()
}

/// Action tag for logs.
fn action_name(action: &CartAction) -> &'static str {
    match action {
        CartAction::LinesAdd { .. } => "lines-add",
        CartAction::LinesUpdate { .. } => "lines-update",
        CartAction::LinesRemove { .. } => "lines-remove",
        CartAction::DiscountCodesUpdate { .. } => "discount-codes-update",
        CartAction::BuyerIdentityUpdate { .. } => "buyer-identity-update",
    }
}

// =============================================================================
// Templates
// =============================================================================

/// One entry in the cart page's country selector.
#[derive(Debug, Clone)]
pub struct CountryView {
    pub iso_code: String,
    pub name: String,
    pub selected: bool,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub errors: Vec<String>,
    pub countries: Vec<CountryView>,
    /// Buyer-identity envelope with the current country; the enhancement
    /// script patches the selected country in before submitting.
    pub buyer_envelope: String,
    pub analytics: AnalyticsConfig,
    pub nonce: String,
}

/// Cart lines fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
    pub errors: Vec<String>,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: i64,
}

/// The fragment for enhanced requests, a 303 to the cart page otherwise.
///
/// Successful mutations also fire the `cart-updated` trigger so the header
/// badge refetches its count.
fn cart_response(headers: &HeaderMap, cart: CartView, errors: Vec<String>) -> Response {
    if is_hx_request(headers) {
        (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate { cart, errors },
        )
            .into_response()
    } else {
        Redirect::to("/cart").into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /cart cart page.
///
/// The page always renders; an unfetchable cart degrades to the empty view
/// with a warning rather than an error page.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    nonce: CspNonce,
) -> impl IntoResponse {
    let mut country_code = None;
    let cart = match get_cart_id(&session).await {
        Some(cart_id) => match state.storefront().get_cart(&cart_id).await {
            Ok(cart) => {
                state.snapshots().put(&cart).await;
                country_code = cart
                    .buyer_identity
                    .as_ref()
                    .and_then(|identity| identity.country_code.clone());
                CartView::from(&cart)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch cart {cart_id}: {e}");
                CartView::empty()
            }
        },
        None => CartView::empty(),
    };

    let countries = match state.storefront().get_available_countries().await {
        Ok(countries) => countries
            .into_iter()
            .map(|country| CountryView {
                selected: country_code.as_deref() == Some(country.iso_code.as_str()),
                iso_code: country.iso_code,
                name: country.name,
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to fetch available countries: {e}");
            Vec::new()
        }
    };

    CartShowTemplate {
        cart,
        errors: Vec::new(),
        countries,
        buyer_envelope: buyer_envelope(country_code),
        analytics: state.config().analytics.clone(),
        nonce: nonce.0,
    }
}

/// Buyer-identity envelope carrying only the country.
fn buyer_envelope(country_code: Option<String>) -> String {
    serde_json::to_string(&CartAction::BuyerIdentityUpdate {
        buyer_identity: CartBuyerIdentityInput {
            email: None,
            phone: None,
            country_code,
        },
    })
    .unwrap_or_default()
}

/// POST /cart the cart mutation dispatcher.
///
/// # Errors
///
/// `400` for an unparseable envelope, `502` when the platform call fails
/// outside the user-error path.
#[instrument(skip_all)]
pub async fn dispatch(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CartEnvelopeForm>,
) -> Result<Response, AppError> {
    let action = parse_envelope(&form.envelope)
        .map_err(|e| AppError::BadRequest(format!("Invalid cart envelope: {e}")))?;
    tracing::debug!(action = action_name(&action), "dispatching cart action");

    let cart_id = get_cart_id(&session).await;

    // Only an add can create a cart; anything else without one is a no-op.
    if cart_id.is_none() && !matches!(action, CartAction::LinesAdd { .. }) {
        return Ok(cart_response(&headers, CartView::empty(), Vec::new()));
    }

    match execute_action(&state, cart_id.as_deref(), &action).await {
        Ok(cart) => {
            if let Err(e) = set_cart_id(&session, &cart.id).await {
                tracing::error!("Failed to save cart ID to session: {e}");
            }
            state.snapshots().put(&cart).await;
            Ok(cart_response(&headers, CartView::from(&cart), Vec::new()))
        }
        // The platform rejected the input. Render the last authoritative
        // snapshot with the messages; the store keeps the pre-mutation cart.
        Err(ShopifyError::UserError(user_errors)) => {
            let snapshot = match cart_id.as_deref() {
                Some(id) => state.snapshots().get(id).await,
                None => None,
            };
            let view = snapshot.as_ref().map_or_else(CartView::empty, CartView::from);
            let messages = user_errors.iter().map(|e| e.message.clone()).collect();
            Ok(cart_response(&headers, view, messages))
        }
        Err(e) => Err(AppError::from(e)),
    }
}

/// Run the platform mutation for `action` against `cart_id`.
async fn execute_action(
    state: &AppState,
    cart_id: Option<&str>,
    action: &CartAction,
) -> Result<Cart, ShopifyError> {
    let storefront = state.storefront();
    let known_cart = || {
        cart_id
            .map(str::to_string)
            .ok_or_else(|| ShopifyError::NotFound("cart".to_string()))
    };

    match action {
        CartAction::LinesAdd { lines } => {
            let inputs = lines.iter().map(OptimisticLineInput::to_line_input).collect();
            match cart_id {
                Some(id) => storefront.add_to_cart(id, inputs).await,
                None => storefront.create_cart(inputs, None).await,
            }
        }
        CartAction::LinesUpdate { lines } => {
            let id = known_cart()?;
            let updates = confirmed_line_updates(lines);
            if updates.is_empty() {
                return storefront.get_cart(&id).await;
            }
            storefront.update_cart_lines(&id, updates).await
        }
        CartAction::LinesRemove { line_ids } => {
            let id = known_cart()?;
            let ids = confirmed_line_ids(line_ids);
            if ids.is_empty() {
                return storefront.get_cart(&id).await;
            }
            storefront.remove_from_cart(&id, ids).await
        }
        CartAction::DiscountCodesUpdate { discount_codes } => {
            let id = known_cart()?;
            storefront
                .update_discount_codes(&id, discount_codes.clone())
                .await
        }
        CartAction::BuyerIdentityUpdate { buyer_identity } => {
            let id = known_cart()?;
            validate_country(state, buyer_identity.country_code.as_deref()).await?;
            storefront
                .update_buyer_identity(&id, buyer_identity.clone())
                .await
        }
    }
}

/// Reject country codes the shop cannot sell to. An empty country list from
/// the platform passes everything through.
async fn validate_country(state: &AppState, country_code: Option<&str>) -> Result<(), ShopifyError> {
    let Some(code) = country_code else {
        return Ok(());
    };
    let countries = state.storefront().get_available_countries().await?;
    if countries.is_empty()
        || countries
            .iter()
            .any(|country| country.iso_code.eq_ignore_ascii_case(code))
    {
        return Ok(());
    }
    Err(ShopifyError::UserError(vec![
        crate::shopify::types::CartUserError {
            code: Some("INVALID".to_string()),
            field: Some(vec!["buyerIdentity".to_string(), "countryCode".to_string()]),
            message: format!("Shipping to {code} is not available"),
        },
    ]))
}

/// POST /cart/preview optimistic preview.
///
/// Merges the envelope over the last authoritative snapshot and returns the
/// lines fragment. Never calls the platform, never mutates anything.
///
/// # Errors
///
/// `400` for an unparseable envelope.
#[instrument(skip_all)]
pub async fn preview(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartEnvelopeForm>,
) -> Result<impl IntoResponse, AppError> {
    let action = parse_envelope(&form.envelope)
        .map_err(|e| AppError::BadRequest(format!("Invalid cart envelope: {e}")))?;

    let snapshot = match get_cart_id(&session).await {
        Some(cart_id) => state.snapshots().get(&cart_id).await,
        None => None,
    };

    let merged = overlay::apply(snapshot.as_ref(), std::slice::from_ref(&action));
    Ok(CartItemsTemplate {
        cart: CartView::from_overlay(snapshot.as_ref(), &merged),
        errors: Vec::new(),
    })
}

/// GET /cart/count header badge fragment.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let count = match get_cart_id(&session).await {
        Some(cart_id) => match state.storefront().get_cart(&cart_id).await {
            Ok(cart) => {
                state.snapshots().put(&cart).await;
                cart.total_quantity
            }
            Err(e) => {
                tracing::warn!("Failed to fetch cart for count: {e}");
                0
            }
        },
        None => 0,
    };

    CartCountTemplate { count }
}

/// GET /cart/checkout handoff to the platform checkout.
///
/// An empty or unfetchable cart goes back to the cart page instead.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Response {
    let Some(cart_id) = get_cart_id(&session).await else {
        return Redirect::to("/cart").into_response();
    };

    match state.storefront().get_cart(&cart_id).await {
        Ok(cart) if !cart.lines.is_empty() => Redirect::to(&cart.checkout_url).into_response(),
        Ok(_) => Redirect::to("/cart").into_response(),
        Err(e) => {
            tracing::error!("Failed to get cart for checkout: {e}");
            Redirect::to("/cart").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn hx_header_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_hx_request(&headers));

        headers.insert("HX-Request", HeaderValue::from_static("true"));
        assert!(is_hx_request(&headers));
    }

    #[test]
    fn placeholder_ids_never_reach_the_platform() {
        let ids = vec![
            "gid://shopify/CartLine/1".to_string(),
            "optimistic:gid://shopify/ProductVariant/9".to_string(),
            "gid://shopify/CartLine/2".to_string(),
        ];
        assert_eq!(
            confirmed_line_ids(&ids),
            vec![
                "gid://shopify/CartLine/1".to_string(),
                "gid://shopify/CartLine/2".to_string(),
            ]
        );
    }

    #[test]
    fn placeholder_updates_are_dropped() {
        let updates = vec![
            CartLineUpdateInput {
                id: "optimistic:gid://shopify/ProductVariant/9".to_string(),
                quantity: Some(3),
                merchandise_id: None,
                attributes: None,
                selling_plan_id: None,
            },
            CartLineUpdateInput {
                id: "gid://shopify/CartLine/1".to_string(),
                quantity: Some(2),
                merchandise_id: None,
                attributes: None,
                selling_plan_id: None,
            },
        ];
        let confirmed = confirmed_line_updates(&updates);
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id, "gid://shopify/CartLine/1");
    }

    #[test]
    fn action_names_cover_every_variant() {
        assert_eq!(
            action_name(&CartAction::LinesRemove { line_ids: vec![] }),
            "lines-remove"
        );
        assert_eq!(
            action_name(&CartAction::DiscountCodesUpdate { discount_codes: vec![] }),
            "discount-codes-update"
        );
    }
}
