//! End-to-end cart flows: envelope dispatch, session binding, optimistic
//! preview, and the checkout handoff.

use driftline_integration_tests::{TestContext, platform};
use reqwest::StatusCode;
use serde_json::json;

fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn adding_the_first_line_creates_a_platform_cart() {
    let ctx = TestContext::new().await;
    platform::operation(
        "CreateCart",
        platform::mutation_result(platform::cart(
            "gid://shopify/Cart/c1",
            vec![platform::cart_line(
                "gid://shopify/CartLine/1",
                "salt-hoodie",
                "Salt Hoodie",
                1,
            )],
        )),
    )
    .expect(1)
    .mount(&ctx.platform)
    .await;

    let response = ctx.post_cart(&platform::add_envelope("salt-hoodie", 1)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");

    // The session now carries the cart ID, so the badge counts its line.
    platform::operation(
        "GetCart",
        json!({
            "cart": platform::cart(
                "gid://shopify/Cart/c1",
                vec![platform::cart_line(
                    "gid://shopify/CartLine/1",
                    "salt-hoodie",
                    "Salt Hoodie",
                    1,
                )],
            ),
        }),
    )
    .mount(&ctx.platform)
    .await;

    let count = ctx.get("/cart/count").await;
    assert_eq!(count.status(), StatusCode::OK);
    let body = count.text().await.unwrap();
    assert!(body.contains(r#"<span class="cart-count">1</span>"#), "{body}");
}

#[tokio::test]
async fn a_second_add_reuses_the_session_cart() {
    let ctx = TestContext::new().await;
    let line = |quantity| {
        platform::cart_line("gid://shopify/CartLine/1", "salt-hoodie", "Salt Hoodie", quantity)
    };
    platform::operation(
        "CreateCart",
        platform::mutation_result(platform::cart("gid://shopify/Cart/c1", vec![line(1)])),
    )
    .expect(1)
    .mount(&ctx.platform)
    .await;
    platform::operation(
        "CartLinesAdd",
        platform::mutation_result(platform::cart("gid://shopify/Cart/c1", vec![line(2)])),
    )
    .expect(1)
    .mount(&ctx.platform)
    .await;

    let first = ctx.post_cart(&platform::add_envelope("salt-hoodie", 1)).await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    let second = ctx.post_cart(&platform::add_envelope("salt-hoodie", 1)).await;
    assert_eq!(second.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn enhanced_posts_get_the_lines_fragment_and_trigger() {
    let ctx = TestContext::new().await;
    platform::operation(
        "CreateCart",
        platform::mutation_result(platform::cart(
            "gid://shopify/Cart/c1",
            vec![platform::cart_line(
                "gid://shopify/CartLine/1",
                "salt-hoodie",
                "Salt Hoodie",
                1,
            )],
        )),
    )
    .mount(&ctx.platform)
    .await;

    let response = ctx
        .post_cart_enhanced(&platform::add_envelope("salt-hoodie", 1))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("hx-trigger").map(|v| v.to_str().unwrap()),
        Some("cart-updated")
    );

    let body = response.text().await.unwrap();
    assert!(body.contains("Salt Hoodie"), "{body}");
    assert!(body.contains("cart-lines"), "{body}");
    // A fragment, not a full page.
    assert!(!body.contains("<html"), "{body}");
}

#[tokio::test]
async fn rejected_input_renders_messages_over_the_snapshot() {
    let ctx = TestContext::new().await;
    platform::operation(
        "CreateCart",
        platform::mutation_result(platform::cart(
            "gid://shopify/Cart/c1",
            vec![platform::cart_line(
                "gid://shopify/CartLine/1",
                "salt-hoodie",
                "Salt Hoodie",
                1,
            )],
        )),
    )
    .mount(&ctx.platform)
    .await;
    platform::operation(
        "CartDiscountCodesUpdate",
        platform::mutation_user_error("That code has expired"),
    )
    .mount(&ctx.platform)
    .await;

    ctx.post_cart(&platform::add_envelope("salt-hoodie", 1)).await;

    let envelope = json!({
        "action": "discount-codes-update",
        "input": { "discount_codes": ["SPRING25"] },
    });
    let response = ctx.post_cart_enhanced(&envelope).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The message renders over the last authoritative lines, which survive
    // the rejected mutation untouched.
    let body = response.text().await.unwrap();
    assert!(body.contains("That code has expired"), "{body}");
    assert!(body.contains("Salt Hoodie"), "{body}");
}

#[tokio::test]
async fn a_garbage_envelope_is_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.url("/cart"))
        .form(&[("envelope", "not-json")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mutations_without_a_cart_are_noops() {
    // No mocks mounted: a platform call would come back as a gateway error,
    // so the redirect proves the dispatcher never left the process.
    let ctx = TestContext::new().await;

    let envelope = json!({
        "action": "lines-remove",
        "input": { "line_ids": ["gid://shopify/CartLine/1"] },
    });
    let response = ctx.post_cart(&envelope).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");
}

#[tokio::test]
async fn the_preview_never_touches_the_platform() {
    let ctx = TestContext::new().await;

    let response = ctx.post_preview(&platform::add_envelope("salt-hoodie", 2)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("is-optimistic"), "{body}");
    assert!(body.contains("salt-hoodie"), "{body}");
    assert!(body.contains("$48.00"), "{body}");
    assert!(body.contains("estimated"), "{body}");
}

#[tokio::test]
async fn checkout_hands_off_to_the_platform() {
    let ctx = TestContext::new().await;
    platform::operation(
        "CreateCart",
        platform::mutation_result(platform::cart(
            "gid://shopify/Cart/c1",
            vec![platform::cart_line(
                "gid://shopify/CartLine/1",
                "salt-hoodie",
                "Salt Hoodie",
                1,
            )],
        )),
    )
    .mount(&ctx.platform)
    .await;

    ctx.post_cart(&platform::add_envelope("salt-hoodie", 1)).await;

    platform::operation(
        "GetCart",
        json!({
            "cart": platform::cart(
                "gid://shopify/Cart/c1",
                vec![platform::cart_line(
                    "gid://shopify/CartLine/1",
                    "salt-hoodie",
                    "Salt Hoodie",
                    1,
                )],
            ),
        }),
    )
    .mount(&ctx.platform)
    .await;

    let response = ctx.get("/cart/checkout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), platform::CHECKOUT_URL);
}

#[tokio::test]
async fn checkout_with_nothing_to_buy_returns_to_the_cart_page() {
    let ctx = TestContext::new().await;

    // No session cart at all.
    let response = ctx.get("/cart/checkout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");

    // A session cart the platform reports as empty.
    platform::operation(
        "CreateCart",
        platform::mutation_result(platform::cart(
            "gid://shopify/Cart/c1",
            vec![platform::cart_line(
                "gid://shopify/CartLine/1",
                "salt-hoodie",
                "Salt Hoodie",
                1,
            )],
        )),
    )
    .mount(&ctx.platform)
    .await;
    ctx.post_cart(&platform::add_envelope("salt-hoodie", 1)).await;

    platform::operation(
        "GetCart",
        json!({ "cart": platform::cart("gid://shopify/Cart/c1", vec![]) }),
    )
    .mount(&ctx.platform)
    .await;

    let response = ctx.get("/cart/checkout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");
}
