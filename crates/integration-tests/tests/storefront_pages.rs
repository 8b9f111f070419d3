//! Page rendering against canned platform data: home, catalog, search,
//! policies, and marketing pages.

use driftline_integration_tests::{TestContext, platform};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn health_probes_respond() {
    let ctx = TestContext::new().await;

    let live = ctx.get("/health").await;
    assert_eq!(live.status(), StatusCode::OK);
    assert_eq!(live.text().await.unwrap(), "OK");

    let ready = ctx.get("/health/ready").await;
    assert_eq!(ready.status(), StatusCode::OK);
    assert_eq!(ready.text().await.unwrap(), "READY");
}

#[tokio::test]
async fn the_home_page_renders_the_featured_collection() {
    let ctx = TestContext::new().await;
    platform::operation(
        "GetCollection",
        json!({
            "collection": {
                "id": "gid://shopify/Collection/1",
                "handle": "frontpage",
                "title": "Featured",
                "products": platform::connection(
                    vec![
                        platform::product_card("salt-hoodie", "Salt Hoodie", "34.00"),
                        platform::product_card("kelp-tee", "Kelp Tee", "28.00"),
                    ],
                    platform::page_info(false, None),
                ),
            },
        }),
    )
    .mount(&ctx.platform)
    .await;

    let response = ctx.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("Salt Hoodie"), "{body}");
    assert!(body.contains("Kelp Tee"), "{body}");
    assert!(body.contains("$34.00"), "{body}");
}

#[tokio::test]
async fn the_product_page_renders_detail_and_add_form() {
    let ctx = TestContext::new().await;
    platform::operation(
        "GetProduct",
        json!({ "product": platform::product_full("salt-hoodie", "Salt Hoodie", "34.00") }),
    )
    .mount(&ctx.platform)
    .await;

    let response = ctx.get("/products/salt-hoodie").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("Salt Hoodie"), "{body}");
    assert!(body.contains("$34.00"), "{body}");
    // The add-to-cart form carries a pre-serialized envelope.
    assert!(body.contains("lines-add"), "{body}");
}

#[tokio::test]
async fn an_unknown_product_is_not_found() {
    let ctx = TestContext::new().await;
    platform::operation("GetProduct", json!({ "product": null }))
        .mount(&ctx.platform)
        .await;

    let response = ctx.get("/products/ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_without_a_query_never_calls_the_platform() {
    // No mocks mounted: a platform call would fail the page.
    let ctx = TestContext::new().await;

    let response = ctx.get("/search").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn search_matches_become_product_cards() {
    let ctx = TestContext::new().await;
    platform::operation(
        "GetProducts",
        json!({
            "products": platform::connection(
                vec![platform::product_card("salt-hoodie", "Salt Hoodie", "34.00")],
                platform::page_info(false, None),
            ),
        }),
    )
    .mount(&ctx.platform)
    .await;

    let response = ctx.get("/search?q=hoodie").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("Salt Hoodie"), "{body}");
}

#[tokio::test]
async fn policy_pages_come_from_the_shop_configuration() {
    let ctx = TestContext::new().await;
    platform::operation(
        "GetShopPolicies",
        json!({
            "shop": {
                "privacyPolicy": {
                    "id": "gid://shopify/ShopPolicy/1",
                    "handle": "privacy-policy",
                    "title": "Privacy policy",
                    "body": "<p>We keep almost nothing.</p>",
                },
                "refundPolicy": null,
                "termsOfService": null,
                "shippingPolicy": null,
            },
        }),
    )
    .mount(&ctx.platform)
    .await;

    let response = ctx.get("/policies/privacy-policy").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Privacy policy"), "{body}");
    assert!(body.contains("We keep almost nothing."), "{body}");

    // A policy the shop never configured.
    let missing = ctx.get("/policies/terms-of-service").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn the_marketing_page_renders_its_section() {
    let ctx = TestContext::new().await;
    platform::operation(
        "GetMetaobject",
        json!({ "metaobject": platform::marketing_section("spring-drop", "The Spring Drop") }),
    )
    .mount(&ctx.platform)
    .await;

    let response = ctx.get("/pages/spring-drop").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("The Spring Drop"), "{body}");
    assert!(body.contains("Welcome to the drift."), "{body}");
}

#[tokio::test]
async fn an_unpublished_marketing_page_is_not_found() {
    let ctx = TestContext::new().await;
    platform::operation("GetMetaobject", json!({ "metaobject": null }))
        .mount(&ctx.platform)
        .await;

    let response = ctx.get("/pages/ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
