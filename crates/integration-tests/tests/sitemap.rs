//! Crawler surface: the sitemap's cursor walk and robots.txt.

use driftline_integration_tests::{TestContext, platform};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

/// One page of the product walk, matched on its cursor.
fn products_page(after: serde_json::Value, nodes: Vec<serde_json::Value>, page: serde_json::Value) -> Mock {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "operationName": "GetProducts",
            "variables": { "after": after },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "products": platform::connection(nodes, page) },
        })))
}

#[tokio::test]
async fn the_sitemap_walks_every_cursor_page() {
    let ctx = TestContext::new().await;
    products_page(
        json!(null),
        vec![platform::product_card("salt-hoodie", "Salt Hoodie", "34.00")],
        platform::page_info(true, Some("cursor-1")),
    )
    .expect(1)
    .mount(&ctx.platform)
    .await;
    products_page(
        json!("cursor-1"),
        vec![platform::product_card("kelp-tee", "Kelp Tee", "28.00")],
        platform::page_info(false, None),
    )
    .expect(1)
    .mount(&ctx.platform)
    .await;
    platform::operation(
        "GetCollections",
        json!({ "collections": platform::connection(vec![], platform::page_info(false, None)) }),
    )
    .mount(&ctx.platform)
    .await;
    platform::operation(
        "GetMetaobjects",
        json!({ "metaobjects": platform::connection(vec![], platform::page_info(false, None)) }),
    )
    .mount(&ctx.platform)
    .await;

    let response = ctx.get("/sitemap.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/xml")
    );

    let body = response.text().await.unwrap();
    assert!(body.contains("<urlset"), "{body}");
    assert!(body.contains("<loc>http://driftline.test/</loc>"), "{body}");
    assert!(
        body.contains("<loc>http://driftline.test/products/salt-hoodie</loc>"),
        "{body}"
    );
    assert!(
        body.contains("<loc>http://driftline.test/products/kelp-tee</loc>"),
        "{body}"
    );
}

#[tokio::test]
async fn robots_points_at_the_sitemap() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/robots.txt").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("User-agent: *"), "{body}");
    assert!(body.contains("Sitemap: http://driftline.test/sitemap.xml"), "{body}");
}
