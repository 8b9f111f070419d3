//! Integration tests for the Driftline storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p driftline-integration-tests
//! ```
//!
//! Each test spins up the full storefront router on an ephemeral port with
//! a [`wiremock`] server standing in for the commerce platform, then drives
//! it over HTTP with a cookie-carrying client. Nothing leaves loopback.
//!
//! Canned platform responses live in [`platform`]; their shapes mirror the
//! GraphQL wire format the storefront client deserializes.

pub mod platform;

use driftline_storefront::config::{AnalyticsConfig, ShopifyStorefrontConfig, StorefrontConfig};
use driftline_storefront::state::AppState;
use secrecy::SecretString;
use wiremock::MockServer;

/// A running storefront wired to a mock platform.
///
/// The client carries a cookie store, so consecutive requests share a
/// storefront session the way a browser would. Redirects are never
/// followed; tests assert on them directly.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub platform: MockServer,
}

impl TestContext {
    /// Start the storefront on an ephemeral port against a fresh mock
    /// platform.
    ///
    /// # Panics
    ///
    /// Panics when the server or client cannot be started; no test can
    /// proceed without either.
    pub async fn new() -> Self {
        let platform = MockServer::start().await;

        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("loopback host"),
            port: 0,
            base_url: "http://driftline.test".to_string(),
            shopify: ShopifyStorefrontConfig {
                store: "driftline-dev.myshopify.com".to_string(),
                api_version: "2026-01".to_string(),
                storefront_private_token: SecretString::from("shpat_integration_k9Qz2mX7vB4n"),
                api_url: Some(platform.uri()),
            },
            analytics: AnalyticsConfig::default(),
            reviews: None,
            sentry_dsn: None,
        };

        let state = AppState::new(config).expect("reviews stay unconfigured in tests");
        let app = driftline_storefront::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("storefront serve");
        });

        // The cart rate limiter keys on forwarded client IPs, so every
        // request carries one.
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            reqwest::header::HeaderValue::from_static("203.0.113.9"),
        );

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .default_headers(headers)
            .build()
            .expect("build http client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            platform,
        }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a storefront path.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("get storefront path")
    }

    /// Post an envelope to the cart dispatcher as a plain form submit.
    pub async fn post_cart(&self, envelope: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/cart"))
            .form(&[("envelope", envelope.to_string())])
            .send()
            .await
            .expect("post cart envelope")
    }

    /// Post an envelope the way the enhancement script does.
    pub async fn post_cart_enhanced(&self, envelope: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/cart"))
            .header("HX-Request", "true")
            .form(&[("envelope", envelope.to_string())])
            .send()
            .await
            .expect("post cart envelope")
    }

    /// Post an envelope to the optimistic preview route.
    pub async fn post_preview(&self, envelope: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/cart/preview"))
            .form(&[("envelope", envelope.to_string())])
            .send()
            .await
            .expect("post preview envelope")
    }
}
