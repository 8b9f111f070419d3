//! Review widget API client.
//!
//! Fetches the rating summary and most recent reviews for a product handle.
//! Reviews render only in their deferred fragment, so a failure here never
//! reaches a page render.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::ReviewsConfig;

/// How many recent reviews the fragment shows.
const RECENT_REVIEWS_LIMIT: u32 = 5;

/// Errors that can occur when interacting with the reviews API.
#[derive(Debug, Error)]
pub enum ReviewsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Review widget API client.
#[derive(Clone)]
pub struct ReviewsClient {
    client: reqwest::Client,
    api_url: String,
    shop_domain: String,
}

impl ReviewsClient {
    /// Create a new reviews API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ReviewsConfig) -> Result<Self, ReviewsError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_token.expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| ReviewsError::Parse(format!("Invalid API token format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            shop_domain: config.shop_domain.clone(),
        })
    }

    /// Fetch the rating summary and recent reviews for a product handle.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn product_reviews(&self, handle: &str) -> Result<ProductReviews, ReviewsError> {
        let url = format!("{}/reviews", self.api_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("shop", self.shop_domain.as_str()),
                ("handle", handle),
                ("limit", &RECENT_REVIEWS_LIMIT.to_string()),
            ])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ReviewsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ProductReviews>()
            .await
            .map_err(|e| ReviewsError::Parse(e.to_string()))
    }
}

/// Rating summary plus recent reviews for one product.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductReviews {
    pub summary: ReviewSummary,
    pub reviews: Vec<Review>,
}

/// Aggregate rating for a product.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewSummary {
    pub average_rating: f64,
    pub review_count: u32,
}

/// A single customer review.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Review {
    pub author: String,
    pub rating: u8,
    pub title: Option<String>,
    pub body: String,
    pub created_at: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_config(api_url: String) -> ReviewsConfig {
        ReviewsConfig {
            api_url,
            shop_domain: "test.myshopify.com".to_string(),
            api_token: SecretString::from("rw_test_token".to_string()),
        }
    }

    #[tokio::test]
    async fn fetches_reviews_for_a_handle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reviews"))
            .and(header("authorization", "Bearer rw_test_token"))
            .and(query_param("shop", "test.myshopify.com"))
            .and(query_param("handle", "classic-pack"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "summary": {"average_rating": 4.5, "review_count": 2},
                "reviews": [
                    {
                        "author": "Maja",
                        "rating": 5,
                        "title": "Great bag",
                        "body": "Survived a week of rain.",
                        "created_at": "2026-04-28"
                    },
                    {
                        "author": "Jonas",
                        "rating": 4,
                        "title": null,
                        "body": "Solid straps.",
                        "created_at": "2026-04-20"
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReviewsClient::new(&test_config(server.uri())).unwrap();
        let reviews = client.product_reviews("classic-pack").await.unwrap();

        assert_eq!(reviews.summary.review_count, 2);
        assert!((reviews.summary.average_rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(reviews.reviews.len(), 2);
        assert_eq!(reviews.reviews[0].author, "Maja");
        assert_eq!(reviews.reviews[1].title, None);
    }

    #[tokio::test]
    async fn api_error_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reviews"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = ReviewsClient::new(&test_config(server.uri())).unwrap();
        let err = client.product_reviews("classic-pack").await.unwrap_err();

        assert!(matches!(err, ReviewsError::Api { status: 503, .. }));
    }
}
