//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding with the routed error page. All route handlers should
//! return `Result<T, AppError>`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::filters;
use crate::shopify::ShopifyError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Routed error page template.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    message: String,
}

impl AppError {
    /// The response status for this error.
    ///
    /// A platform not-found is the page's not-found; other platform failures
    /// are upstream failures.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Shopify(ShopifyError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Shopify(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match (&self, status) {
            (_, StatusCode::NOT_FOUND) => "Page not found".to_string(),
            (Self::BadRequest(msg), _) => msg.clone(),
            (Self::Shopify(_), _) => "External service error".to_string(),
            _ => "Internal server error".to_string(),
        };

        (
            status,
            ErrorTemplate {
                status: status.as_u16(),
                message,
            },
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use crate::shopify::GraphQLError;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("test".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("test".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_platform_not_found_is_a_page_not_found() {
        let err = AppError::from(ShopifyError::NotFound("Product not found: foo".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_platform_failures_map_to_bad_gateway() {
        let graphql = AppError::from(ShopifyError::GraphQL(vec![GraphQLError {
            message: "boom".to_string(),
            locations: vec![],
            path: vec![],
        }]));
        assert_eq!(graphql.status(), StatusCode::BAD_GATEWAY);

        let rate_limited = AppError::from(ShopifyError::RateLimited(7));
        assert_eq!(rate_limited.status(), StatusCode::BAD_GATEWAY);
    }
}
