//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - Hand-written GraphQL operations sent through `graphql_client`'s
//!   request/response envelope types
//! - Shopify is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for read responses (5 minute TTL);
//!   carts are never read-cached
//!
//! # Example
//!
//! ```rust,ignore
//! use driftline_storefront::shopify::StorefrontClient;
//!
//! let client = StorefrontClient::new(&config.shopify)?;
//!
//! // Get a product
//! let product = client.get_product_by_handle("classic-pack").await?;
//!
//! // Create a cart with a first line
//! let cart = client.create_cart(vec![CartLineInput {
//!     merchandise_id: variant_id,
//!     quantity: 1,
//!     attributes: None,
//!     selling_plan_id: None,
//! }]).await?;
//! ```

mod storefront;
pub mod types;

pub use storefront::StorefrontClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Structured user errors from a cart mutation (e.g., invalid input).
    #[error("User error: {}", format_user_errors(.0))]
    UserError(Vec<CartUserError>),
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_user_errors(errors: &[CartUserError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .map(|e| {
            e.field.as_ref().filter(|f| !f.is_empty()).map_or_else(
                || e.message.clone(),
                |field| format!("{} (field: {})", e.message, field.join(".")),
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}
