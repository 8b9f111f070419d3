//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::snapshots::CartSnapshots;
use crate::config::StorefrontConfig;
use crate::services::reviews::{ReviewsClient, ReviewsError};
use crate::shopify::StorefrontClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storefront: StorefrontClient,
    reviews: Option<ReviewsClient>,
    snapshots: CartSnapshots,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the reviews client cannot be built from the
    /// configured credentials.
    pub fn new(config: StorefrontConfig) -> Result<Self, ReviewsError> {
        let storefront = StorefrontClient::new(&config.shopify);
        let reviews = config
            .reviews
            .as_ref()
            .map(ReviewsClient::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                storefront,
                reviews,
                snapshots: CartSnapshots::new(),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Storefront API client.
    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }

    /// Get a reference to the reviews client, if reviews are configured.
    #[must_use]
    pub fn reviews(&self) -> Option<&ReviewsClient> {
        self.inner.reviews.as_ref()
    }

    /// Get a reference to the cart snapshot store.
    #[must_use]
    pub fn snapshots(&self) -> &CartSnapshots {
        &self.inner.snapshots
    }
}
