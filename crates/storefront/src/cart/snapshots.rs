//! Last-known authoritative cart snapshots.
//!
//! Written only from successful platform responses, so after a failed
//! mutation the stored snapshot is still the pre-mutation cart and the
//! rendered view reverts to it. A short TTL bounds staleness; on a miss
//! the cart is re-fetched from the platform.

use std::time::Duration;

use moka::future::Cache;

use crate::shopify::types::Cart;

/// Per-cart-ID store of the last authoritative snapshot.
#[derive(Clone)]
pub struct CartSnapshots {
    cache: Cache<String, Cart>,
}

impl CartSnapshots {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(Duration::from_secs(120)) // 2 minutes
                .build(),
        }
    }

    pub async fn get(&self, cart_id: &str) -> Option<Cart> {
        self.cache.get(cart_id).await
    }

    /// Record a cart the platform just returned.
    pub async fn put(&self, cart: &Cart) {
        self.cache.insert(cart.id.clone(), cart.clone()).await;
    }

    pub async fn remove(&self, cart_id: &str) {
        self.cache.invalidate(cart_id).await;
    }
}

impl Default for CartSnapshots {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use driftline_core::Money;

    use crate::shopify::types::CartCost;

    use super::*;

    fn cart(id: &str, total_quantity: i64) -> Cart {
        Cart {
            id: id.to_string(),
            checkout_url: "https://shop.example.com/checkouts/abc".to_string(),
            created_at: "2026-05-01T12:00:00Z".to_string(),
            updated_at: "2026-05-01T12:00:00Z".to_string(),
            note: None,
            total_quantity,
            attributes: vec![],
            buyer_identity: None,
            cost: CartCost {
                subtotal: Money::zero("SEK"),
                total: Money::zero("SEK"),
                total_tax: None,
                total_duty: None,
            },
            discount_codes: vec![],
            lines: vec![],
        }
    }

    #[tokio::test]
    async fn stores_and_replaces_snapshots_by_cart_id() {
        let snapshots = CartSnapshots::new();
        let id = "gid://shopify/Cart/abc";

        assert!(snapshots.get(id).await.is_none());

        snapshots.put(&cart(id, 1)).await;
        assert_eq!(snapshots.get(id).await.map(|c| c.total_quantity), Some(1));

        snapshots.put(&cart(id, 3)).await;
        assert_eq!(snapshots.get(id).await.map(|c| c.total_quantity), Some(3));

        snapshots.remove(id).await;
        assert!(snapshots.get(id).await.is_none());
    }
}
