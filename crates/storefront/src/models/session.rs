//! Session-stored state.
//!
//! The session carries nothing but a reference to the platform cart; all
//! other state is either platform-owned or request-scoped.

/// Session keys.
pub mod keys {
    /// Key for storing the Shopify cart ID.
    pub const CART_ID: &str = "cart_id";
}
