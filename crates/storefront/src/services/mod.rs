//! External service clients for storefront.
//!
//! # Services
//!
//! - `reviews` - Third-party review widget API (rating summary + recent
//!   reviews per product handle)

pub mod reviews;
