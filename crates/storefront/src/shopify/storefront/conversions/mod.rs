//! Type conversion functions for Shopify Storefront API responses.
//!
//! All operations deserialize into the shared wire payloads, so each domain
//! type has exactly one converter.

pub mod cart;
pub mod collections;
pub mod content;
pub mod products;

pub use cart::{convert_cart, convert_user_error};
pub use collections::{convert_collection, convert_collection_connection};
pub use content::{
    convert_country, convert_menu, convert_metaobject, convert_metaobject_connection,
    convert_policies,
};
pub use products::{convert_image, convert_product, convert_product_connection};
