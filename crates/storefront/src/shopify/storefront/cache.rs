//! Cache types for Storefront API responses.
//!
//! Catalog and content reads cache under these keys; cart reads and
//! mutations never do. Search queries (products with a `query` filter) skip
//! the cache entirely, so [`CacheKey::Products`] needs no query field.

use crate::shopify::types::{
    Collection, CollectionConnection, Country, Menu, Metaobject, MetaobjectConnection, Product,
    ProductConnection, ProductRecommendationIntent, ProductSortKey, ShopPolicy,
};

/// Cache key for catalog and content reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
    Products {
        cursor: Option<String>,
        sort: Option<ProductSortKey>,
        reverse: Option<bool>,
    },
    Collection {
        handle: String,
        cursor: Option<String>,
    },
    Collections {
        cursor: Option<String>,
    },
    Recommendations {
        product_id: String,
        intent: Option<ProductRecommendationIntent>,
    },
    Menu(String),
    Metaobjects {
        kind: String,
        cursor: Option<String>,
    },
    Metaobject {
        kind: String,
        handle: String,
    },
    Policies,
    Countries,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(ProductConnection),
    Collection(Box<Collection>),
    Collections(CollectionConnection),
    Recommendations(Vec<Product>),
    Menu(Box<Menu>),
    Metaobjects(MetaobjectConnection),
    Metaobject(Box<Metaobject>),
    Policies(Vec<ShopPolicy>),
    Countries(Vec<Country>),
}
