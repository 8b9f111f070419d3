//! GraphQL operations for the Storefront API.
//!
//! Operations are hand-written: each module carries its query text, a
//! `Variables` struct serialized into the request envelope, and a
//! `ResponseData` struct the response `data` deserializes into (built from
//! the shared payloads in [`super::wire`]). Shared field selections live in
//! fragment macros so every operation still ships a complete `&'static str`
//! query.
//!
//! Cart mutations alias their root field to `result`, which is what lets
//! all of them share one `ResponseData` type.

macro_rules! product_card_fragment {
    () => {
        r"
fragment ProductCardFields on Product {
  id
  handle
  title
  availableForSale
  vendor
  priceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  compareAtPriceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  featuredImage { id url altText width height }
}"
    };
}

macro_rules! product_fragment {
    () => {
        r"
fragment ProductFields on Product {
  id
  handle
  title
  description
  descriptionHtml
  availableForSale
  vendor
  tags
  updatedAt
  priceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  compareAtPriceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  featuredImage { id url altText width height }
  images(first: 20) {
    nodes { id url altText width height }
  }
  options {
    id
    name
    optionValues { name }
  }
  variants(first: 100) {
    nodes {
      id
      title
      availableForSale
      sku
      price { amount currencyCode }
      compareAtPrice { amount currencyCode }
      selectedOptions { name value }
      image { id url altText width height }
    }
  }
}"
    };
}

macro_rules! collection_card_fragment {
    () => {
        r"
fragment CollectionCardFields on Collection {
  id
  handle
  title
  description
  descriptionHtml
  updatedAt
  image { id url altText width height }
}"
    };
}

macro_rules! metaobject_fragment {
    () => {
        r"
fragment MetaobjectFields on Metaobject {
  id
  handle
  type
  updatedAt
  fields {
    key
    value
    reference {
      ... on MediaImage {
        image { id url altText width height }
      }
    }
  }
}"
    };
}

macro_rules! cart_fragment {
    () => {
        r"
fragment CartFields on Cart {
  id
  checkoutUrl
  createdAt
  updatedAt
  note
  totalQuantity
  attributes { key value }
  buyerIdentity {
    email
    phone
    countryCode
    customer { id email firstName lastName }
  }
  cost {
    subtotalAmount { amount currencyCode }
    totalAmount { amount currencyCode }
    totalTaxAmount { amount currencyCode }
    totalDutyAmount { amount currencyCode }
  }
  discountCodes { code applicable }
  lines(first: 250) {
    nodes {
      id
      quantity
      attributes { key value }
      cost {
        amountPerQuantity { amount currencyCode }
        compareAtAmountPerQuantity { amount currencyCode }
        subtotalAmount { amount currencyCode }
        totalAmount { amount currencyCode }
      }
      merchandise {
        ... on ProductVariant {
          id
          title
          sku
          availableForSale
          requiresShipping
          price { amount currencyCode }
          compareAtPrice { amount currencyCode }
          selectedOptions { name value }
          image { id url altText width height }
          product {
            id
            handle
            title
            vendor
            featuredImage { id url altText width height }
          }
        }
      }
      discountAllocations {
        discountedAmount { amount currencyCode }
      }
    }
  }
}"
    };
}

macro_rules! user_errors_selection {
    () => {
        "userErrors { code field message }"
    };
}

// =============================================================================
// Catalog queries
// =============================================================================

pub mod get_product {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::wire::ProductPayload;

    pub const OPERATION_NAME: &str = "GetProduct";
    pub const QUERY: &str = concat!(
        "query GetProduct($handle: String!) { product(handle: $handle) { ...ProductFields } }",
        product_fragment!()
    );

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductPayload>,
    }
}

pub mod get_products {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::wire::{ConnectionPayload, ProductPayload};
    use crate::shopify::types::ProductSortKey;

    pub const OPERATION_NAME: &str = "GetProducts";
    pub const QUERY: &str = concat!(
        "query GetProducts($first: Int!, $after: String, $query: String, \
         $sortKey: ProductSortKeys, $reverse: Boolean) { \
         products(first: $first, after: $after, query: $query, sortKey: $sortKey, \
         reverse: $reverse) { \
         nodes { ...ProductCardFields } \
         pageInfo { hasNextPage hasPreviousPage startCursor endCursor } } }",
        product_card_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub first: i64,
        pub after: Option<String>,
        pub query: Option<String>,
        pub sort_key: Option<ProductSortKey>,
        pub reverse: Option<bool>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub products: ConnectionPayload<ProductPayload>,
    }
}

pub mod get_collection {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::wire::CollectionPayload;

    pub const OPERATION_NAME: &str = "GetCollection";
    pub const QUERY: &str = concat!(
        "query GetCollection($handle: String!, $first: Int!, $after: String) { \
         collection(handle: $handle) { \
         ...CollectionCardFields \
         products(first: $first, after: $after) { \
         nodes { ...ProductCardFields } \
         pageInfo { hasNextPage hasPreviousPage startCursor endCursor } } } }",
        collection_card_fragment!(),
        product_card_fragment!()
    );

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub handle: String,
        pub first: i64,
        pub after: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<CollectionPayload>,
    }
}

pub mod get_collections {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::wire::{CollectionPayload, ConnectionPayload};
    use crate::shopify::types::CollectionSortKey;

    pub const OPERATION_NAME: &str = "GetCollections";
    pub const QUERY: &str = concat!(
        "query GetCollections($first: Int!, $after: String, $sortKey: CollectionSortKeys) { \
         collections(first: $first, after: $after, sortKey: $sortKey) { \
         nodes { ...CollectionCardFields } \
         pageInfo { hasNextPage hasPreviousPage startCursor endCursor } } }",
        collection_card_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub first: i64,
        pub after: Option<String>,
        pub sort_key: Option<CollectionSortKey>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub collections: ConnectionPayload<CollectionPayload>,
    }
}

pub mod get_product_recommendations {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::wire::ProductPayload;
    use crate::shopify::types::ProductRecommendationIntent;

    pub const OPERATION_NAME: &str = "GetProductRecommendations";
    pub const QUERY: &str = concat!(
        "query GetProductRecommendations($productId: ID!, $intent: ProductRecommendationIntent) { \
         productRecommendations(productId: $productId, intent: $intent) { \
         ...ProductCardFields } }",
        product_card_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub product_id: String,
        pub intent: Option<ProductRecommendationIntent>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_recommendations: Option<Vec<ProductPayload>>,
    }
}

// =============================================================================
// Content queries (menus, metaobjects, policies, localization)
// =============================================================================

pub mod get_menu {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::wire::MenuPayload;

    pub const OPERATION_NAME: &str = "GetMenu";
    pub const QUERY: &str = "query GetMenu($handle: String!) { \
         menu(handle: $handle) { \
         id handle title \
         items { id title url type \
         items { id title url type \
         items { id title url type } } } } }";

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub menu: Option<MenuPayload>,
    }
}

pub mod get_metaobjects {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::wire::{ConnectionPayload, MetaobjectPayload};

    pub const OPERATION_NAME: &str = "GetMetaobjects";
    pub const QUERY: &str = concat!(
        "query GetMetaobjects($type: String!, $first: Int!, $after: String) { \
         metaobjects(type: $type, first: $first, after: $after) { \
         nodes { ...MetaobjectFields } \
         pageInfo { hasNextPage hasPreviousPage startCursor endCursor } } }",
        metaobject_fragment!()
    );

    #[derive(Debug, Serialize)]
    pub struct Variables {
        #[serde(rename = "type")]
        pub kind: String,
        pub first: i64,
        pub after: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub metaobjects: ConnectionPayload<MetaobjectPayload>,
    }
}

pub mod get_metaobject {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::wire::MetaobjectPayload;

    pub const OPERATION_NAME: &str = "GetMetaobject";
    pub const QUERY: &str = concat!(
        "query GetMetaobject($handle: String!, $type: String!) { \
         metaobject(handle: {handle: $handle, type: $type}) { ...MetaobjectFields } }",
        metaobject_fragment!()
    );

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub handle: String,
        #[serde(rename = "type")]
        pub kind: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub metaobject: Option<MetaobjectPayload>,
    }
}

pub mod get_shop_policies {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::wire::ShopPoliciesPayload;

    pub const OPERATION_NAME: &str = "GetShopPolicies";
    pub const QUERY: &str = "query GetShopPolicies { shop { \
         privacyPolicy { id handle title body } \
         refundPolicy { id handle title body } \
         termsOfService { id handle title body } \
         shippingPolicy { id handle title body } } }";

    #[derive(Debug, Serialize)]
    pub struct Variables;

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub shop: ShopPoliciesPayload,
    }
}

pub mod get_available_countries {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::wire::LocalizationPayload;

    pub const OPERATION_NAME: &str = "GetAvailableCountries";
    pub const QUERY: &str = "query GetAvailableCountries { \
         localization { availableCountries { isoCode name } } }";

    #[derive(Debug, Serialize)]
    pub struct Variables;

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub localization: LocalizationPayload,
    }
}

// =============================================================================
// Cart query and mutations
// =============================================================================

pub mod get_cart {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::wire::CartPayload;

    pub const OPERATION_NAME: &str = "GetCart";
    pub const QUERY: &str = concat!(
        "query GetCart($cartId: ID!) { cart(id: $cartId) { ...CartFields } }",
        cart_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub cart: Option<CartPayload>,
    }
}

pub mod create_cart {
    use serde::Serialize;

    use crate::shopify::storefront::wire::CartMutationData;
    use crate::shopify::types::{CartBuyerIdentityInput, CartLineInput};

    pub const OPERATION_NAME: &str = "CreateCart";
    pub const QUERY: &str = concat!(
        "mutation CreateCart($input: CartInput!) { \
         result: cartCreate(input: $input) { cart { ...CartFields } ",
        user_errors_selection!(),
        " } }",
        cart_fragment!()
    );

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub input: CartCreateInput,
    }

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CartCreateInput {
        pub lines: Vec<CartLineInput>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub buyer_identity: Option<CartBuyerIdentityInput>,
    }

    pub type ResponseData = CartMutationData;
}

pub mod cart_lines_add {
    use serde::Serialize;

    use crate::shopify::storefront::wire::CartMutationData;
    use crate::shopify::types::CartLineInput;

    pub const OPERATION_NAME: &str = "CartLinesAdd";
    pub const QUERY: &str = concat!(
        "mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) { \
         result: cartLinesAdd(cartId: $cartId, lines: $lines) { cart { ...CartFields } ",
        user_errors_selection!(),
        " } }",
        cart_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineInput>,
    }

    pub type ResponseData = CartMutationData;
}

pub mod cart_lines_update {
    use serde::Serialize;

    use crate::shopify::storefront::wire::CartMutationData;
    use crate::shopify::types::CartLineUpdateInput;

    pub const OPERATION_NAME: &str = "CartLinesUpdate";
    pub const QUERY: &str = concat!(
        "mutation CartLinesUpdate($cartId: ID!, $lines: [CartLineUpdateInput!]!) { \
         result: cartLinesUpdate(cartId: $cartId, lines: $lines) { cart { ...CartFields } ",
        user_errors_selection!(),
        " } }",
        cart_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineUpdateInput>,
    }

    pub type ResponseData = CartMutationData;
}

pub mod cart_lines_remove {
    use serde::Serialize;

    use crate::shopify::storefront::wire::CartMutationData;

    pub const OPERATION_NAME: &str = "CartLinesRemove";
    pub const QUERY: &str = concat!(
        "mutation CartLinesRemove($cartId: ID!, $lineIds: [ID!]!) { \
         result: cartLinesRemove(cartId: $cartId, lineIds: $lineIds) { cart { ...CartFields } ",
        user_errors_selection!(),
        " } }",
        cart_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub line_ids: Vec<String>,
    }

    pub type ResponseData = CartMutationData;
}

pub mod cart_discount_codes_update {
    use serde::Serialize;

    use crate::shopify::storefront::wire::CartMutationData;

    pub const OPERATION_NAME: &str = "CartDiscountCodesUpdate";
    pub const QUERY: &str = concat!(
        "mutation CartDiscountCodesUpdate($cartId: ID!, $discountCodes: [String!]) { \
         result: cartDiscountCodesUpdate(cartId: $cartId, discountCodes: $discountCodes) { \
         cart { ...CartFields } ",
        user_errors_selection!(),
        " } }",
        cart_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub discount_codes: Vec<String>,
    }

    pub type ResponseData = CartMutationData;
}

pub mod cart_buyer_identity_update {
    use serde::Serialize;

    use crate::shopify::storefront::wire::CartMutationData;
    use crate::shopify::types::CartBuyerIdentityInput;

    pub const OPERATION_NAME: &str = "CartBuyerIdentityUpdate";
    pub const QUERY: &str = concat!(
        "mutation CartBuyerIdentityUpdate($cartId: ID!, $buyerIdentity: CartBuyerIdentityInput!) { \
         result: cartBuyerIdentityUpdate(cartId: $cartId, buyerIdentity: $buyerIdentity) { \
         cart { ...CartFields } ",
        user_errors_selection!(),
        " } }",
        cart_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub buyer_identity: CartBuyerIdentityInput,
    }

    pub type ResponseData = CartMutationData;
}
