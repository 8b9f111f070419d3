//! Shopify Storefront API client implementation.
//!
//! Operations are hand-written GraphQL documents sent through
//! `graphql_client`'s request/response envelope with `reqwest` 0.13 for
//! HTTP. Catalog and content reads are cached with `moka` (5-minute TTL);
//! cart reads and mutations always hit the platform.

mod cache;
mod conversions;
mod queries;
mod wire;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{QueryBody, Response};
use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::ShopifyError;
use crate::shopify::types::{
    Cart, CartBuyerIdentityInput, CartLineInput, CartLineUpdateInput, Collection,
    CollectionConnection, CollectionSortKey, Country, Menu, Metaobject, MetaobjectConnection,
    Product, ProductConnection, ProductRecommendationIntent, ProductSortKey, ShopPolicy,
};

use cache::{CacheKey, CacheValue};
use conversions::{
    convert_cart, convert_collection, convert_collection_connection, convert_country,
    convert_menu, convert_metaobject, convert_metaobject_connection, convert_policies,
    convert_product, convert_product_connection, convert_user_error,
};
use wire::CartMutationData;

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides type-safe access to products, collections, content, and cart
/// operations. Catalog and content reads are cached for 5 minutes.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let endpoint = config.api_url.clone().unwrap_or_else(|| {
            format!(
                "https://{}/api/{}/graphql.json",
                config.store, config.api_version
            )
        });

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token: config.storefront_private_token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation.
    async fn execute<V, D>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: V,
    ) -> Result<D, ShopifyError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let request_body = QueryBody {
            variables,
            query,
            operation_name,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            // See: https://shopify.dev/docs/storefronts/headless/building-with-the-storefront-api/getting-started
            .header(
                "Shopify-Storefront-Private-Token",
                &self.inner.access_token,
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        // Check for non-success status codes
        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![super::GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        // Parse the response
        let response: Response<D> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        // Check for GraphQL errors
        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            // Log the raw errors for debugging
            tracing::debug!(
                errors = ?errors,
                "GraphQL errors in response"
            );

            return Err(ShopifyError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| super::GraphQLError {
                        message: e.message,
                        locations: e.locations.map_or_else(Vec::new, |locs| {
                            locs.into_iter()
                                .map(|l| super::GraphQLErrorLocation {
                                    line: i64::from(l.line),
                                    column: i64::from(l.column),
                                })
                                .collect()
                        }),
                        path: e.path.map_or_else(Vec::new, |p| {
                            p.into_iter()
                                .map(|fragment| match fragment {
                                    graphql_client::PathFragment::Key(s) => {
                                        serde_json::Value::String(s)
                                    }
                                    graphql_client::PathFragment::Index(i) => {
                                        serde_json::Value::Number(i.into())
                                    }
                                })
                                .collect()
                        }),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![super::GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(&self, handle: &str) -> Result<Product, ShopifyError> {
        let cache_key = CacheKey::Product(handle.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let variables = queries::get_product::Variables {
            handle: handle.to_string(),
        };

        let data: queries::get_product::ResponseData = self
            .execute(
                queries::get_product::OPERATION_NAME,
                queries::get_product::QUERY,
                variables,
            )
            .await?;

        let product = data
            .product
            .map(convert_product)
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get a paginated list of products, optionally filtered and sorted.
    ///
    /// Search queries (`query` set) bypass the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        first: i64,
        after: Option<String>,
        query: Option<String>,
        sort_key: Option<ProductSortKey>,
        reverse: Option<bool>,
    ) -> Result<ProductConnection, ShopifyError> {
        let cache_key = CacheKey::Products {
            cursor: after.clone(),
            sort: sort_key,
            reverse,
        };

        if query.is_none()
            && let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let is_search = query.is_some();
        let variables = queries::get_products::Variables {
            first,
            after,
            query,
            sort_key,
            reverse,
        };

        let data: queries::get_products::ResponseData = self
            .execute(
                queries::get_products::OPERATION_NAME,
                queries::get_products::QUERY,
                variables,
            )
            .await?;

        let connection = convert_product_connection(data.products);

        if !is_search {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(connection.clone()))
                .await;
        }

        Ok(connection)
    }

    /// Get recommendations for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product_recommendations(
        &self,
        product_id: &str,
        intent: Option<ProductRecommendationIntent>,
    ) -> Result<Vec<Product>, ShopifyError> {
        let cache_key = CacheKey::Recommendations {
            product_id: product_id.to_string(),
            intent,
        };

        if let Some(CacheValue::Recommendations(products)) =
            self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for recommendations");
            return Ok(products);
        }

        let variables = queries::get_product_recommendations::Variables {
            product_id: product_id.to_string(),
            intent,
        };

        let data: queries::get_product_recommendations::ResponseData = self
            .execute(
                queries::get_product_recommendations::OPERATION_NAME,
                queries::get_product_recommendations::QUERY,
                variables,
            )
            .await?;

        let products: Vec<Product> = data
            .product_recommendations
            .unwrap_or_default()
            .into_iter()
            .map(convert_product)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Recommendations(products.clone()))
            .await;

        Ok(products)
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get a collection by its handle, with a page of its products.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_by_handle(
        &self,
        handle: &str,
        first: i64,
        after: Option<String>,
    ) -> Result<Collection, ShopifyError> {
        let cache_key = CacheKey::Collection {
            handle: handle.to_string(),
            cursor: after.clone(),
        };

        if let Some(CacheValue::Collection(collection)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection");
            return Ok(*collection);
        }

        let variables = queries::get_collection::Variables {
            handle: handle.to_string(),
            first,
            after,
        };

        let data: queries::get_collection::ResponseData = self
            .execute(
                queries::get_collection::OPERATION_NAME,
                queries::get_collection::QUERY,
                variables,
            )
            .await?;

        let collection = data
            .collection
            .map(convert_collection)
            .ok_or_else(|| ShopifyError::NotFound(format!("Collection not found: {handle}")))?;

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Collection(Box::new(collection.clone())),
            )
            .await;

        Ok(collection)
    }

    /// Get a paginated list of collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_collections(
        &self,
        first: i64,
        after: Option<String>,
    ) -> Result<CollectionConnection, ShopifyError> {
        let cache_key = CacheKey::Collections {
            cursor: after.clone(),
        };

        if let Some(CacheValue::Collections(collections)) =
            self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let variables = queries::get_collections::Variables {
            first,
            after,
            sort_key: Some(CollectionSortKey::Title),
        };

        let data: queries::get_collections::ResponseData = self
            .execute(
                queries::get_collections::OPERATION_NAME,
                queries::get_collections::QUERY,
                variables,
            )
            .await?;

        let connection = convert_collection_connection(data.collections);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collections(connection.clone()))
            .await;

        Ok(connection)
    }

    // =========================================================================
    // Content Methods (menus, metaobjects, policies, localization)
    // =========================================================================

    /// Get a navigation menu by its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_menu(&self, handle: &str) -> Result<Menu, ShopifyError> {
        let cache_key = CacheKey::Menu(handle.to_string());

        if let Some(CacheValue::Menu(menu)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for menu");
            return Ok(*menu);
        }

        let variables = queries::get_menu::Variables {
            handle: handle.to_string(),
        };

        let data: queries::get_menu::ResponseData = self
            .execute(
                queries::get_menu::OPERATION_NAME,
                queries::get_menu::QUERY,
                variables,
            )
            .await?;

        let menu = data
            .menu
            .map(convert_menu)
            .ok_or_else(|| ShopifyError::NotFound(format!("Menu not found: {handle}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Menu(Box::new(menu.clone())))
            .await;

        Ok(menu)
    }

    /// Get a page of metaobjects of one type.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(kind = %kind))]
    pub async fn get_metaobjects(
        &self,
        kind: &str,
        first: i64,
        after: Option<String>,
    ) -> Result<MetaobjectConnection, ShopifyError> {
        let cache_key = CacheKey::Metaobjects {
            kind: kind.to_string(),
            cursor: after.clone(),
        };

        if let Some(CacheValue::Metaobjects(metaobjects)) =
            self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for metaobjects");
            return Ok(metaobjects);
        }

        let variables = queries::get_metaobjects::Variables {
            kind: kind.to_string(),
            first,
            after,
        };

        let data: queries::get_metaobjects::ResponseData = self
            .execute(
                queries::get_metaobjects::OPERATION_NAME,
                queries::get_metaobjects::QUERY,
                variables,
            )
            .await?;

        let connection = convert_metaobject_connection(data.metaobjects);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Metaobjects(connection.clone()))
            .await;

        Ok(connection)
    }

    /// Get a single metaobject by type and handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the metaobject is not found or the API request fails.
    #[instrument(skip(self), fields(kind = %kind, handle = %handle))]
    pub async fn get_metaobject_by_handle(
        &self,
        kind: &str,
        handle: &str,
    ) -> Result<Metaobject, ShopifyError> {
        let cache_key = CacheKey::Metaobject {
            kind: kind.to_string(),
            handle: handle.to_string(),
        };

        if let Some(CacheValue::Metaobject(metaobject)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for metaobject");
            return Ok(*metaobject);
        }

        let variables = queries::get_metaobject::Variables {
            handle: handle.to_string(),
            kind: kind.to_string(),
        };

        let data: queries::get_metaobject::ResponseData = self
            .execute(
                queries::get_metaobject::OPERATION_NAME,
                queries::get_metaobject::QUERY,
                variables,
            )
            .await?;

        let metaobject = data.metaobject.map(convert_metaobject).ok_or_else(|| {
            ShopifyError::NotFound(format!("Metaobject not found: {kind}/{handle}"))
        })?;

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Metaobject(Box::new(metaobject.clone())),
            )
            .await;

        Ok(metaobject)
    }

    /// Get the shop's policy documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_shop_policies(&self) -> Result<Vec<ShopPolicy>, ShopifyError> {
        let cache_key = CacheKey::Policies;

        if let Some(CacheValue::Policies(policies)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for policies");
            return Ok(policies);
        }

        let data: queries::get_shop_policies::ResponseData = self
            .execute(
                queries::get_shop_policies::OPERATION_NAME,
                queries::get_shop_policies::QUERY,
                queries::get_shop_policies::Variables,
            )
            .await?;

        let policies = convert_policies(data.shop);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Policies(policies.clone()))
            .await;

        Ok(policies)
    }

    /// Get the countries the shop can sell to.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_available_countries(&self) -> Result<Vec<Country>, ShopifyError> {
        let cache_key = CacheKey::Countries;

        if let Some(CacheValue::Countries(countries)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for countries");
            return Ok(countries);
        }

        let data: queries::get_available_countries::ResponseData = self
            .execute(
                queries::get_available_countries::OPERATION_NAME,
                queries::get_available_countries::QUERY,
                queries::get_available_countries::Variables,
            )
            .await?;

        let countries: Vec<Country> = data
            .localization
            .available_countries
            .into_iter()
            .map(convert_country)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Countries(countries.clone()))
            .await;

        Ok(countries)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Get an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is not found or the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &str) -> Result<Cart, ShopifyError> {
        let variables = queries::get_cart::Variables {
            cart_id: cart_id.to_string(),
        };

        let data: queries::get_cart::ResponseData = self
            .execute(
                queries::get_cart::OPERATION_NAME,
                queries::get_cart::QUERY,
                variables,
            )
            .await?;

        data.cart
            .map(convert_cart)
            .ok_or_else(|| ShopifyError::NotFound(format!("Cart not found: {cart_id}")))
    }

    /// Create a new cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart creation fails or user errors are returned.
    #[instrument(skip(self, lines, buyer_identity))]
    pub async fn create_cart(
        &self,
        lines: Vec<CartLineInput>,
        buyer_identity: Option<CartBuyerIdentityInput>,
    ) -> Result<Cart, ShopifyError> {
        let variables = queries::create_cart::Variables {
            input: queries::create_cart::CartCreateInput {
                lines,
                buyer_identity,
            },
        };

        let data: CartMutationData = self
            .execute(
                queries::create_cart::OPERATION_NAME,
                queries::create_cart::QUERY,
                variables,
            )
            .await?;

        cart_from_mutation(data, "create cart")
    }

    /// Add lines to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn add_to_cart(
        &self,
        cart_id: &str,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, ShopifyError> {
        let variables = queries::cart_lines_add::Variables {
            cart_id: cart_id.to_string(),
            lines,
        };

        let data: CartMutationData = self
            .execute(
                queries::cart_lines_add::OPERATION_NAME,
                queries::cart_lines_add::QUERY,
                variables,
            )
            .await?;

        cart_from_mutation(data, "add to cart")
    }

    /// Update cart lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn update_cart_lines(
        &self,
        cart_id: &str,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<Cart, ShopifyError> {
        let variables = queries::cart_lines_update::Variables {
            cart_id: cart_id.to_string(),
            lines,
        };

        let data: CartMutationData = self
            .execute(
                queries::cart_lines_update::OPERATION_NAME,
                queries::cart_lines_update::QUERY,
                variables,
            )
            .await?;

        cart_from_mutation(data, "update cart")
    }

    /// Remove lines from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    pub async fn remove_from_cart(
        &self,
        cart_id: &str,
        line_ids: Vec<String>,
    ) -> Result<Cart, ShopifyError> {
        let variables = queries::cart_lines_remove::Variables {
            cart_id: cart_id.to_string(),
            line_ids,
        };

        let data: CartMutationData = self
            .execute(
                queries::cart_lines_remove::OPERATION_NAME,
                queries::cart_lines_remove::QUERY,
                variables,
            )
            .await?;

        cart_from_mutation(data, "remove from cart")
    }

    /// Update discount codes on a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, discount_codes), fields(cart_id = %cart_id))]
    pub async fn update_discount_codes(
        &self,
        cart_id: &str,
        discount_codes: Vec<String>,
    ) -> Result<Cart, ShopifyError> {
        let variables = queries::cart_discount_codes_update::Variables {
            cart_id: cart_id.to_string(),
            discount_codes,
        };

        let data: CartMutationData = self
            .execute(
                queries::cart_discount_codes_update::OPERATION_NAME,
                queries::cart_discount_codes_update::QUERY,
                variables,
            )
            .await?;

        cart_from_mutation(data, "update discount codes")
    }

    /// Update the cart's buyer identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, buyer_identity), fields(cart_id = %cart_id))]
    pub async fn update_buyer_identity(
        &self,
        cart_id: &str,
        buyer_identity: CartBuyerIdentityInput,
    ) -> Result<Cart, ShopifyError> {
        let variables = queries::cart_buyer_identity_update::Variables {
            cart_id: cart_id.to_string(),
            buyer_identity,
        };

        let data: CartMutationData = self
            .execute(
                queries::cart_buyer_identity_update::OPERATION_NAME,
                queries::cart_buyer_identity_update::QUERY,
                variables,
            )
            .await?;

        cart_from_mutation(data, "update buyer identity")
    }
}

/// Unpack the shared mutation payload: user errors become a typed error,
/// otherwise the authoritative cart is converted.
fn cart_from_mutation(data: CartMutationData, action: &str) -> Result<Cart, ShopifyError> {
    let Some(result) = data.result else {
        return Err(missing_mutation_result(action));
    };

    if !result.user_errors.is_empty() {
        return Err(ShopifyError::UserError(
            result
                .user_errors
                .into_iter()
                .map(convert_user_error)
                .collect(),
        ));
    }

    result
        .cart
        .map(convert_cart)
        .ok_or_else(|| missing_mutation_result(action))
}

fn missing_mutation_result(action: &str) -> ShopifyError {
    ShopifyError::GraphQL(vec![super::GraphQLError {
        message: format!("Failed to {action}"),
        locations: vec![],
        path: vec![],
    }])
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_config(api_url: &str) -> ShopifyStorefrontConfig {
        ShopifyStorefrontConfig {
            store: "test-store.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_private_token: SecretString::from("shpat_test_token".to_string()),
            api_url: Some(api_url.to_string()),
        }
    }

    fn product_json(handle: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "gid://shopify/Product/1",
            "handle": handle,
            "title": "Sea Salt Licorice",
            "availableForSale": true,
            "vendor": "Driftline",
            "priceRange": {
                "minVariantPrice": { "amount": "89.00", "currencyCode": "SEK" },
                "maxVariantPrice": { "amount": "89.00", "currencyCode": "SEK" }
            }
        })
    }

    #[tokio::test]
    async fn fetches_product_and_serves_second_read_from_cache() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("Shopify-Storefront-Private-Token", "shpat_test_token"))
            .and(body_partial_json(
                serde_json::json!({ "operationName": "GetProduct" }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "product": product_json("sea-salt-licorice") }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = StorefrontClient::new(&test_config(&server.uri()));

        let first = client.get_product_by_handle("sea-salt-licorice").await.unwrap();
        let second = client.get_product_by_handle("sea-salt-licorice").await.unwrap();

        assert_eq!(first.title, "Sea Salt Licorice");
        assert_eq!(second.handle, first.handle);
    }

    #[tokio::test]
    async fn missing_product_maps_to_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "product": null }
            })))
            .mount(&server)
            .await;

        let client = StorefrontClient::new(&test_config(&server.uri()));
        let err = client.get_product_by_handle("missing").await.unwrap_err();

        assert!(matches!(err, ShopifyError::NotFound(_)));
    }

    #[tokio::test]
    async fn rate_limit_response_maps_to_typed_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
            .mount(&server)
            .await;

        let client = StorefrontClient::new(&test_config(&server.uri()));
        let err = client.get_product_by_handle("anything").await.unwrap_err();

        assert!(matches!(err, ShopifyError::RateLimited(7)));
    }

    #[tokio::test]
    async fn mutation_user_errors_surface_as_typed_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(
                serde_json::json!({ "operationName": "CartLinesAdd" }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "result": {
                    "cart": null,
                    "userErrors": [{
                        "code": "INVALID",
                        "field": ["lines", "0", "quantity"],
                        "message": "Quantity must be positive"
                    }]
                } }
            })))
            .mount(&server)
            .await;

        let client = StorefrontClient::new(&test_config(&server.uri()));
        let err = client
            .add_to_cart(
                "gid://shopify/Cart/1",
                vec![CartLineInput {
                    merchandise_id: "gid://shopify/ProductVariant/1".to_string(),
                    quantity: -1,
                    attributes: None,
                    selling_plan_id: None,
                }],
            )
            .await
            .unwrap_err();

        match err {
            ShopifyError::UserError(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Quantity must be positive");
            }
            other => panic!("expected user error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn graphql_errors_map_to_typed_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": null,
                "errors": [{ "message": "Field 'prdoucts' doesn't exist on type 'QueryRoot'" }]
            })))
            .mount(&server)
            .await;

        let client = StorefrontClient::new(&test_config(&server.uri()));
        let err = client.get_products(12, None, None, None, None).await.unwrap_err();

        match err {
            ShopifyError::GraphQL(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }
}
