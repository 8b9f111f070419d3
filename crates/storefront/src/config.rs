//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_PRIVATE_TOKEN` - Storefront API private access token
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `SHOPIFY_API_URL` - Full GraphQL endpoint override (tests point this at
//!   a mock server; normally derived from store and version)
//! - `GTM_CONTAINER_ID` - Google Tag Manager container ID
//! - `GA4_MEASUREMENT_ID` - Google Analytics 4 measurement ID
//! - `REVIEWS_API_URL` - Review widget API base URL
//! - `REVIEWS_SHOP_DOMAIN` - Shop domain registered with the review provider
//! - `REVIEWS_API_TOKEN` - Review widget API token
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! The three `REVIEWS_*` variables are all-or-nothing; with none set the
//! reviews section renders empty.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Analytics tracking configuration
    pub analytics: AnalyticsConfig,
    /// Review widget API configuration; `None` disables the reviews fragment
    pub reviews: Option<ReviewsConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact the private token.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Storefront API private access token (server-side only)
    pub storefront_private_token: SecretString,
    /// Full GraphQL endpoint override; derived from store and version when
    /// unset
    pub api_url: Option<String>,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("storefront_private_token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Analytics and tag manager configuration.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsConfig {
    /// Google Tag Manager container ID
    pub gtm_container_id: Option<String>,
    /// Google Analytics 4 measurement ID
    pub ga4_measurement_id: Option<String>,
}

/// Review widget API configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct ReviewsConfig {
    /// Review provider API base URL
    pub api_url: String,
    /// Shop domain registered with the review provider
    pub shop_domain: String,
    /// Review provider API token
    pub api_token: SecretString,
}

impl std::fmt::Debug for ReviewsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewsConfig")
            .field("api_url", &self.api_url)
            .field("shop_domain", &self.shop_domain)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;

        let shopify = ShopifyStorefrontConfig::from_env()?;
        let analytics = AnalyticsConfig::from_env();
        let reviews = reviews_from_parts(
            get_optional_env("REVIEWS_API_URL"),
            get_optional_env("REVIEWS_SHOP_DOMAIN"),
            get_optional_env("REVIEWS_API_TOKEN"),
        )?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            shopify,
            analytics,
            reviews,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ShopifyStorefrontConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store: get_required_env("SHOPIFY_STORE")?,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", "2026-01"),
            storefront_private_token: get_validated_secret("SHOPIFY_STOREFRONT_PRIVATE_TOKEN")?,
            api_url: get_optional_env("SHOPIFY_API_URL"),
        })
    }
}

impl AnalyticsConfig {
    fn from_env() -> Self {
        Self {
            gtm_container_id: get_optional_env("GTM_CONTAINER_ID"),
            ga4_measurement_id: get_optional_env("GA4_MEASUREMENT_ID"),
        }
    }
}

/// Assemble the reviews config from its three variables.
///
/// A partial set is a configuration mistake, not a disabled feature.
fn reviews_from_parts(
    api_url: Option<String>,
    shop_domain: Option<String>,
    api_token: Option<String>,
) -> Result<Option<ReviewsConfig>, ConfigError> {
    match (api_url, shop_domain, api_token) {
        (None, None, None) => Ok(None),
        (Some(api_url), Some(shop_domain), Some(api_token)) => Ok(Some(ReviewsConfig {
            api_url,
            shop_domain,
            api_token: SecretString::from(api_token),
        })),
        _ => Err(ConfigError::InvalidEnvVar(
            "REVIEWS_API_URL".to_string(),
            "REVIEWS_API_URL, REVIEWS_SHOP_DOMAIN and REVIEWS_API_TOKEN must be set together"
                .to_string(),
        )),
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
