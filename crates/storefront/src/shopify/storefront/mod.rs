//! Shopify Storefront API client implementation.
//!
//! Uses the `graphql_client` envelope types with `reqwest` 0.13 for HTTP.
//! Product listings are cached using `moka` under a long TTL, matching the
//! cache policy the product route requests.

mod conversions;
pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{QueryBody, Response};
use moka::future::Cache;
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::StorefrontError;
use crate::shopify::types::Product;

use conversions::convert_product_connection;
use queries::{build_products_query, get_products};

/// Long-lived cache policy for the fixed product listing query.
const CACHE_LONG_TTL: Duration = Duration::from_secs(3600);

/// Maximum number of cached listings.
const CACHE_MAX_CAPACITY: u64 = 1000;

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides access to the product listing query. Results are cached for one
/// hour, keyed on the full variable tuple.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    cache: Cache<String, Vec<Product>>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let endpoint = format!(
            "https://{}/api/{}/graphql.json",
            config.store_domain, config.api_version
        );

        Self::with_endpoint(endpoint, config.private_token.expose_secret().to_string())
    }

    /// Create a client against an explicit endpoint.
    ///
    /// Used by tests to point the client at a stub catalog server.
    #[must_use]
    pub fn with_endpoint(endpoint: String, access_token: String) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_MAX_CAPACITY)
            .time_to_live(CACHE_LONG_TTL)
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token,
                cache,
            }),
        }
    }

    /// POST a request body to the storefront endpoint and return the raw
    /// response text after status checks.
    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<String, StorefrontError> {
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
            .json(body)
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
            return Err(StorefrontError::RateLimited(retry_after));
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
            return Err(StorefrontError::GraphQL(vec![super::GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        Ok(response_text)
    }

    /// Execute a GraphQL query and unwrap the response envelope.
    async fn execute<V, D>(&self, request_body: &QueryBody<V>) -> Result<D, StorefrontError>
    where
        V: serde::Serialize,
        D: serde::de::DeserializeOwned,
    {
        let response_text = self.post(request_body).await?;

        // Parse the response
        let response: Response<D> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(StorefrontError::Parse(e));
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

            return Err(StorefrontError::GraphQL(
                errors.into_iter().map(Into::into).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify GraphQL response has no data and no errors"
            );
            StorefrontError::MissingData("data")
        })
    }

    /// Execute a raw GraphQL request body and return the raw JSON envelope.
    ///
    /// Used by the dev GraphiQL proxy, which relays errors verbatim rather
    /// than unwrapping them.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response is not
    /// valid JSON.
    pub async fn execute_raw(
        &self,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, StorefrontError> {
        let response_text = self.post(&body).await?;
        Ok(serde_json::from_str(&response_text)?)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Fetch a product listing, flattened to an ordered product list.
    ///
    /// Results are cached under the long TTL, keyed on the full variable
    /// tuple; the listing route requests a long cache policy for every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the top-level `products`
    /// envelope is absent from the response.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        variables: get_products::Variables,
    ) -> Result<Vec<Product>, StorefrontError> {
        let cache_key = format!(
            "products:{}:{}:{}:{}:{:?}:{}",
            variables.country.as_str(),
            variables.language.as_str(),
            variables.count,
            variables.sort_key,
            variables.reverse,
            variables.query,
        );

        // Check cache
        if let Some(products) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let data: get_products::ResponseData =
            self.execute(&build_products_query(variables)).await?;

        let connection = data
            .products
            .ok_or(StorefrontError::MissingData("products"))?;

        let products = convert_product_connection(connection);

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, products.clone())
            .await;

        Ok(products)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached listings.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
