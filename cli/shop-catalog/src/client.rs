//! Catalog client for the products REST API.

use std::fmt::Debug;
use std::str::FromStr;

use reqwest::header::{self, HeaderMap, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::CatalogClientError;
use crate::types::{ApiResponse, NewProduct, Product, ProductId};

/// A client for the products API.
///
/// This is a thin wrapper around a [`reqwest::Client`] that handles:
/// - addressing every operation relative to the configured base URL
/// - default headers and user agent
/// - decoding the [`ApiResponse`] envelope
///
/// No timeouts or retries are applied.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
    config: CatalogClientConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("catalog_url", &self.config.catalog_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogClientError> {
        let base_url = parse_base_url(&config.catalog_url)?;
        let client = build_http_client(&config)?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Get the configured catalog URL.
    pub fn catalog_url(&self) -> &str {
        &self.config.catalog_url
    }

    /// Update the client configuration and recreate the client.
    pub fn update_config(
        &mut self,
        update: impl FnOnce(&mut CatalogClientConfig),
    ) -> Result<(), CatalogClientError> {
        let mut modified_config = self.config.clone();
        update(&mut modified_config);
        *self = Self::new(modified_config)?;
        Ok(())
    }

    /// Resolve `segments` below the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogClientError::InvalidUrl {
                url: self.config.catalog_url.clone(),
                reason: "url cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

// ---------------------------------------------------------------------------
// Catalog trait
// ---------------------------------------------------------------------------

/// The complete products API interface.
///
/// Every operation performs exactly one request and returns the decoded
/// envelope. An envelope with `success: false` is a valid answer, not an
/// error; errors are reserved for transport and decoding failures.
///
/// This trait enables alternate implementations:
/// - **HTTP**: REST calls via [`CatalogClient`]
/// - **Mock** (tests): canned responses without HTTP via `MockClient`
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// Create a product.
    ///
    /// Fails with [`CatalogClientError::NonJsonResponse`] if the server does
    /// not answer with JSON.
    async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<ApiResponse<Product>, CatalogClientError>;

    /// Get a single product.
    ///
    /// `id` is passed through as typed by the user, it is not required to
    /// be numeric.
    async fn get_product(&self, id: &str) -> Result<ApiResponse<Product>, CatalogClientError>;

    /// List all products.
    async fn get_all_products(&self) -> Result<ApiResponse<Vec<Product>>, CatalogClientError>;

    /// Delete a product.
    async fn delete_product(&self, id: ProductId) -> Result<ApiResponse<()>, CatalogClientError>;

    /// List products whose name matches `name`.
    async fn search_products(
        &self,
        name: &str,
    ) -> Result<ApiResponse<Vec<Product>>, CatalogClientError>;

    /// List active products.
    async fn active_products(&self) -> Result<ApiResponse<Vec<Product>>, CatalogClientError>;

    /// Replace the fields of an existing product.
    async fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<ApiResponse<Product>, CatalogClientError>;

    /// Mark a product inactive.
    async fn deactivate_product(
        &self,
        id: ProductId,
    ) -> Result<ApiResponse<Product>, CatalogClientError>;
}

// ---------------------------------------------------------------------------
// ClientTrait implementation for CatalogClient
// ---------------------------------------------------------------------------

impl ClientTrait for CatalogClient {
    #[instrument(skip_all, fields(product_code = %product.product_code))]
    async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<ApiResponse<Product>, CatalogClientError> {
        let url = self.endpoint(&["create"])?;
        debug!(%url, "sending create request");

        let response = self.client.post(url).json(product).send().await?;

        if !is_json(response.headers()) {
            let status = response.status();
            let text = response.text().await?;
            error!(%status, body = %text, "non-JSON response to create request");
            return Err(CatalogClientError::non_json(&text));
        }

        let envelope = decode_envelope(response).await?;
        debug!(success = envelope.success, "create response");
        Ok(envelope)
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: &str) -> Result<ApiResponse<Product>, CatalogClientError> {
        let url = self.endpoint(&[id])?;
        debug!(%url, "fetching product");
        let response = self.client.get(url).send().await?;
        decode_envelope(response).await
    }

    #[instrument(skip_all)]
    async fn get_all_products(&self) -> Result<ApiResponse<Vec<Product>>, CatalogClientError> {
        let url = self.endpoint(&[])?;
        debug!(%url, "fetching all products");
        let response = self.client.get(url).send().await?;
        let envelope: ApiResponse<Vec<Product>> = decode_envelope(response).await?;
        debug!(
            n_products = envelope.data.as_ref().map(Vec::len),
            "received product list"
        );
        Ok(envelope)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: ProductId) -> Result<ApiResponse<()>, CatalogClientError> {
        let url = self.endpoint(&[&id.to_string()])?;
        debug!(%url, "deleting product");
        let response = self.client.delete(url).send().await?;
        decode_envelope(response).await
    }

    #[instrument(skip(self))]
    async fn search_products(
        &self,
        name: &str,
    ) -> Result<ApiResponse<Vec<Product>>, CatalogClientError> {
        let url = self.endpoint(&["search"])?;
        debug!(%url, "searching products");
        let response = self
            .client
            .get(url)
            .query(&[("productName", name)])
            .send()
            .await?;
        decode_envelope(response).await
    }

    #[instrument(skip_all)]
    async fn active_products(&self) -> Result<ApiResponse<Vec<Product>>, CatalogClientError> {
        let url = self.endpoint(&["active", "list"])?;
        debug!(%url, "fetching active products");
        let response = self.client.get(url).send().await?;
        decode_envelope(response).await
    }

    #[instrument(skip(self, product), fields(product_code = %product.product_code))]
    async fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<ApiResponse<Product>, CatalogClientError> {
        let url = self.endpoint(&["update", &id.to_string()])?;
        debug!(%url, "updating product");
        let response = self.client.put(url).json(product).send().await?;
        decode_envelope(response).await
    }

    #[instrument(skip(self))]
    async fn deactivate_product(
        &self,
        id: ProductId,
    ) -> Result<ApiResponse<Product>, CatalogClientError> {
        let url = self.endpoint(&["deactivate", &id.to_string()])?;
        debug!(%url, "deactivating product");
        let response = self.client.put(url).send().await?;
        decode_envelope(response).await
    }
}

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn parse_base_url(catalog_url: &str) -> Result<Url, CatalogClientError> {
    let url = Url::parse(catalog_url).map_err(|e| CatalogClientError::InvalidUrl {
        url: catalog_url.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(CatalogClientError::InvalidUrl {
            url: catalog_url.to_string(),
            reason: "url cannot be a base".to_string(),
        });
    }
    Ok(url)
}

/// Whether the response declares a JSON body.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.contains("application/json"))
}

/// Decode the envelope regardless of the response status.
///
/// Failed operations are reported by the server through the envelope,
/// often together with a 4xx status.
async fn decode_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ApiResponse<T>, CatalogClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    let envelope: ApiResponse<T> =
        serde_json::from_slice(&body).map_err(CatalogClientError::InvalidResponse)?;
    debug!(%status, success = envelope.success, "decoded catalog response");
    Ok(envelope)
}

// ---------------------------------------------------------------------------
// HTTP client builder
// ---------------------------------------------------------------------------

/// Build the HTTP client with default headers for the products API.
fn build_http_client(config: &CatalogClientConfig) -> Result<reqwest::Client, CatalogClientError> {
    let mut headers = HeaderMap::new();

    for (key, value) in &config.extra_headers {
        headers.insert(
            header::HeaderName::from_str(key).map_err(
                |e: reqwest::header::InvalidHeaderName| CatalogClientError::Other(e.to_string()),
            )?,
            header::HeaderValue::from_str(value).map_err(
                |e: reqwest::header::InvalidHeaderValue| CatalogClientError::Other(e.to_string()),
            )?,
        );
    }

    debug!(
        catalog_url = %config.catalog_url,
        extra_headers = config.extra_headers.len(),
        "building catalog HTTP client"
    );

    let client_builder = reqwest::Client::builder().default_headers(headers);

    let client_builder = if let Some(ref user_agent) = config.user_agent {
        client_builder.user_agent(user_agent)
    } else {
        client_builder
    };

    client_builder
        .build()
        .map_err(|e| CatalogClientError::Other(e.to_string()))
}
