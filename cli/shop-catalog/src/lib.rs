//! HTTP client for the product catalog API.
//!
//! This crate provides:
//! - the wire types of the catalog API ([`Product`], [`NewProduct`], the
//!   [`ApiResponse`] envelope)
//! - [`CatalogClient`], a reqwest backed implementation of [`ClientTrait`]
//! - common error handling for catalog API operations
//! - [`to_fixed`], the price formatting of the front ends
//! - a [`MockClient`] with canned responses for tests (feature-gated)
//!
//! ## Usage
//!
//! ```ignore
//! use shop_catalog::{CatalogClient, CatalogClientConfig, ClientTrait};
//!
//! let client = CatalogClient::new(CatalogClientConfig::default())?;
//! let response = client.get_all_products().await?;
//! ```

mod client;
mod config;
mod error;
mod format;
mod types;

#[cfg(any(test, feature = "tests"))]
mod mock;

pub use client::{CatalogClient, ClientTrait};
pub use config::{CatalogClientConfig, DEFAULT_CATALOG_URL};
pub use error::{CatalogClientError, NON_JSON_PREFIX_CHARS};
pub use format::to_fixed;
#[cfg(any(test, feature = "tests"))]
pub use mock::{MockClient, MockResponse, RecordedRequest};
pub use types::{ApiResponse, NewProduct, Product, ProductId, product_code_from_name};
