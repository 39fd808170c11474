//! Configuration types for catalog client construction.

use std::collections::BTreeMap;

/// Base URL of the products resource when nothing else is configured.
pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8080/products";

/// Configuration for catalog client construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogClientConfig {
    /// Base URL of the products resource.
    ///
    /// All operations are addressed relative to this URL,
    /// e.g. `{catalog_url}/create`.
    pub catalog_url: String,
    /// Additional headers to include in requests.
    pub extra_headers: BTreeMap<String, String>,
    /// Custom `User-Agent` header.
    pub user_agent: Option<String>,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            extra_headers: BTreeMap::new(),
            user_agent: None,
        }
    }
}
