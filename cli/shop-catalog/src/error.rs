//! Error handling for catalog API operations.

use thiserror::Error;

/// Number of characters of a non-JSON body echoed back in
/// [`CatalogClientError::NonJsonResponse`].
pub const NON_JSON_PREFIX_CHARS: usize = 100;

/// Common error type for catalog API operations.
///
/// A well-formed envelope with `success: false` is not an error at this
/// level; it is returned to the caller as an [`crate::ApiResponse`].
/// [`CatalogClientError::Rejected`] only appears when a caller asks for
/// that conversion via [`crate::ApiResponse::into_result`].
#[derive(Debug, Error)]
pub enum CatalogClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with something other than JSON.
    #[error("Server returned non-JSON response: {body_prefix}")]
    NonJsonResponse { body_prefix: String },

    #[error("invalid response body: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    #[error("invalid catalog url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Other(String),
}

impl CatalogClientError {
    /// Build a [`CatalogClientError::NonJsonResponse`] from a raw body,
    /// keeping only its first [`NON_JSON_PREFIX_CHARS`] characters.
    pub fn non_json(body: &str) -> Self {
        CatalogClientError::NonJsonResponse {
            body_prefix: body.chars().take(NON_JSON_PREFIX_CHARS).collect(),
        }
    }
}
