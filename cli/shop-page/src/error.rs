use shop_catalog::CatalogClientError;
use thiserror::Error;

/// Why a page handler failed.
///
/// By the time a handler returns one of these the failure has already been
/// rendered into the page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Please enter a Product ID")]
    MissingProductId,

    /// The server answered with `success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("response contained no product")]
    MissingProduct,

    #[error(transparent)]
    Client(#[from] CatalogClientError),
}
