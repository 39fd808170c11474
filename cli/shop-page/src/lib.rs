//! The product catalog page.
//!
//! [`CatalogPage`] holds the page handlers (create, look up, list and delete
//! products). They talk to the catalog through [`shop_catalog::ClientTrait`]
//! and to the DOM through the [`Page`] trait:
//!
//! - in the browser, [`Page`] is implemented on top of `web-sys` and the
//!   handlers are bound to the page's events on startup (wasm32 only)
//! - elsewhere, [`Document`] is an in-memory stand-in for the DOM

mod document;
mod error;
mod handlers;
pub mod page;
pub mod render;

#[cfg(target_arch = "wasm32")]
mod web;

pub use document::{Child, Document, Element};
pub use error::PageError;
pub use handlers::{CatalogPage, DELETE_CONFIRMATION, MESSAGE_CLEAR_DELAY};
pub use page::Page;
#[cfg(target_arch = "wasm32")]
pub use web::WebPage;
