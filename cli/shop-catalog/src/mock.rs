//! A catalog client that can be seeded with mock responses.
//!
//! Only available in tests or with the `tests` feature.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::client::ClientTrait;
use crate::error::CatalogClientError;
use crate::types::{ApiResponse, NewProduct, Product, ProductId};

/// A canned answer for the next call to a [`MockClient`].
#[derive(Debug)]
pub enum MockResponse {
    Product(ApiResponse<Product>),
    Products(ApiResponse<Vec<Product>>),
    Empty(ApiResponse<()>),
    Error(CatalogClientError),
}

/// A call received by a [`MockClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    Create(NewProduct),
    Get(String),
    GetAll,
    Delete(ProductId),
    Search(String),
    Active,
    Update(ProductId, NewProduct),
    Deactivate(ProductId),
}

/// A catalog client that can be seeded with mock responses
///
/// Responses are handed out in the order they were pushed, regardless of
/// the operation called. Every call is recorded.
#[derive(Debug, Default, Clone)]
pub struct MockClient {
    // Shared so that tests can keep a handle after moving the client into a
    // page controller.
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new response into the list of mock responses
    pub fn push_response(&self, response: MockResponse) {
        self.responses
            .lock()
            .expect("couldn't acquire mock lock")
            .push_back(response);
    }

    pub fn push_product_response(&self, response: ApiResponse<Product>) {
        self.push_response(MockResponse::Product(response));
    }

    pub fn push_products_response(&self, response: ApiResponse<Vec<Product>>) {
        self.push_response(MockResponse::Products(response));
    }

    pub fn push_empty_response(&self, response: ApiResponse<()>) {
        self.push_response(MockResponse::Empty(response));
    }

    pub fn push_error(&self, error: CatalogClientError) {
        self.push_response(MockResponse::Error(error));
    }

    /// All calls received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("couldn't acquire mock lock")
            .clone()
    }

    /// Number of responses not yet handed out.
    pub fn pending_responses(&self) -> usize {
        self.responses
            .lock()
            .expect("couldn't acquire mock lock")
            .len()
    }

    fn next(&self, request: RecordedRequest) -> Option<MockResponse> {
        self.requests
            .lock()
            .expect("couldn't acquire mock lock")
            .push(request);
        self.responses
            .lock()
            .expect("couldn't acquire mock lock")
            .pop_front()
    }

    fn next_product(
        &self,
        request: RecordedRequest,
    ) -> Result<ApiResponse<Product>, CatalogClientError> {
        match self.next(request) {
            Some(MockResponse::Product(resp)) => Ok(resp),
            Some(MockResponse::Error(err)) => Err(err),
            other => panic!("expected product response, found {other:?}"),
        }
    }

    fn next_products(
        &self,
        request: RecordedRequest,
    ) -> Result<ApiResponse<Vec<Product>>, CatalogClientError> {
        match self.next(request) {
            Some(MockResponse::Products(resp)) => Ok(resp),
            Some(MockResponse::Error(err)) => Err(err),
            other => panic!("expected product list response, found {other:?}"),
        }
    }
}

impl ClientTrait for MockClient {
    async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<ApiResponse<Product>, CatalogClientError> {
        self.next_product(RecordedRequest::Create(product.clone()))
    }

    async fn get_product(&self, id: &str) -> Result<ApiResponse<Product>, CatalogClientError> {
        self.next_product(RecordedRequest::Get(id.to_string()))
    }

    async fn get_all_products(&self) -> Result<ApiResponse<Vec<Product>>, CatalogClientError> {
        self.next_products(RecordedRequest::GetAll)
    }

    async fn delete_product(&self, id: ProductId) -> Result<ApiResponse<()>, CatalogClientError> {
        match self.next(RecordedRequest::Delete(id)) {
            Some(MockResponse::Empty(resp)) => Ok(resp),
            Some(MockResponse::Error(err)) => Err(err),
            other => panic!("expected empty response, found {other:?}"),
        }
    }

    async fn search_products(
        &self,
        name: &str,
    ) -> Result<ApiResponse<Vec<Product>>, CatalogClientError> {
        self.next_products(RecordedRequest::Search(name.to_string()))
    }

    async fn active_products(&self) -> Result<ApiResponse<Vec<Product>>, CatalogClientError> {
        self.next_products(RecordedRequest::Active)
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<ApiResponse<Product>, CatalogClientError> {
        self.next_product(RecordedRequest::Update(id, product.clone()))
    }

    async fn deactivate_product(
        &self,
        id: ProductId,
    ) -> Result<ApiResponse<Product>, CatalogClientError> {
        self.next_product(RecordedRequest::Deactivate(id))
    }
}
