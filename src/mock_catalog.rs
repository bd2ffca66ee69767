//! # Mock Catalog
//!
//! Catalog stand-ins for tests.
//!
//! [`create_mock_catalog`] returns a catalog whose requests land on a
//! receiver the test controls, so a test can hold a response back and poke
//! at the list while a fetch is in flight. Use [`expect_list`] and
//! [`expect_get`] to take the next request and answer it.
//!
//! [`StubCatalog`] answers from a script instead, for tests that only care
//! about outcomes.

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::{mpsc, oneshot};

use crate::catalog::CatalogApi;
use crate::domain::Product;
use crate::error::CatalogError;

pub type PageResponder = oneshot::Sender<Result<Vec<Product>, CatalogError>>;
pub type ProductResponder = oneshot::Sender<Result<Product, CatalogError>>;

#[derive(Debug)]
pub enum CatalogRequest {
    ListProducts {
        page: u32,
        limit: u32,
        respond_to: PageResponder,
    },
    GetProduct {
        id: u64,
        respond_to: ProductResponder,
    },
}

#[derive(Debug, Clone)]
pub struct MockCatalog {
    sender: mpsc::Sender<CatalogRequest>,
}

pub fn create_mock_catalog(buffer_size: usize) -> (MockCatalog, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockCatalog { sender }, receiver)
}

impl CatalogApi for MockCatalog {
    async fn list_products(&self, page: u32, limit: u32) -> Result<Vec<Product>, CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest::ListProducts {
                page,
                limit,
                respond_to,
            })
            .await
            .map_err(|_| CatalogError::Network("mock catalog closed".into()))?;
        response
            .await
            .map_err(|_| CatalogError::Network("mock response dropped".into()))?
    }

    async fn get_product(&self, id: u64) -> Result<Product, CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest::GetProduct { id, respond_to })
            .await
            .map_err(|_| CatalogError::Network("mock catalog closed".into()))?;
        response
            .await
            .map_err(|_| CatalogError::Network("mock response dropped".into()))?
    }
}

/// Takes the next request, which must be a page request.
pub async fn expect_list(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(u32, u32, PageResponder)> {
    match receiver.recv().await {
        Some(CatalogRequest::ListProducts {
            page,
            limit,
            respond_to,
        }) => Some((page, limit, respond_to)),
        _ => None,
    }
}

/// Takes the next request, which must be a single-product request.
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(u64, ProductResponder)> {
    match receiver.recv().await {
        Some(CatalogRequest::GetProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Answers page requests from a script, in order, and product requests from
/// a fixed list.
#[derive(Debug, Default)]
pub struct StubCatalog {
    pages: Mutex<VecDeque<Result<Vec<Product>, CatalogError>>>,
    products: Vec<Product>,
    requests: Mutex<Vec<(u32, u32)>>,
}

impl StubCatalog {
    pub fn new(pages: Vec<Result<Vec<Product>, CatalogError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// `(page, limit)` of every page request so far.
    pub fn requests(&self) -> Vec<(u32, u32)> {
        self.requests.lock().unwrap().clone()
    }

    fn next_page(&self, page: u32, limit: u32) -> Result<Vec<Product>, CatalogError> {
        self.requests.lock().unwrap().push((page, limit));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CatalogError::Network("no scripted page left".into())))
    }
}

impl CatalogApi for StubCatalog {
    async fn list_products(&self, page: u32, limit: u32) -> Result<Vec<Product>, CatalogError> {
        self.next_page(page, limit)
    }

    async fn get_product(&self, id: u64) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_catalog() {
        let (catalog, mut receiver) = create_mock_catalog(10);

        let fetch = tokio::spawn(async move { catalog.list_products(3, 5).await });

        let (page, limit, responder) = expect_list(&mut receiver).await.expect("Expected page request");
        assert_eq!((page, limit), (3, 5));
        responder.send(Ok(vec![Product::new(11, "Hat", 5.0)])).unwrap();

        let result = fetch.await.unwrap();
        assert_eq!(result.map(|p| p.len()), Ok(1));
    }

    #[tokio::test]
    async fn dropped_responder_is_network_error() {
        let (catalog, mut receiver) = create_mock_catalog(1);
        let fetch = tokio::spawn(async move { catalog.get_product(1).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected product request");
        assert_eq!(id, 1);
        drop(responder);

        assert!(matches!(fetch.await.unwrap(), Err(CatalogError::Network(_))));
    }
}
