//! Access to the remote product catalog.

mod client;

use std::future::Future;

pub use client::CatalogClient;

use crate::domain::Product;
use crate::error::CatalogError;

/// The catalog operations the app depends on.
///
/// [`CatalogClient`] talks HTTP; tests substitute canned or channel-driven
/// implementations.
pub trait CatalogApi: Send + Sync {
    /// One page of products in backend order. `page` starts at 1.
    fn list_products(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    fn get_product(&self, id: u64) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}

/// Offset of the first item of `page` under the skip/limit convention.
pub fn skip_for(page: u32, limit: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(limit)
}
