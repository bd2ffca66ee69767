//! Product detail screen state.

use tracing::{error, info, instrument};

use crate::catalog::CatalogApi;
use crate::domain::Product;
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loaded(Product),
    NotFound,
    Failed(String),
}

impl DetailState {
    pub fn product(&self) -> Option<&Product> {
        match self {
            DetailState::Loaded(product) => Some(product),
            _ => None,
        }
    }
}

#[instrument(skip(catalog))]
pub async fn load_detail<C: CatalogApi>(catalog: &C, product_id: u64) -> DetailState {
    match catalog.get_product(product_id).await {
        Ok(product) => {
            info!(title = %product.title, "Product loaded");
            DetailState::Loaded(product)
        }
        Err(CatalogError::NotFound(_)) => {
            info!("Product not found");
            DetailState::NotFound
        }
        Err(e) => {
            error!(error = %e, "Error loading product");
            DetailState::Failed(e.user_message())
        }
    }
}
