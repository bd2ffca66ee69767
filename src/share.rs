//! Sharing a product through the platform share sheet.

use std::future::Future;

use tracing::{error, info, instrument};
use url::Url;

use crate::domain::Product;
use crate::error::ShareError;
use crate::links::LinkRouter;

#[derive(Debug, Clone, PartialEq)]
pub struct ShareRequest {
    pub title: String,
    pub url: Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// The user closed the sheet without sharing.
    Dismissed,
}

/// The platform's native share surface.
pub trait ShareSheet: Send + Sync {
    fn open(
        &self,
        request: &ShareRequest,
    ) -> impl Future<Output = Result<ShareOutcome, ShareError>> + Send;
}

/// Share sheet for hosts without one: records the request in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogShareSheet;

impl ShareSheet for LogShareSheet {
    async fn open(&self, request: &ShareRequest) -> Result<ShareOutcome, ShareError> {
        info!(title = %request.title, url = %request.url, "Share requested");
        Ok(ShareOutcome::Shared)
    }
}

pub fn share_request(router: &LinkRouter, product: &Product) -> Result<ShareRequest, ShareError> {
    let url = router
        .product_deep_link(product.id)
        .map_err(|e| ShareError::Failed(e.to_string()))?;
    Ok(ShareRequest {
        title: format!("Check out {}!", product.title),
        url,
    })
}

/// Opens the share sheet for `product`. Failures are logged and reported as
/// `None`; they never reach the caller's screen.
#[instrument(fields(product_id = product.id), skip_all)]
pub async fn share_product<S: ShareSheet>(
    sheet: &S,
    router: &LinkRouter,
    product: &Product,
) -> Option<ShareOutcome> {
    let result = match share_request(router, product) {
        Ok(request) => sheet.open(&request).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(outcome) => {
            info!(?outcome, "Share finished");
            Some(outcome)
        }
        Err(e) => {
            error!(error = %e, "Error sharing product");
            None
        }
    }
}
