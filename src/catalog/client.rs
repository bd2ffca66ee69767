use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};
use url::Url;

use super::{skip_for, CatalogApi};
use crate::config::CatalogConfig;
use crate::domain::Product;
use crate::error::CatalogError;

/// HTTP client for the REST catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

/// Error payloads may carry a `message` meant for the user.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        // `Url::join` drops the last path segment unless it ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().timeout(config.timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http = builder.build().map_err(network_error)?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        self.base_url
            .join(path)
            .map_err(|e| CatalogError::InvalidUrl(e.to_string()))
    }

    async fn fetch(&self, url: Url) -> Result<(StatusCode, Vec<u8>), CatalogError> {
        debug!(%url, "Starting catalog request");
        let response = self.http.get(url).send().await.map_err(|e| {
            error!(error = %e, "Catalog request failed");
            network_error(e)
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(network_error)?.to_vec();
        debug!(status = status.as_u16(), bytes = body.len(), "Catalog response received");
        Ok((status, body))
    }
}

impl CatalogApi for CatalogClient {
    #[instrument(skip(self))]
    async fn list_products(&self, page: u32, limit: u32) -> Result<Vec<Product>, CatalogError> {
        let mut url = self.endpoint("products")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("skip", &skip_for(page, limit).to_string());

        let (status, body) = self.fetch(url).await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Product list request rejected");
            return Err(status_error(status, &body));
        }

        let products: Vec<Product> = serde_json::from_slice(&body).map_err(decode_error)?;
        debug!(count = products.len(), "Decoded product page");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: u64) -> Result<Product, CatalogError> {
        let url = self.endpoint(&format!("products/{id}"))?;

        let (status, body) = self.fetch(url).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "Product request rejected");
            return Err(status_error(status, &body));
        }

        // The catalog answers unknown ids with an empty 200.
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(CatalogError::NotFound(id));
        }
        serde_json::from_slice::<Option<Product>>(&body)
            .map_err(decode_error)?
            .ok_or(CatalogError::NotFound(id))
    }
}

fn network_error(e: reqwest::Error) -> CatalogError {
    CatalogError::Network(e.to_string())
}

fn decode_error(e: serde_json::Error) -> CatalogError {
    error!(error = %e, "Catalog payload did not match the product shape");
    CatalogError::Decode(e.to_string())
}

fn status_error(status: StatusCode, body: &[u8]) -> CatalogError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message);
    CatalogError::Status {
        status: status.as_u16(),
        message,
    }
}
