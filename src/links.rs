//! Deep links into the app.
//!
//! A product screen is reachable as `shoppingapp://app/product/<id>` or via
//! the web fallback `https://shoppingapp.com/product/<id>`. The list and cart
//! answer to `/products` and `/cart` under either prefix.

use tracing::warn;
use url::Url;

use crate::config::LinkConfig;
use crate::error::LinkError;

/// Host segment of custom-scheme links.
const APP_HOST: &str = "app";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ProductList,
    ProductDetails { product_id: u64 },
    Cart,
}

#[derive(Debug, Clone)]
pub struct LinkRouter {
    scheme: String,
    web_host: String,
}

impl LinkRouter {
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            scheme: config.scheme.to_ascii_lowercase(),
            web_host: config.web_host.to_ascii_lowercase(),
        }
    }

    pub fn product_deep_link(&self, product_id: u64) -> Result<Url, LinkError> {
        parse(&format!("{}://{}/product/{}", self.scheme, APP_HOST, product_id))
    }

    pub fn product_web_link(&self, product_id: u64) -> Result<Url, LinkError> {
        parse(&format!("https://{}/product/{}", self.web_host, product_id))
    }

    /// The link to open for a product: the deep link when the platform can
    /// handle the custom scheme, the web link otherwise.
    pub fn open_target(&self, product_id: u64, custom_scheme_supported: bool) -> Result<Url, LinkError> {
        if custom_scheme_supported {
            self.product_deep_link(product_id)
        } else {
            self.product_web_link(product_id)
        }
    }

    pub fn parse_route(&self, uri: &str) -> Result<Route, LinkError> {
        let url = parse(uri.trim())?;
        let host = url.host_str().unwrap_or_default();

        if url.scheme() == self.scheme {
            if host != APP_HOST {
                return Err(LinkError::UnknownHost(host.to_string()));
            }
        } else if url.scheme() == "https" {
            if !host.eq_ignore_ascii_case(&self.web_host) {
                return Err(LinkError::UnknownHost(host.to_string()));
            }
        } else {
            return Err(LinkError::UnsupportedScheme(url.scheme().to_string()));
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            ["products"] => Ok(Route::ProductList),
            ["cart"] => Ok(Route::Cart),
            ["product", id] => id
                .parse::<u64>()
                .map(|product_id| Route::ProductDetails { product_id })
                .map_err(|_| LinkError::InvalidProductId((*id).to_string())),
            _ => Err(LinkError::UnknownRoute(url.path().to_string())),
        }
    }

    pub fn parse_product_id(&self, uri: &str) -> Result<u64, LinkError> {
        match self.parse_route(uri)? {
            Route::ProductDetails { product_id } => Ok(product_id),
            _ => Err(LinkError::UnknownRoute(uri.to_string())),
        }
    }

    /// Like [`parse_route`](Self::parse_route), but a bad link is logged and
    /// dropped so the current screen stays put.
    pub fn route_for(&self, uri: &str) -> Option<Route> {
        match self.parse_route(uri) {
            Ok(route) => Some(route),
            Err(e) => {
                warn!(uri, error = %e, "Ignoring unusable link");
                None
            }
        }
    }
}

impl Default for LinkRouter {
    fn default() -> Self {
        Self::new(&LinkConfig::default())
    }
}

fn parse(raw: &str) -> Result<Url, LinkError> {
    Url::parse(raw).map_err(|e| LinkError::Malformed(format!("{raw}: {e}")))
}
