use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::cart::CartService;
use crate::catalog::{CatalogApi, CatalogClient};
use crate::clients::{CartClient, ListClient};
use crate::config::AppConfig;
use crate::detail::{load_detail, DetailState};
use crate::domain::CartItem;
use crate::error::{CatalogError, ServiceError};
use crate::links::{LinkRouter, Route};
use crate::list::{ListController, ListService, ListSnapshot};

/// A screen resolved from a deep link, with the state it opens on.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    ProductList(ListSnapshot),
    ProductDetails { detail: DetailState, in_cart: bool },
    Cart { items: Vec<CartItem>, total: f64 },
}

/// Starts the list and cart services, hands out their clients, and shuts
/// them down in order.
pub struct Storefront<C> {
    pub list_client: ListClient,
    pub cart_client: CartClient,
    pub links: LinkRouter,
    catalog: Arc<C>,
    handles: Vec<JoinHandle<()>>,
}

impl Storefront<CatalogClient> {
    /// Storefront backed by the HTTP catalog named in `config`.
    pub fn connect(config: &AppConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        Ok(Self::new(Arc::new(catalog), config))
    }
}

impl<C: CatalogApi + 'static> Storefront<C> {
    #[instrument(name = "storefront", skip_all)]
    pub fn new(catalog: Arc<C>, config: &AppConfig) -> Self {
        info!(page_size = config.catalog.page_size, "Starting storefront");
        let capacity = config.list.channel_capacity;

        let (cart_service, cart_client) = CartService::new(capacity);
        let cart_handle = tokio::spawn(cart_service.run());

        let controller =
            ListController::new(config.catalog.page_size, config.list.search_debounce());
        let (list_service, list_client) =
            ListService::new(capacity, controller, Arc::clone(&catalog));
        let list_handle = tokio::spawn(list_service.run());

        info!("Storefront started");

        Self {
            list_client,
            cart_client,
            links: LinkRouter::new(&config.links),
            catalog,
            handles: vec![list_handle, cart_handle],
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub async fn product_detail(&self, product_id: u64) -> DetailState {
        load_detail(self.catalog.as_ref(), product_id).await
    }

    /// Resolves a deep link to the screen it names. Links that do not parse
    /// are logged and yield `None`.
    #[instrument(skip(self))]
    pub async fn open_link(&self, uri: &str) -> Result<Option<Screen>, ServiceError> {
        let Some(route) = self.links.route_for(uri) else {
            return Ok(None);
        };

        let screen = match route {
            Route::ProductList => Screen::ProductList(self.list_client.snapshot().await?),
            Route::ProductDetails { product_id } => {
                let detail = self.product_detail(product_id).await;
                let in_cart = self.cart_client.contains(product_id).await?;
                Screen::ProductDetails { detail, in_cart }
            }
            Route::Cart => Screen::Cart {
                items: self.cart_client.items().await?,
                total: self.cart_client.total_price().await?,
            },
        };
        Ok(Some(screen))
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), ServiceError> {
        info!("Shutting down storefront");

        // A closed channel means the task already stopped; its join below reports why.
        if let Err(e) = self.list_client.shutdown().await {
            warn!(error = %e, "List service already stopped");
        }
        if let Err(e) = self.cart_client.shutdown().await {
            warn!(error = %e, "Cart service already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service task failed");
                return Err(ServiceError::TaskFailed(e.to_string()));
            }
        }

        info!("Storefront shutdown complete");
        Ok(())
    }
}
