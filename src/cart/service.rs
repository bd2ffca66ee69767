use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use super::CartStore;
use crate::clients::CartClient;
use crate::domain::Product;
use crate::messages::{CartRequest, ServiceResponse};

/// Owns the one [`CartStore`] every screen shares. Screens hold cloned
/// [`CartClient`]s; all mutation goes through this task.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    store: CartStore,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            store: CartStore::new(),
        };
        (service, CartClient::new(sender))
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::Add {
                    product,
                    respond_to,
                } => self.handle_add(product, respond_to),
                CartRequest::Remove { id, respond_to } => self.handle_remove(id, respond_to),
                CartRequest::SetQuantity {
                    id,
                    quantity,
                    respond_to,
                } => self.handle_set_quantity(id, quantity, respond_to),
                CartRequest::Contains { id, respond_to } => {
                    let _ = respond_to.send(self.store.contains(id));
                }
                CartRequest::Items { respond_to } => {
                    let _ = respond_to.send(self.store.items().to_vec());
                }
                CartRequest::TotalPrice { respond_to } => {
                    let _ = respond_to.send(self.store.total_price());
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!(items = self.store.len(), "CartService stopped");
    }

    #[instrument(fields(product_id = product.id, title = %product.title), skip(self, product, respond_to))]
    fn handle_add(&mut self, product: Product, respond_to: ServiceResponse<bool>) {
        let added = self.store.add(product);
        if added {
            info!(items = self.store.len(), "Added to cart");
        } else {
            debug!("Already in cart");
        }
        let _ = respond_to.send(added);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remove(&mut self, id: u64, respond_to: ServiceResponse<bool>) {
        let removed = self.store.remove(id);
        debug!(removed, "Processed remove request");
        let _ = respond_to.send(removed);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_set_quantity(&mut self, id: u64, quantity: u32, respond_to: ServiceResponse<bool>) {
        let changed = self.store.set_quantity(id, quantity);
        debug!(changed, total = self.store.total_price(), "Processed quantity update");
        let _ = respond_to.send(changed);
    }
}
