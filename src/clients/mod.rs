//! Cloneable handles to the service tasks. Methods are generated by
//! `client_method!` and fail only when the service is gone.

#[macro_use]
mod macros;

use tokio::sync::mpsc;

use crate::domain::{CartItem, Product};
use crate::list::{FetchOutcome, ListSnapshot};
use crate::messages::{CartRequest, ListRequest};

#[derive(Debug, Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }
}

client_method!(CartClient => fn add(product: Product) -> bool as CartRequest::Add);
client_method!(CartClient => fn remove(id: u64) -> bool as CartRequest::Remove);
client_method!(CartClient => fn set_quantity(id: u64, quantity: u32) -> bool as CartRequest::SetQuantity);
client_method!(CartClient => fn contains(id: u64) -> bool as CartRequest::Contains);
client_method!(CartClient => fn items() -> Vec<CartItem> as CartRequest::Items);
client_method!(CartClient => fn total_price() -> f64 as CartRequest::TotalPrice);
client_shutdown!(CartClient => CartRequest);

#[derive(Debug, Clone)]
pub struct ListClient {
    sender: mpsc::Sender<ListRequest>,
}

impl ListClient {
    pub fn new(sender: mpsc::Sender<ListRequest>) -> Self {
        Self { sender }
    }
}

client_method!(ListClient => fn load_initial() -> FetchOutcome as ListRequest::LoadInitial);
client_method!(ListClient => fn refresh() -> FetchOutcome as ListRequest::Refresh);
client_method!(ListClient => fn load_more() -> FetchOutcome as ListRequest::LoadMore);
client_method!(ListClient => fn set_search_text(text: String) -> () as ListRequest::SetSearchText);
client_method!(ListClient => fn snapshot() -> ListSnapshot as ListRequest::Snapshot);
client_shutdown!(ListClient => ListRequest);
