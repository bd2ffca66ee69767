use tokio::sync::oneshot;

use crate::domain::{CartItem, Product};
use crate::list::{FetchOutcome, ListSnapshot};

/// Reply channel carried by every request that expects an answer.
pub type ServiceResponse<T> = oneshot::Sender<T>;

/// Typed requests for the cart service. Each variant carries its parameters
/// and a oneshot channel for the reply.
#[derive(Debug)]
pub enum CartRequest {
    Add {
        product: Product,
        respond_to: ServiceResponse<bool>,
    },
    Remove {
        id: u64,
        respond_to: ServiceResponse<bool>,
    },
    SetQuantity {
        id: u64,
        quantity: u32,
        respond_to: ServiceResponse<bool>,
    },
    Contains {
        id: u64,
        respond_to: ServiceResponse<bool>,
    },
    Items {
        respond_to: ServiceResponse<Vec<CartItem>>,
    },
    TotalPrice {
        respond_to: ServiceResponse<f64>,
    },
    Shutdown,
}

/// Typed requests for the product list service.
///
/// Fetch requests are answered when the fetch settles, or straight away with
/// [`FetchOutcome::Ignored`] when another fetch is already in flight.
#[derive(Debug)]
pub enum ListRequest {
    LoadInitial {
        respond_to: ServiceResponse<FetchOutcome>,
    },
    Refresh {
        respond_to: ServiceResponse<FetchOutcome>,
    },
    LoadMore {
        respond_to: ServiceResponse<FetchOutcome>,
    },
    SetSearchText {
        text: String,
        respond_to: ServiceResponse<()>,
    },
    Snapshot {
        respond_to: ServiceResponse<ListSnapshot>,
    },
    Shutdown,
}
