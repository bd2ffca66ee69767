//! The shopping cart: an owned store plus the service task that shares it
//! between screens.

mod service;
mod store;

pub use service::CartService;
pub use store::CartStore;
