//! # storefront
//!
//! Client-side core of a shopping app backed by a REST product catalog.
//!
//! - **Catalog** - [`CatalogApi`] and its HTTP implementation [`CatalogClient`]
//! - **Product list** - [`ListController`] state machine (paging, debounced
//!   search, refresh, infinite scroll) run by [`ListService`]
//! - **Cart** - [`CartStore`] owned by [`CartService`], shared through [`CartClient`]
//! - **Links** - deep links and share requests for product screens
//! - **System** - [`Storefront`] wires the services together; call
//!   [`setup_tracing`] once at startup
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use storefront::{AppConfig, Storefront};
//!
//! let config = AppConfig::from_env()?;
//! let system = Storefront::connect(&config)?;
//!
//! system.list_client.load_initial().await?;
//! system.list_client.set_search_text("shirt".to_string()).await?;
//! let snapshot = system.list_client.snapshot().await?;
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod app_system;
pub mod cart;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod detail;
pub mod domain;
pub mod error;
pub mod links;
pub mod list;
pub mod messages;
pub mod share;

#[cfg(test)]
mod mock_catalog;

pub use app_system::{setup_tracing, Screen, Storefront};
pub use cart::{CartService, CartStore};
pub use catalog::{CatalogApi, CatalogClient};
pub use clients::{CartClient, ListClient};
pub use config::AppConfig;
pub use domain::{CartItem, Product};
pub use list::{FetchOutcome, ListController, ListService, ListSnapshot, Phase};
