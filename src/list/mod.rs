//! The product list: paginated fetch, debounced client-side search,
//! pull-to-refresh and infinite scroll.
//!
//! [`ListController`] is the state machine and does no I/O of its own beyond
//! the optional async wrappers; [`ListService`] runs it on an event loop so
//! input keeps flowing while a page is loading.

mod controller;
mod debounce;
mod service;
mod state;
mod view;

pub use controller::{fetch_page, FetchOutcome, ListController};
pub use debounce::Debouncer;
pub use service::ListService;
pub use state::{FetchKind, FetchTicket, ListState, Phase};
pub use view::{EmptyState, ListSnapshot};
