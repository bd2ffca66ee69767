//! System orchestration, startup, and shutdown logic.

pub mod storefront;
pub mod telemetry;

pub use storefront::*;
pub use telemetry::*;
