//! Typed clients for the catalog and order stores.

#[macro_use]
mod macros;
pub mod catalog_client;
pub mod order_client;

pub use catalog_client::*;
pub use order_client::*;
