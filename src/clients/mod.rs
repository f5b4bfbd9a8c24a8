//! Consumer-facing handles to the catalog store.

pub mod cache;
pub mod catalog_client;
pub mod coordinator;

pub use cache::ResponseCache;
pub use catalog_client::*;
pub use coordinator::CatalogCoordinator;
