//! Pure data structures shared by the store, the gateway and the coordinator.

pub mod checkout;
pub mod listing;
pub mod product;
pub mod request;

pub use checkout::*;
pub use listing::*;
pub use product::*;
pub use request::*;
