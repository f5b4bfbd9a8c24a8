//! # Catalog Slice
//!
//! The client-side catalog cache: the current product page, search results, the
//! selected product and the loading/error/staleness flags that go with them.
//!
//! ## Structure
//!
//! - [`state`] - [`CatalogState`] and the per-stream [`StreamCursor`]
//! - [`events`] - [`CatalogEvent`], one variant per transition
//! - [`reducer`] - the pure [`reduce`] function
//!
//! ## Stale-Response Suppression
//!
//! Each request stream (list, search, detail) has its own cursor. A completion is
//! applied only if it belongs to the newest request of its stream and that request
//! has not completed yet; anything else reduces to [`Disposition::Stale`] and leaves
//! the state untouched. This holds whatever order the network completes in.
//!
//! ```rust
//! use catalog_cache::catalog::{reduce, CatalogEvent, CatalogState};
//! use catalog_cache::model::{ListParams, Product};
//! use chrono::Utc;
//!
//! let state = CatalogState::default();
//! let state = reduce(state, CatalogEvent::list_requested(1, ListParams::page(1)));
//! let state = reduce(state, CatalogEvent::list_requested(2, ListParams::page(2)));
//!
//! // Page 2 lands first.
//! let page_two = vec![Product::new(11, "Toner", 7.0, 3)];
//! let state = reduce(state, CatalogEvent::list_succeeded(2, page_two, 12, 2, 2, Utc::now()));
//!
//! // The superseded page-1 response is dropped.
//! let page_one = vec![Product::new(1, "Lipstick", 12.5, 40)];
//! let state = reduce(state, CatalogEvent::list_succeeded(1, page_one, 12, 2, 1, Utc::now()));
//! assert_eq!(state.items[0].name, "Toner");
//! ```

pub mod events;
pub mod reducer;
pub mod state;

pub use events::CatalogEvent;
pub use reducer::{reduce, transition};
pub use state::{CatalogState, StreamCursor};

use crate::store::{Disposition, Slice};

/// The catalog as a store slice.
pub struct CatalogSlice;

impl Slice for CatalogSlice {
    type State = CatalogState;
    type Event = CatalogEvent;
    const NAME: &'static str = "catalog";

    fn reduce(state: CatalogState, event: CatalogEvent) -> (CatalogState, Disposition) {
        transition(state, event)
    }
}
