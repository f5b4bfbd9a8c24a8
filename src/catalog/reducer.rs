//! The pure catalog state transition.

use super::events::CatalogEvent;
use super::state::CatalogState;
use crate::model::{Pagination, Product};
use crate::store::Disposition;
use std::collections::HashSet;

/// Applies `event` to `state` and returns the next state.
pub fn reduce(state: CatalogState, event: CatalogEvent) -> CatalogState {
    transition(state, event).0
}

/// Applies `event` to `state`, reporting whether it was applied, stale or unhandled.
///
/// Stale and unhandled events return `state` untouched.
pub fn transition(mut state: CatalogState, event: CatalogEvent) -> (CatalogState, Disposition) {
    match event {
        // --- List stream ---
        CatalogEvent::ListRequested { seq, params } => {
            if !state.list_stream.begin(seq) {
                return (state, Disposition::Stale);
            }
            state.loading = true;
            state.error = None;
            state.current_filter = Some(params);
        }
        CatalogEvent::ListSucceeded {
            seq,
            page,
            fetched_at,
        } => {
            if !state.list_stream.accepts(seq) {
                return (state, Disposition::Stale);
            }
            state.list_stream.finish();
            state.pagination = Pagination::new(page.total, page.pages, page.current_page);
            state.items = unique_by_id(page.products);
            state.loading = false;
            state.error = None;
            state.last_fetched = Some(fetched_at);
            state.cache_cleared = false;
        }
        CatalogEvent::ListFailed { seq, message } => {
            if !state.list_stream.accepts(seq) {
                return (state, Disposition::Stale);
            }
            state.list_stream.finish();
            state.loading = false;
            state.error = Some(message);
        }

        // --- Search stream ---
        CatalogEvent::SearchRequested { seq, query } => {
            if !state.search_stream.begin(seq) {
                return (state, Disposition::Stale);
            }
            state.search_loading = true;
            state.search_error = None;
            state.search_query = Some(query);
        }
        CatalogEvent::SearchSucceeded { seq, results } => {
            if !state.search_stream.accepts(seq) {
                return (state, Disposition::Stale);
            }
            state.search_stream.finish();
            state.search_results = unique_by_id(results);
            state.search_loading = false;
            state.search_error = None;
        }
        CatalogEvent::SearchFailed { seq, message } => {
            if !state.search_stream.accepts(seq) {
                return (state, Disposition::Stale);
            }
            state.search_stream.finish();
            state.search_loading = false;
            state.search_error = Some(message);
        }

        // --- Detail stream ---
        CatalogEvent::ProductRequested { seq, .. } => {
            if !state.detail_stream.begin(seq) {
                return (state, Disposition::Stale);
            }
            state.detail_loading = true;
            state.detail_error = None;
        }
        CatalogEvent::ProductSucceeded { seq, product } => {
            if !state.detail_stream.accepts(seq) {
                return (state, Disposition::Stale);
            }
            state.detail_stream.finish();
            state.detail_loading = false;
            state.selected = Some(product);
        }
        CatalogEvent::ProductFailed { seq, message } => {
            if !state.detail_stream.accepts(seq) {
                return (state, Disposition::Stale);
            }
            state.detail_stream.finish();
            state.detail_loading = false;
            state.detail_error = Some(message);
        }

        // --- Local mutations ---
        CatalogEvent::ItemSelected { product } => {
            state.selected = Some(product);
        }
        CatalogEvent::SelectionCleared => {
            state.selected = None;
            state.detail_error = None;
        }
        CatalogEvent::ListCleared => {
            state.items.clear();
            state.pagination = Pagination::default();
            state.cache_cleared = true;
            // A list fetch still in flight was issued before the clear.
            state.list_stream.finish();
            state.loading = false;
        }
        CatalogEvent::SearchCleared => {
            state.search_results.clear();
        }
        CatalogEvent::ErrorCleared => {
            state.error = None;
        }
        CatalogEvent::SearchErrorCleared => {
            state.search_error = None;
        }
        CatalogEvent::Unrecognized => return (state, Disposition::Ignored),
    }
    (state, Disposition::Applied)
}

/// Keeps the first occurrence of every product id, preserving server order.
fn unique_by_id(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::with_capacity(products.len());
    products
        .into_iter()
        .filter(|product| seen.insert(product.id.clone()))
        .collect()
}
