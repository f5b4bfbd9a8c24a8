//! The catalog aggregate.

use crate::model::{ListParams, Pagination, Product, RequestSeq};
use chrono::{DateTime, Utc};

/// Bookkeeping of one request stream.
///
/// `latest` is the highest sequence number seen on the stream. A completion is
/// accepted only while `pending` and only for `latest`; accepting it closes the
/// request, so a duplicate or late completion is stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamCursor {
    latest: Option<RequestSeq>,
    pending: bool,
}

impl StreamCursor {
    /// Opens request `seq`. Returns `false` when `seq` is not newer than the latest
    /// request already seen on this stream.
    pub fn begin(&mut self, seq: RequestSeq) -> bool {
        if self.latest.is_some_and(|latest| seq <= latest) {
            return false;
        }
        self.latest = Some(seq);
        self.pending = true;
        true
    }

    /// Whether a completion tagged `seq` may be applied.
    pub fn accepts(&self, seq: RequestSeq) -> bool {
        self.pending && self.latest == Some(seq)
    }

    pub fn finish(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn latest(&self) -> Option<RequestSeq> {
        self.latest
    }
}

/// Everything the storefront knows about the product catalog.
///
/// Created at session start with `Default::default()` and changed only by
/// [`reduce`](super::reduce).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    /// Current list page in server order.
    pub items: Vec<Product>,
    /// Copy of the product the shopper is looking at.
    pub selected: Option<Product>,
    pub loading: bool,
    pub search_loading: bool,
    pub detail_loading: bool,
    /// Message of the last failed list fetch.
    pub error: Option<String>,
    pub search_error: Option<String>,
    pub detail_error: Option<String>,
    /// Parameters of the most recent list request.
    pub current_filter: Option<ListParams>,
    pub search_query: Option<String>,
    pub search_results: Vec<Product>,
    pub pagination: Pagination,
    pub last_fetched: Option<DateTime<Utc>>,
    /// Set by an explicit invalidation, reset by the next successful list fetch.
    pub cache_cleared: bool,
    pub list_stream: StreamCursor,
    pub search_stream: StreamCursor,
    pub detail_stream: StreamCursor,
}

impl CatalogState {
    /// Page size of the active list query.
    pub fn page_size(&self) -> u32 {
        self.current_filter
            .as_ref()
            .map_or(crate::model::DEFAULT_PAGE_SIZE, |params| params.page_size)
    }

    /// "Showing X to Y of Z" for the current page.
    pub fn showing(&self) -> crate::model::ShowingRange {
        self.pagination.showing(self.page_size())
    }
}
