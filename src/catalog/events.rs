//! Events accepted by the catalog reducer.
//!
//! Request-lifecycle events come in triples per stream (`*Requested`,
//! `*Succeeded`, `*Failed`) and carry the sequence number the coordinator issued
//! for the request. The remaining events are local mutations from the UI.
//!
//! Events decode from `{"type": "listRequested", ...}`. Any other `type` decodes
//! to [`CatalogEvent::Unrecognized`], which the reducer leaves unhandled.

use crate::model::{ListParams, Product, ProductId, ProductPage, RequestSeq, Stream};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CatalogEvent {
    ListRequested {
        seq: RequestSeq,
        params: ListParams,
    },
    ListSucceeded {
        seq: RequestSeq,
        page: ProductPage,
        fetched_at: DateTime<Utc>,
    },
    ListFailed {
        seq: RequestSeq,
        message: String,
    },
    SearchRequested {
        seq: RequestSeq,
        query: String,
    },
    SearchSucceeded {
        seq: RequestSeq,
        results: Vec<Product>,
    },
    SearchFailed {
        seq: RequestSeq,
        message: String,
    },
    ProductRequested {
        seq: RequestSeq,
        id: ProductId,
    },
    ProductSucceeded {
        seq: RequestSeq,
        product: Product,
    },
    ProductFailed {
        seq: RequestSeq,
        message: String,
    },
    ItemSelected {
        product: Product,
    },
    SelectionCleared,
    ListCleared,
    SearchCleared,
    ErrorCleared,
    SearchErrorCleared,
    #[serde(other)]
    Unrecognized,
}

impl CatalogEvent {
    pub fn list_requested(seq: impl Into<RequestSeq>, params: ListParams) -> Self {
        Self::ListRequested {
            seq: seq.into(),
            params,
        }
    }

    /// `listSucceeded(items, total, pages, page)` stamped with `fetched_at`.
    pub fn list_succeeded(
        seq: impl Into<RequestSeq>,
        items: Vec<Product>,
        total: u64,
        pages: u32,
        page: u32,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self::ListSucceeded {
            seq: seq.into(),
            page: ProductPage::new(items, total, pages, page),
            fetched_at,
        }
    }

    pub fn list_failed(seq: impl Into<RequestSeq>, message: impl Into<String>) -> Self {
        Self::ListFailed {
            seq: seq.into(),
            message: message.into(),
        }
    }

    pub fn search_requested(seq: impl Into<RequestSeq>, query: impl Into<String>) -> Self {
        Self::SearchRequested {
            seq: seq.into(),
            query: query.into(),
        }
    }

    pub fn search_succeeded(seq: impl Into<RequestSeq>, results: Vec<Product>) -> Self {
        Self::SearchSucceeded {
            seq: seq.into(),
            results,
        }
    }

    pub fn search_failed(seq: impl Into<RequestSeq>, message: impl Into<String>) -> Self {
        Self::SearchFailed {
            seq: seq.into(),
            message: message.into(),
        }
    }

    pub fn item_selected(product: Product) -> Self {
        Self::ItemSelected { product }
    }

    /// The stream and sequence number of a request-lifecycle event.
    pub fn request(&self) -> Option<(Stream, RequestSeq)> {
        match self {
            Self::ListRequested { seq, .. }
            | Self::ListSucceeded { seq, .. }
            | Self::ListFailed { seq, .. } => Some((Stream::List, *seq)),
            Self::SearchRequested { seq, .. }
            | Self::SearchSucceeded { seq, .. }
            | Self::SearchFailed { seq, .. } => Some((Stream::Search, *seq)),
            Self::ProductRequested { seq, .. }
            | Self::ProductSucceeded { seq, .. }
            | Self::ProductFailed { seq, .. } => Some((Stream::Detail, *seq)),
            _ => None,
        }
    }
}
