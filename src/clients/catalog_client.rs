use crate::catalog::{CatalogEvent, CatalogSlice, CatalogState};
use crate::model::Product;
use crate::store::{Disposition, Snapshot, StoreClient, StoreError};
use tokio::sync::watch;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog store unavailable: {0}")]
    Store(#[from] StoreError),
}

/// Client for the catalog store.
///
/// One method per local event, plus the snapshot selectors. Request-lifecycle
/// events are dispatched by the
/// [`CatalogCoordinator`](crate::clients::CatalogCoordinator).
#[derive(Clone)]
pub struct CatalogClient {
    inner: StoreClient<CatalogSlice>,
}

impl CatalogClient {
    pub fn new(inner: StoreClient<CatalogSlice>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn select_item(&self, product: Product) -> Result<Disposition, CatalogError> {
        debug!(?product, "select_item called");
        self.dispatch(CatalogEvent::item_selected(product)).await
    }

    #[instrument(skip(self))]
    pub async fn clear_selection(&self) -> Result<Disposition, CatalogError> {
        self.dispatch(CatalogEvent::SelectionCleared).await
    }

    #[instrument(skip(self))]
    pub async fn clear_list(&self) -> Result<Disposition, CatalogError> {
        self.dispatch(CatalogEvent::ListCleared).await
    }

    #[instrument(skip(self))]
    pub async fn clear_search(&self) -> Result<Disposition, CatalogError> {
        self.dispatch(CatalogEvent::SearchCleared).await
    }

    #[instrument(skip(self))]
    pub async fn clear_error(&self) -> Result<Disposition, CatalogError> {
        self.dispatch(CatalogEvent::ErrorCleared).await
    }

    #[instrument(skip(self))]
    pub async fn clear_search_error(&self) -> Result<Disposition, CatalogError> {
        self.dispatch(CatalogEvent::SearchErrorCleared).await
    }

    /// Dispatches any catalog event, including request-lifecycle events.
    pub async fn dispatch(&self, event: CatalogEvent) -> Result<Disposition, CatalogError> {
        Ok(self.inner.dispatch(event).await?)
    }

    /// State after every event dispatched before this call.
    pub async fn snapshot(&self) -> Result<Snapshot<CatalogSlice>, CatalogError> {
        Ok(self.inner.snapshot().await?)
    }

    /// Last published state, without waiting on the store.
    pub fn current(&self) -> Snapshot<CatalogSlice> {
        self.inner.current()
    }

    /// Receiver notified after every applied event.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<CatalogSlice>> {
        self.inner.subscribe()
    }
}

impl From<StoreClient<CatalogSlice>> for CatalogClient {
    fn from(inner: StoreClient<CatalogSlice>) -> Self {
        Self::new(inner)
    }
}

/// Selectors over a catalog snapshot.
pub trait CatalogView {
    fn has_error(&self) -> bool;
    fn is_busy(&self) -> bool;
}

impl CatalogView for CatalogState {
    fn has_error(&self) -> bool {
        self.error.is_some() || self.search_error.is_some() || self.detail_error.is_some()
    }

    fn is_busy(&self) -> bool {
        self.loading || self.search_loading || self.detail_loading
    }
}
