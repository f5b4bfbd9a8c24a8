//! # Async Coordinator
//!
//! Runs the request lifecycle of every catalog intent:
//!
//! 1. Issue the next sequence number of the intent's stream.
//! 2. Dispatch `*Requested` tagged with it.
//! 3. Serve the request from the response cache, or call the gateway.
//! 4. Dispatch `*Succeeded` or `*Failed` with the same number.
//!
//! The store decides whether the completion is still current. A completion that
//! was superseded while in flight comes back as [`Disposition::Stale`] and leaves
//! the state untouched; there is no other cancellation.

use super::cache::ResponseCache;
use super::catalog_client::{CatalogClient, CatalogError};
use crate::catalog::CatalogEvent;
use crate::gateway::{FetchGateway, Outcome, Transport};
use crate::model::{ListParams, ProductId, RequestSeq, Stream};
use crate::store::Disposition;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Per-stream sequence counters. The first number issued on a stream is 1.
#[derive(Debug, Default)]
struct Sequences {
    list: AtomicU64,
    search: AtomicU64,
    detail: AtomicU64,
}

impl Sequences {
    fn next(&self, stream: Stream) -> RequestSeq {
        let counter = match stream {
            Stream::List => &self.list,
            Stream::Search => &self.search,
            Stream::Detail => &self.detail,
        };
        RequestSeq(counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Drives catalog fetches against a [`FetchGateway`] and the catalog store.
///
/// Clones share the sequence counters and the response cache, so intents may be
/// issued from any number of tasks.
pub struct CatalogCoordinator<T: Transport> {
    gateway: FetchGateway<T>,
    client: CatalogClient,
    cache: Arc<ResponseCache>,
    sequences: Arc<Sequences>,
}

impl<T: Transport> Clone for CatalogCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            client: self.client.clone(),
            cache: self.cache.clone(),
            sequences: self.sequences.clone(),
        }
    }
}

impl<T: Transport> CatalogCoordinator<T> {
    pub fn new(gateway: FetchGateway<T>, client: CatalogClient, cache: ResponseCache) -> Self {
        Self {
            gateway,
            client,
            cache: Arc::new(cache),
            sequences: Arc::new(Sequences::default()),
        }
    }

    /// Loads one page of the catalog into `items`.
    ///
    /// Returns the disposition of the completion event.
    #[instrument(skip(self, params), fields(page = params.page))]
    pub async fn fetch_page(&self, params: ListParams) -> Result<Disposition, CatalogError> {
        let seq = self.sequences.next(Stream::List);
        let generation = self.cache.generation();
        debug!(?params, %seq, "fetch_page called");

        let requested = self
            .client
            .dispatch(CatalogEvent::list_requested(seq, params.clone()))
            .await?;
        if requested == Disposition::Stale {
            return Ok(Disposition::Stale);
        }

        let outcome = match self.cache.page(&params) {
            Some(page) => {
                debug!(%seq, "Served from cache");
                Outcome::success(page)
            }
            None => {
                let outcome = self.gateway.fetch_list(&params).await;
                if let Outcome::Success { payload } = &outcome {
                    self.cache.store_page(generation, params, payload.clone());
                }
                outcome
            }
        };

        let event = match outcome {
            Outcome::Success { payload } => {
                info!(stream = "list", %seq, count = payload.products.len(), total = payload.total, "Fetched");
                CatalogEvent::ListSucceeded {
                    seq,
                    page: payload,
                    fetched_at: Utc::now(),
                }
            }
            Outcome::Failure { message, code } => {
                warn!(stream = "list", %seq, ?code, %message, "Fetch failed");
                CatalogEvent::list_failed(seq, message)
            }
        };
        self.complete(Stream::List, seq, event).await
    }

    /// Runs a search into `search_results`. Search results are never cached.
    ///
    /// A blank query clears the results instead of calling the server.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Disposition, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return self.client.clear_search().await;
        }

        let seq = self.sequences.next(Stream::Search);
        let requested = self
            .client
            .dispatch(CatalogEvent::search_requested(seq, query))
            .await?;
        if requested == Disposition::Stale {
            return Ok(Disposition::Stale);
        }

        let event = match self.gateway.search(query).await {
            Outcome::Success { payload } => {
                info!(stream = "search", %seq, count = payload.len(), "Fetched");
                CatalogEvent::search_succeeded(seq, payload)
            }
            Outcome::Failure { message, code } => {
                warn!(stream = "search", %seq, ?code, %message, "Search failed");
                CatalogEvent::search_failed(seq, message)
            }
        };
        self.complete(Stream::Search, seq, event).await
    }

    /// Loads a single product and selects it.
    #[instrument(skip(self))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<Disposition, CatalogError> {
        let seq = self.sequences.next(Stream::Detail);
        let generation = self.cache.generation();
        let requested = self
            .client
            .dispatch(CatalogEvent::ProductRequested {
                seq,
                id: id.clone(),
            })
            .await?;
        if requested == Disposition::Stale {
            return Ok(Disposition::Stale);
        }

        let outcome = match self.cache.product(&id) {
            Some(product) => {
                debug!(%seq, "Served from cache");
                Outcome::success(product)
            }
            None => {
                let outcome = self.gateway.fetch_one(&id).await;
                if let Outcome::Success { payload } = &outcome {
                    self.cache.store_product(generation, payload.clone());
                }
                outcome
            }
        };

        let event = match outcome {
            Outcome::Success { payload } => CatalogEvent::ProductSucceeded {
                seq,
                product: payload,
            },
            Outcome::Failure { message, code } => {
                warn!(stream = "detail", %seq, ?code, %message, "Fetch failed");
                CatalogEvent::ProductFailed { seq, message }
            }
        };
        self.complete(Stream::Detail, seq, event).await
    }

    /// Empties the response cache and the cached list.
    ///
    /// A list fetch still in flight is retired: its completion comes back stale
    /// and its response is not written to the cache.
    #[instrument(skip(self))]
    pub async fn clear_cache(&self) -> Result<Disposition, CatalogError> {
        self.cache.clear();
        info!("Cache cleared");
        self.client.clear_list().await
    }

    async fn complete(
        &self,
        stream: Stream,
        seq: RequestSeq,
        event: CatalogEvent,
    ) -> Result<Disposition, CatalogError> {
        let disposition = self.client.dispatch(event).await?;
        if disposition == Disposition::Stale {
            debug!(%stream, %seq, "Superseded response dropped");
        }
        Ok(disposition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSlice;
    use crate::gateway::mock::MockTransport;
    use crate::gateway::TransportError;
    use crate::store::mock::{create_mock_store, expect_dispatch, RecordingStore};
    use serde_json::json;
    use std::time::Duration;

    fn coordinator(
        mock: &MockTransport,
        recorder: &RecordingStore<CatalogSlice>,
    ) -> CatalogCoordinator<MockTransport> {
        CatalogCoordinator::new(
            FetchGateway::new(mock.clone()),
            CatalogClient::new(recorder.client()),
            ResponseCache::new(8, Duration::from_secs(60)),
        )
    }

    fn page_body() -> serde_json::Value {
        json!({
            "products": [{ "id": 1, "product_name": "Lipstick", "price": 12.5, "stock_qty": 4 }],
            "total": 1,
            "pages": 1,
            "current_page": 1
        })
    }

    #[test]
    fn test_sequences_are_per_stream() {
        let sequences = Sequences::default();
        assert_eq!(sequences.next(Stream::List), RequestSeq(1));
        assert_eq!(sequences.next(Stream::List), RequestSeq(2));
        assert_eq!(sequences.next(Stream::Search), RequestSeq(1));
        assert_eq!(sequences.next(Stream::Detail), RequestSeq(1));
    }

    #[tokio::test]
    async fn test_fetch_page_dispatches_requested_then_succeeded() {
        let mock = MockTransport::new();
        mock.expect_get("/products?page=1&pageSize=10").return_json(200, page_body());
        let recorder = RecordingStore::<CatalogSlice>::new();

        let disposition = coordinator(&mock, &recorder)
            .fetch_page(ListParams::page(1))
            .await
            .unwrap();
        assert_eq!(disposition, Disposition::Applied);

        let events = recorder.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], CatalogEvent::list_requested(1, ListParams::page(1)));
        match &events[1] {
            CatalogEvent::ListSucceeded { seq, page, .. } => {
                assert_eq!(*seq, RequestSeq(1));
                assert_eq!(page.products[0].name, "Lipstick");
            }
            other => panic!("Expected ListSucceeded, got {other:?}"),
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_fetch_page_failure_carries_server_message() {
        let mock = MockTransport::new();
        mock.expect_get("/products?page=1&pageSize=10")
            .return_json(500, json!({ "message": "Error fetching" }));
        let recorder = RecordingStore::<CatalogSlice>::new();

        coordinator(&mock, &recorder)
            .fetch_page(ListParams::page(1))
            .await
            .unwrap();

        let events = recorder.take_events();
        assert_eq!(events[1], CatalogEvent::list_failed(1, "Error fetching"));
    }

    #[tokio::test]
    async fn test_second_fetch_of_same_page_is_served_from_cache() {
        let mock = MockTransport::new();
        mock.expect_get("/products?page=1&pageSize=10").return_json(200, page_body());
        let recorder = RecordingStore::<CatalogSlice>::new();
        let coordinator = coordinator(&mock, &recorder);

        coordinator.fetch_page(ListParams::page(1)).await.unwrap();
        coordinator.fetch_page(ListParams::page(1)).await.unwrap();

        assert_eq!(mock.received().len(), 1);
        let events = recorder.take_events();
        assert_eq!(events.len(), 4);
        assert_eq!(events[2].request(), Some((Stream::List, RequestSeq(2))));
        assert!(matches!(events[3], CatalogEvent::ListSucceeded { seq: RequestSeq(2), .. }));
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let mock = MockTransport::new();
        mock.expect_get("/products?page=1&pageSize=10").return_json(200, page_body());
        mock.expect_get("/products?page=1&pageSize=10").return_json(200, page_body());
        let recorder = RecordingStore::<CatalogSlice>::new();
        let coordinator = coordinator(&mock, &recorder);

        coordinator.fetch_page(ListParams::page(1)).await.unwrap();
        coordinator.clear_cache().await.unwrap();
        coordinator.fetch_page(ListParams::page(1)).await.unwrap();

        let events = recorder.take_events();
        assert_eq!(events[2], CatalogEvent::ListCleared);
        mock.verify();
    }

    #[tokio::test]
    async fn test_search_is_not_cached() {
        let mock = MockTransport::new();
        mock.expect_get("/products/search?q=lip").return_json(200, json!({ "results": [] }));
        mock.expect_get("/products/search?q=lip").return_err(TransportError::Timeout);
        let recorder = RecordingStore::<CatalogSlice>::new();
        let coordinator = coordinator(&mock, &recorder);

        coordinator.search(" lip ").await.unwrap();
        coordinator.search("lip").await.unwrap();

        let events = recorder.take_events();
        assert_eq!(events[0], CatalogEvent::search_requested(1, "lip"));
        assert_eq!(events[1], CatalogEvent::search_succeeded(1, vec![]));
        assert_eq!(events[3], CatalogEvent::search_failed(2, "Search failed"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_blank_search_clears_results() {
        let mock = MockTransport::new();
        let recorder = RecordingStore::<CatalogSlice>::new();

        coordinator(&mock, &recorder).search("   ").await.unwrap();

        assert_eq!(recorder.take_events(), vec![CatalogEvent::SearchCleared]);
        assert!(mock.received().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_product_uses_detail_stream() {
        let mock = MockTransport::new();
        mock.expect_get("/products/1")
            .return_json(200, json!({ "id": 1, "product_name": "Lipstick", "price": 12.5 }));
        let recorder = RecordingStore::<CatalogSlice>::new();
        let coordinator = coordinator(&mock, &recorder);

        coordinator.fetch_product(ProductId::from(1)).await.unwrap();
        coordinator.fetch_product(ProductId::from(1)).await.unwrap();

        let events = recorder.take_events();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].request(), Some((Stream::Detail, RequestSeq(1))));
        assert!(matches!(events[3], CatalogEvent::ProductSucceeded { seq: RequestSeq(2), .. }));
        mock.verify();
    }

    #[tokio::test]
    async fn test_stale_request_skips_network() {
        let mock = MockTransport::new();
        let (store, mut receiver) = create_mock_store::<CatalogSlice>(10);
        let coordinator = CatalogCoordinator::new(
            FetchGateway::new(mock.clone()),
            CatalogClient::new(store),
            ResponseCache::new(8, Duration::from_secs(60)),
        );

        let task = tokio::spawn(async move { coordinator.fetch_page(ListParams::page(1)).await });

        let (event, responder) = expect_dispatch(&mut receiver)
            .await
            .expect("Expected Dispatch request");
        assert!(matches!(event, CatalogEvent::ListRequested { .. }));
        responder.send(Ok(Disposition::Stale)).unwrap();

        assert_eq!(task.await.unwrap(), Ok(Disposition::Stale));
        assert!(mock.received().is_empty());
    }
}
