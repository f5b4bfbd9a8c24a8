//! # Store Test Helpers
//!
//! Utilities for testing code that dispatches into a store (such as the catalog
//! coordinator) without running a real [`StoreActor`](super::StoreActor).
//!
//! | Helper | Use Case |
//! |--------|----------|
//! | [`create_mock_store`] + [`expect_dispatch`] | Step through dispatches one at a time and answer each by hand |
//! | [`RecordingStore`] | Accept every dispatch and keep the events for later assertions |
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_store::<CatalogSlice>(10);
//! let task = tokio::spawn(async move { coordinator_using(client).fetch_page(params).await });
//!
//! let (event, responder) = expect_dispatch(&mut receiver).await.unwrap();
//! assert!(matches!(event, CatalogEvent::ListRequested { .. }));
//! responder.send(Ok(Disposition::Applied)).unwrap();
//! ```

use super::client::StoreClient;
use super::error::StoreError;
use super::message::StoreRequest;
use super::slice::{Disposition, Slice, Snapshot};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, oneshot, watch};

/// Creates a store client whose requests land on a receiver owned by the test.
///
/// The client's published snapshot stays at `S::State::default()`.
pub fn create_mock_store<S: Slice>(
    buffer_size: usize,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_publisher, watcher) = watch::channel(Arc::new(S::State::default()));
    (StoreClient::new(sender, watcher), receiver)
}

/// Waits for the next request and returns it if it is a dispatch.
pub async fn expect_dispatch<S: Slice>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(
    S::Event,
    oneshot::Sender<Result<Disposition, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Dispatch { event, respond_to }) => Some((event, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns its responder if it is a snapshot read.
pub async fn expect_snapshot<S: Slice>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<oneshot::Sender<Result<Snapshot<S>, StoreError>>> {
    match receiver.recv().await {
        Some(StoreRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// A store stand-in that answers every dispatch with a fixed disposition and keeps
/// the dispatched events in arrival order.
pub struct RecordingStore<S: Slice> {
    client: StoreClient<S>,
    events: Arc<Mutex<Vec<S::Event>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: Slice> RecordingStore<S> {
    /// Records events and answers each dispatch with [`Disposition::Applied`].
    pub fn new() -> Self {
        Self::answering(Disposition::Applied)
    }

    /// Records events and answers each dispatch with `disposition`.
    pub fn answering(disposition: Disposition) -> Self {
        let (client, mut receiver) = create_mock_store::<S>(100);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                match request {
                    StoreRequest::Dispatch { event, respond_to } => {
                        sink.lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(event);
                        let _ = respond_to.send(Ok(disposition));
                    }
                    StoreRequest::Snapshot { respond_to } => {
                        let _ = respond_to.send(Ok(Arc::new(S::State::default())));
                    }
                }
            }
        });

        Self {
            client,
            events,
            _handle: handle,
        }
    }

    /// Returns a client wired to this recorder.
    pub fn client(&self) -> StoreClient<S> {
        self.client.clone()
    }

    /// Removes and returns every event recorded so far.
    pub fn take_events(&self) -> Vec<S::Event> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl<S: Slice> Default for RecordingStore<S> {
    fn default() -> Self {
        Self::new()
    }
}
