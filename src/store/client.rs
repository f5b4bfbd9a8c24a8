//! # Store Client
//!
//! The handle every consumer holds. It forwards dispatches over the actor's channel
//! and exposes the published snapshots.

use super::error::StoreError;
use super::message::StoreRequest;
use super::slice::{Disposition, Slice, Snapshot};
use tokio::sync::{mpsc, oneshot, watch};

/// A type-safe, cloneable handle to a [`StoreActor`](super::StoreActor).
///
/// * **Cloneable** – holds only a sender and a watch receiver.
/// * **Serialized writes** – every `dispatch` is applied by the actor in arrival order.
/// * **Cheap reads** – `current()` returns the last published snapshot without a round-trip.
pub struct StoreClient<S: Slice> {
    sender: mpsc::Sender<StoreRequest<S>>,
    snapshots: watch::Receiver<Snapshot<S>>,
}

impl<S: Slice> Clone for StoreClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            snapshots: self.snapshots.clone(),
        }
    }
}

impl<S: Slice> StoreClient<S> {
    pub fn new(
        sender: mpsc::Sender<StoreRequest<S>>,
        snapshots: watch::Receiver<Snapshot<S>>,
    ) -> Self {
        Self { sender, snapshots }
    }

    /// Applies `event` and reports what the reducer did with it.
    pub async fn dispatch(&self, event: S::Event) -> Result<Disposition, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Dispatch { event, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Reads the state after every dispatch queued before this call.
    pub async fn snapshot(&self) -> Result<Snapshot<S>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Last snapshot published by the actor.
    pub fn current(&self) -> Snapshot<S> {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified after every applied transition.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<S>> {
        self.snapshots.clone()
    }
}
