//! # Store Messages
//!
//! Requests sent from a [`StoreClient`](super::StoreClient) to its
//! [`StoreActor`](super::StoreActor). Each request carries a one-shot channel that
//! the actor answers once the request has been handled.

use super::error::StoreError;
use super::slice::{Disposition, Slice, Snapshot};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the store actor.
///
/// - **Dispatch**: apply one event through [`Slice::reduce`] and report the [`Disposition`].
/// - **Snapshot**: read the state as of every previously queued dispatch.
#[derive(Debug)]
pub enum StoreRequest<S: Slice> {
    Dispatch {
        event: S::Event,
        respond_to: Response<Disposition>,
    },
    Snapshot {
        respond_to: Response<Snapshot<S>>,
    },
}
