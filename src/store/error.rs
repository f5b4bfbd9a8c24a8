//! # Store Errors
//!
//! Failures of the channel between a [`StoreClient`](super::StoreClient) and its
//! [`StoreActor`](super::StoreActor). Reducers never fail, so these are the only
//! errors a dispatch can produce.

/// Errors that can occur while talking to a store actor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    ActorClosed,
    #[error("Store dropped response channel")]
    ActorDropped,
}
