//! Generic single-owner store.
//!
//! This module provides the building blocks for holding one piece of application
//! state behind an actor: a pure [`Slice`] reducer, the [`StoreActor`] that owns the
//! state and applies events one at a time, and the cloneable [`StoreClient`] that
//! every consumer uses to dispatch events and read snapshots.
//!
//! # Main Components
//!
//! - [`Slice`] - Trait that a state aggregate implements to be managed by a store
//! - [`StoreActor`] - Owns the state, serializes every transition
//! - [`StoreClient`] - Type-safe handle for dispatching and reading snapshots
//! - [`StoreError`] - Channel-level failures
//!
//! # Testing
//!
//! See [`mock`] for helpers that intercept dispatched events without running an actor.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod slice;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use slice::{Disposition, Slice, Snapshot};
