//! # Slice Trait
//!
//! A `Slice` is one aggregate of application state together with the pure function
//! that moves it forward. The [`StoreActor`](super::StoreActor) is written once
//! against this trait and works for any slice.
//!
//! # Purity
//! `reduce` receives the current state by value and returns the next one. It must not
//! perform I/O, read clocks or touch anything outside its arguments. Anything
//! time-dependent (such as a fetch timestamp) travels inside the event.

use std::fmt::Debug;
use std::sync::Arc;

/// What the reducer did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// The event produced a new state.
    Applied,
    /// The event completed a request that is no longer the latest on its stream.
    /// Dropped without touching state.
    Stale,
    /// The event is not handled by this slice (identity transition).
    Ignored,
}

/// Trait that any state aggregate must implement to be held by a [`StoreActor`](super::StoreActor).
///
/// # Associated Types
/// - `State` is the aggregate itself. It starts at `Default::default()`.
/// - `Event` is everything that may be dispatched to the slice, including events
///   the slice chooses to ignore.
pub trait Slice: Send + Sync + 'static {
    /// The aggregate held by the store.
    type State: Clone + Default + Debug + Send + Sync + 'static;

    /// Events accepted by [`Slice::reduce`].
    type Event: Debug + Send + 'static;

    /// Short name used in log fields.
    const NAME: &'static str;

    /// Produce the next state for `event`.
    ///
    /// When the returned disposition is not [`Disposition::Applied`] the returned
    /// state must equal the input state.
    fn reduce(state: Self::State, event: Self::Event) -> (Self::State, Disposition);
}

/// Immutable read-only view of a slice's state handed to consumers.
pub type Snapshot<S> = Arc<<S as Slice>::State>;
