//! # Store Actor
//!
//! The `StoreActor` is the server half of a store. It owns the state of one
//! [`Slice`] and the receiving end of the request channel, and it handles requests
//! strictly one after another. Because nothing else can reach the state, every
//! transition is serialized through [`Slice::reduce`] without locks.
//!
//! After every applied transition the actor publishes a fresh [`Snapshot`] on a
//! `watch` channel so that subscribers can re-render.

use super::client::StoreClient;
use super::message::StoreRequest;
use super::slice::{Disposition, Slice, Snapshot};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// The actor that owns a slice's state.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` and its `client`.
/// 2.  **Run**: Spawn `actor.run()` on the runtime.
/// 3.  **Share**: Clone the client into every consumer that needs the state.
///
/// The actor stops when every client clone has been dropped.
pub struct StoreActor<S: Slice> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S::State,
    snapshots: watch::Sender<Snapshot<S>>,
    applied: u64,
}

impl<S: Slice> StoreActor<S> {
    /// Creates a new `StoreActor` holding `S::State::default()` and its client.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full,
    /// dispatches wait for space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<S>) {
        Self::with_state(buffer_size, S::State::default())
    }

    /// Creates a store that starts from `state` instead of the default.
    pub fn with_state(buffer_size: usize, state: S::State) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, watcher) = watch::channel(Arc::new(state.clone()));
        let actor = Self {
            receiver,
            state,
            snapshots,
            applied: 0,
        };
        let client = StoreClient::new(sender, watcher);
        (actor, client)
    }

    /// Runs the actor's event loop until the channel closes.
    pub async fn run(mut self) {
        let slice = S::NAME;
        info!(slice, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Dispatch { event, respond_to } => {
                    debug!(slice, ?event, "Dispatch");
                    let current = std::mem::take(&mut self.state);
                    let (next, disposition) = S::reduce(current, event);
                    self.state = next;

                    match disposition {
                        Disposition::Applied => {
                            self.applied += 1;
                            self.snapshots.send_replace(Arc::new(self.state.clone()));
                        }
                        Disposition::Stale => debug!(slice, "Stale completion dropped"),
                        Disposition::Ignored => debug!(slice, "Unhandled event"),
                    }
                    let _ = respond_to.send(Ok(disposition));
                }
                StoreRequest::Snapshot { respond_to } => {
                    let snapshot = self.snapshots.borrow().clone();
                    let _ = respond_to.send(Ok(snapshot));
                }
            }
        }

        info!(slice, applied = self.applied, "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Tally {
        count: u32,
        label: Option<String>,
    }

    #[derive(Debug)]
    enum TallyEvent {
        Add(u32),
        Label(String),
        Noise,
    }

    struct TallySlice;

    impl Slice for TallySlice {
        type State = Tally;
        type Event = TallyEvent;
        const NAME: &'static str = "tally";

        fn reduce(mut state: Tally, event: TallyEvent) -> (Tally, Disposition) {
            match event {
                TallyEvent::Add(n) => {
                    state.count += n;
                    (state, Disposition::Applied)
                }
                TallyEvent::Label(label) => {
                    state.label = Some(label);
                    (state, Disposition::Applied)
                }
                TallyEvent::Noise => (state, Disposition::Ignored),
            }
        }
    }

    #[tokio::test]
    async fn test_dispatch_and_snapshot() {
        let (actor, client) = StoreActor::<TallySlice>::new(8);
        tokio::spawn(actor.run());

        assert_eq!(
            client.dispatch(TallyEvent::Add(2)).await.unwrap(),
            Disposition::Applied
        );
        client.dispatch(TallyEvent::Add(3)).await.unwrap();
        client
            .dispatch(TallyEvent::Label("five".into()))
            .await
            .unwrap();

        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.count, 5);
        assert_eq!(snapshot.label.as_deref(), Some("five"));
    }

    #[tokio::test]
    async fn test_ignored_event_does_not_publish() {
        let (actor, client) = StoreActor::<TallySlice>::new(8);
        tokio::spawn(actor.run());
        let mut watcher = client.subscribe();

        let disposition = client.dispatch(TallyEvent::Noise).await.unwrap();
        assert_eq!(disposition, Disposition::Ignored);
        assert!(!watcher.has_changed().unwrap());
        assert_eq!(*client.current(), Tally::default());

        client.dispatch(TallyEvent::Add(1)).await.unwrap();
        assert!(watcher.has_changed().unwrap());
        assert_eq!(watcher.borrow_and_update().count, 1);
    }

    #[tokio::test]
    async fn test_with_state_starts_from_given_state() {
        let initial = Tally {
            count: 10,
            label: None,
        };
        let (actor, client) = StoreActor::<TallySlice>::with_state(8, initial.clone());
        tokio::spawn(actor.run());
        assert_eq!(*client.snapshot().await.unwrap(), initial);
    }

    #[tokio::test]
    async fn test_actor_shutdown_when_clients_dropped() {
        let (actor, client) = StoreActor::<TallySlice>::new(8);
        let handle = tokio::spawn(actor.run());
        client.dispatch(TallyEvent::Add(1)).await.unwrap();
        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_dispatch_after_actor_stopped() {
        let (actor, client) = StoreActor::<TallySlice>::new(8);
        drop(actor);
        let result = client.dispatch(TallyEvent::Add(1)).await;
        assert_eq!(result, Err(StoreError::ActorClosed));
    }
}
