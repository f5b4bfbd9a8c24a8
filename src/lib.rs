//! # Catalog Cache
//!
//! > **Client-side product catalog state behind a single-owner store actor.**
//!
//! The crate keeps one catalog state per session: the current product page,
//! search results, the selected product, and the loading and error flags of each
//! request. Network responses are folded into that state by a pure reducer, and
//! responses that were overtaken by a newer request of the same kind are dropped.
//!
//! ## Core Concepts
//!
//! ### One owner, serialized transitions
//! The state lives inside a [`StoreActor`](store::StoreActor) task. Every change is
//! an event sent over its channel and applied by
//! [`Slice::reduce`](store::Slice::reduce), one at a time. Readers get immutable
//! `Arc` snapshots and can subscribe to a `watch` channel to re-render.
//!
//! ### Sequence numbers instead of "last response wins"
//! The [`CatalogCoordinator`](clients::CatalogCoordinator) tags every request with
//! the next number of its stream (list, search, detail). The reducer applies a
//! completion only if it carries the newest number of its stream, so a slow page-1
//! response arriving after page 2 leaves page 2 on screen.
//!
//! ### Failures are values
//! The [`FetchGateway`](gateway::FetchGateway) never returns `Err`. Every call ends
//! in an [`Outcome`](gateway::Outcome), and failures become `*Failed` events that
//! set the matching error field until it is cleared or a retry succeeds.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`store`])
//! Generic store actor and client, independent of the catalog.
//! - **Key items**: [`Slice`](store::Slice), [`StoreActor`](store::StoreActor), [`StoreClient`](store::StoreClient).
//!
//! ### 2. The State ([`catalog`], [`model`])
//! [`CatalogState`](catalog::CatalogState), [`CatalogEvent`](catalog::CatalogEvent)
//! and the pure [`reduce`](catalog::reduce), plus the value types they carry.
//!
//! ### 3. The Network ([`gateway`])
//! HTTP access through the [`Transport`](gateway::Transport) trait, with a scripted
//! [`MockTransport`](gateway::mock::MockTransport) for tests.
//!
//! ### 4. The Interface ([`clients`])
//! - [`CatalogClient`](clients::CatalogClient) for local events and snapshots.
//! - [`CatalogCoordinator`](clients::CatalogCoordinator) for fetches, searches and cache invalidation.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`CatalogSystem`](lifecycle::CatalogSystem) starts the store, wires everything
//! together and shuts it down again.
//!
//! ## Quick Start
//!
//! ```bash
//! CATALOG__BASE_URL=http://localhost:5000/api RUST_LOG=info cargo run
//! ```

pub mod catalog;
pub mod clients;
pub mod config;
pub mod gateway;
pub mod lifecycle;
pub mod model;
pub mod store;
