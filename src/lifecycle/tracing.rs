//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden; every log line carries structured fields
//! instead (`slice`, `stream`, `seq`, `path`, `status`).
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle and fetch results
//! RUST_LOG=info cargo run
//!
//! # Every dispatched event and gateway call, with full payloads
//! RUST_LOG=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! | Level | Events |
//! |-------|--------|
//! | `info` | Store start and shutdown, completed fetches, cache clears |
//! | `warn` | Gateway failures and rejected payloads |
//! | `debug` | Dispatched events, stale completions, cache hits, HTTP requests |
//!
//! With `RUST_LOG=info` a page fetch that is overtaken by a newer one looks like:
//!
//! ```text
//! INFO Store started slice="catalog"
//! INFO fetch_page: Fetched page=3 stream="list" seq=#2 count=10 total=25
//! INFO fetch_page: Fetched page=2 stream="list" seq=#1 count=10 total=25
//! INFO Shutdown slice="catalog" applied=4
//! ```
//!
//! The superseded page is logged as fetched like any other response. The store
//! then drops it, which appears at `debug` as
//! `Superseded response dropped stream=list seq=#1`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
