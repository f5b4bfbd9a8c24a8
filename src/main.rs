//! Command-line demo: loads the first catalog page (and optionally runs a search)
//! against a live API, logs the resulting state and shuts down.
//!
//! ```bash
//! CATALOG__BASE_URL=http://localhost:5000/api RUST_LOG=info cargo run -- lipstick
//! ```

use catalog_cache::config;
use catalog_cache::lifecycle::{setup_tracing, CatalogSystem};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let settings = config::load(None).map_err(|e| e.to_string())?;
    info!(base_url = %settings.base_url, "Starting catalog demo");

    let system = CatalogSystem::with_http(settings).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("first_page");
    async {
        info!("Fetching first page");
        system.coordinator.fetch_page(system.list_params(1)).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    if let Some(query) = std::env::args().nth(1) {
        let span = tracing::info_span!("search");
        async {
            info!(%query, "Searching");
            system.coordinator.search(&query).await
        }
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;
    }

    let state = system.catalog.snapshot().await.map_err(|e| e.to_string())?;
    match &state.error {
        Some(message) => error!(%message, "Catalog fetch failed"),
        None => {
            info!(items = state.items.len(), "{}", state.showing());
            for product in &state.items {
                info!(id = %product.id, name = %product.name, price = product.price, "Product");
            }
        }
    }
    if let Some(message) = &state.search_error {
        error!(%message, "Search failed");
    } else if state.search_query.is_some() {
        info!(results = state.search_results.len(), "Search complete");
    }

    system.shutdown().await.map_err(|e| e.to_string())?;
    Ok(())
}
