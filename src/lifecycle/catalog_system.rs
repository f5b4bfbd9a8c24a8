use crate::catalog::CatalogSlice;
use crate::clients::{CatalogClient, CatalogCoordinator, ResponseCache};
use crate::config::CatalogConfig;
use crate::gateway::{FetchGateway, HttpTransport, Transport, TransportError};
use crate::model::ListParams;
use crate::store::StoreActor;
use tokio::task::JoinError;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    #[error("Store task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

/// The running catalog: one store actor plus the handles that talk to it.
///
/// `CatalogSystem` is responsible for:
/// - **Lifecycle Management**: starting the store actor and stopping it again
/// - **Dependency Wiring**: connecting the coordinator to the gateway, the cache and the store
///
/// There is exactly one store per system. Hand `catalog` and `coordinator` (or
/// clones of them) to whatever needs the catalog; nothing is global.
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::with_http(config)?;
///
/// system.coordinator.fetch_page(system.list_params(1)).await?;
/// let state = system.catalog.snapshot().await?;
///
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem<T: Transport = HttpTransport> {
    /// Local events and snapshot reads.
    pub catalog: CatalogClient,

    /// Fetch, search and invalidation intents.
    pub coordinator: CatalogCoordinator<T>,

    config: CatalogConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem<HttpTransport> {
    /// Starts a system that reaches the API over HTTP.
    pub fn with_http(config: CatalogConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.base_url, config.request_timeout)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> CatalogSystem<T> {
    /// Spawns the store actor and wires the clients to it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: CatalogConfig, transport: T) -> Self {
        let (store_actor, store_client) = StoreActor::<CatalogSlice>::new(config.channel_buffer);
        let store_handle = tokio::spawn(store_actor.run());

        let catalog = CatalogClient::new(store_client);
        let cache = ResponseCache::new(config.cache_capacity, config.cache_ttl);
        let coordinator =
            CatalogCoordinator::new(FetchGateway::new(transport), catalog.clone(), cache);

        info!(base_url = %config.base_url, page_size = config.page_size, "Catalog system started");

        Self {
            catalog,
            coordinator,
            config,
            handles: vec![store_handle],
        }
    }

    /// Parameters for page `page` of the unfiltered catalog at the configured page size.
    pub fn list_params(&self, page: u32) -> ListParams {
        ListParams::page(page).with_page_size(self.config.page_size)
    }

    /// Stops the store and waits for it to finish.
    ///
    /// Dropping the clients closes the store's channel; the actor drains what is
    /// already queued and exits. Clones handed out earlier keep the store alive
    /// until they are dropped too.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down catalog...");

        drop(self.catalog);
        drop(self.coordinator);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}
