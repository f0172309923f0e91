use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::actors::ShopService;
use crate::clients::ShopClient;
use crate::config::ShopConfig;
use crate::error::{Result, ShopError};
use crate::persistence::SnapshotRepository;
use crate::store::{Clock, EntityStore, SystemClock};

/// The application system that owns the store actor.
///
/// Responsible for starting the actor, restoring a saved snapshot, and handling shutdown.
pub struct ShopSystem {
    pub client: ShopClient,
    pub config: ShopConfig,
    clock: Arc<dyn Clock>,
    repository: Option<Box<dyn SnapshotRepository>>,
    handle: JoinHandle<()>,
}

impl ShopSystem {
    /// Starts an empty store on the wall clock. Must be called inside a Tokio runtime.
    pub fn new(config: ShopConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: ShopConfig, clock: Arc<dyn Clock>) -> Self {
        info!("Starting shop system");
        let store = EntityStore::new(clock.clone());
        let (service, client) = ShopService::new(config.mailbox_capacity, config.event_capacity, store);
        let handle = tokio::spawn(service.run());

        Self {
            client,
            config,
            clock,
            repository: None,
            handle,
        }
    }

    /// Starts the store and restores whatever `repository` holds.
    ///
    /// The repository is written back on [`shutdown`](Self::shutdown).
    pub async fn open(
        config: ShopConfig,
        clock: Arc<dyn Clock>,
        repository: impl SnapshotRepository + 'static,
    ) -> Result<Self> {
        let mut system = Self::with_clock(config, clock);
        if let Some(snapshot) = repository.load()? {
            system.client.restore(snapshot).await?;
        }
        system.repository = Some(Box::new(repository));
        Ok(system)
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub async fn shutdown(self) -> Result<()> {
        info!("Shutting down system...");

        if let Some(repository) = &self.repository {
            let snapshot = self.client.snapshot().await?;
            repository.save(&snapshot)?;
        }

        self.client.shutdown().await?;

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(ShopError::ActorCommunication(format!("Actor task failed: {:?}", e)));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
