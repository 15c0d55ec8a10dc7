use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::clients::{ProductLoader, UserLoader};
use crate::fetch::{Transport, DEFAULT_FETCH_TIMEOUT};

/// Settings for a [`CatalogSystem`].
///
/// Passed by value at construction; there is no ambient configuration
/// source. `RUST_LOG` (see [`setup_tracing`](crate::lifecycle::setup_tracing))
/// is the only environment surface of the crate.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the REST API serving the collections.
    pub base_url: String,
    /// Upper bound on a single fetch round-trip.
    pub fetch_timeout: Duration,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// The runtime orchestrator for the catalog's resource loaders.
///
/// `CatalogSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping all loader tasks
/// - **Dependency Wiring**: Handing the shared transport to every loader by
///   constructor injection
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::new(CatalogConfig::new(base_url), transport);
///
/// // Use the typed loaders to refresh and observe collections
/// system.user_loader.load().await?;
/// system.product_loader.load().await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// Typed handle for the user collection
    pub user_loader: UserLoader,

    /// Typed handle for the product collection
    pub product_loader: ProductLoader,

    /// Task handles for all running loaders (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Creates and initializes a new `CatalogSystem` with all loaders
    /// running.
    ///
    /// Each loader runs in its own Tokio task and shares the injected
    /// transport.
    pub fn new(config: CatalogConfig, transport: Arc<dyn Transport>) -> Self {
        let (user_task, user_loader) = UserLoader::with_timeout(
            &config.base_url,
            Arc::clone(&transport),
            config.fetch_timeout,
        );
        let (product_task, product_loader) =
            ProductLoader::with_timeout(&config.base_url, transport, config.fetch_timeout);

        let user_handle = tokio::spawn(user_task.run());
        let product_handle = tokio::spawn(product_task.run());

        Self {
            user_loader,
            product_loader,
            handles: vec![user_handle, product_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the typed loaders closes their request channels; each
    /// loader finishes any in-flight fetch, publishes its terminal state,
    /// and exits its event loop. Held [`subscribe`](UserLoader::subscribe)
    /// receivers stay readable after shutdown - they keep the last
    /// published snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all loader tasks shut down cleanly
    /// - `Err(String)` if any loader task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Closing the channels signals the loaders to exit their loops.
        drop(self.user_loader);
        drop(self.product_loader);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Loader task failed: {:?}", e);
                return Err(format!("Loader task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockTransport;
    use crate::model::{Product, User};

    #[tokio::test]
    async fn loads_both_collections_over_the_shared_transport() {
        let transport = MockTransport::new();
        transport
            .expect_get("/users")
            .return_json(r#"[{"id":1,"name":"Ann","email":"a@x.com"}]"#);
        transport
            .expect_get("/products")
            .return_json(r#"[{"id":7,"name":"Desk","price":129.5}]"#);

        let system = CatalogSystem::new(
            CatalogConfig::new("http://localhost:3000"),
            Arc::new(transport.clone()),
        );

        system.user_loader.load().await.unwrap();
        system.product_loader.load().await.unwrap();

        assert_eq!(
            *system.user_loader.state().items,
            vec![User::new(1, "Ann", "a@x.com")]
        );
        assert_eq!(
            *system.product_loader.state().items,
            vec![Product::new(7, "Desk", 129.5)]
        );

        transport.verify();
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_completes_with_idle_loaders() {
        let transport = MockTransport::new();
        let system = CatalogSystem::new(
            CatalogConfig::new("http://localhost:3000"),
            Arc::new(transport),
        );
        system.shutdown().await.unwrap();
    }
}
