use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::fetch::{RestCollection, Transport};
use crate::loader::{LoaderClient, LoaderError, LoaderState, ResourceLoader};
use crate::model::Product;

/// Resource path of the product collection under the API base URL.
const PRODUCTS_PATH: &str = "/products";

/// Typed handle for the product collection loader.
#[derive(Clone)]
pub struct ProductLoader {
    inner: LoaderClient<Product>,
}

impl ProductLoader {
    /// Builds the product loader and its typed client with the default
    /// fetch timeout.
    pub fn new(
        base_url: &str,
        transport: Arc<dyn Transport>,
    ) -> (ResourceLoader<Product>, ProductLoader) {
        let fetcher = RestCollection::new(base_url, PRODUCTS_PATH, transport);
        let (loader, client) = ResourceLoader::new(32, fetcher);
        (loader, ProductLoader { inner: client })
    }

    /// Like [`new`](ProductLoader::new) with an explicit fetch timeout.
    pub fn with_timeout(
        base_url: &str,
        transport: Arc<dyn Transport>,
        timeout: Duration,
    ) -> (ResourceLoader<Product>, ProductLoader) {
        let fetcher =
            RestCollection::new(base_url, PRODUCTS_PATH, transport).with_timeout(timeout);
        let (loader, client) = ResourceLoader::new(32, fetcher);
        (loader, ProductLoader { inner: client })
    }

    /// Refresh the cached product collection.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<(), LoaderError> {
        debug!("Sending request");
        self.inner.load().await
    }

    /// Snapshot of the current product state.
    pub fn state(&self) -> LoaderState<Product> {
        self.inner.state()
    }

    /// Subscription handle for reactive observers.
    pub fn subscribe(&self) -> watch::Receiver<LoaderState<Product>> {
        self.inner.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockTransport;

    #[tokio::test]
    async fn load_publishes_the_decoded_products() {
        let transport = MockTransport::new();
        transport.expect_get("/products").return_json(
            r#"[{"id":7,"name":"Desk","price":129.5},{"id":8,"name":"Lamp","price":24.0}]"#,
        );

        let (loader, products) =
            ProductLoader::new("http://localhost:3000", Arc::new(transport.clone()));
        tokio::spawn(loader.run());

        products.load().await.unwrap();

        let state = products.state();
        assert_eq!(
            *state.items,
            vec![Product::new(7, "Desk", 129.5), Product::new(8, "Lamp", 24.0)]
        );
        assert!(state.last_error.is_none());
        transport.verify();
    }
}
