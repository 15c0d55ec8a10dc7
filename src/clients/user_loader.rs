use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::fetch::{RestCollection, Transport};
use crate::loader::{LoaderClient, LoaderError, LoaderState, ResourceLoader};
use crate::model::User;

/// Resource path of the user collection under the API base URL.
const USERS_PATH: &str = "/users";

/// Typed handle for the user collection loader.
#[derive(Clone)]
pub struct UserLoader {
    inner: LoaderClient<User>,
}

impl UserLoader {
    /// Builds the user loader and its typed client with the default fetch
    /// timeout.
    ///
    /// The returned [`ResourceLoader`] must be spawned via `.run()`.
    pub fn new(
        base_url: &str,
        transport: Arc<dyn Transport>,
    ) -> (ResourceLoader<User>, UserLoader) {
        let fetcher = RestCollection::new(base_url, USERS_PATH, transport);
        let (loader, client) = ResourceLoader::new(32, fetcher);
        (loader, UserLoader { inner: client })
    }

    /// Like [`new`](UserLoader::new) with an explicit fetch timeout.
    pub fn with_timeout(
        base_url: &str,
        transport: Arc<dyn Transport>,
        timeout: Duration,
    ) -> (ResourceLoader<User>, UserLoader) {
        let fetcher = RestCollection::new(base_url, USERS_PATH, transport).with_timeout(timeout);
        let (loader, client) = ResourceLoader::new(32, fetcher);
        (loader, UserLoader { inner: client })
    }

    /// Refresh the cached user collection.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<(), LoaderError> {
        debug!("Sending request");
        self.inner.load().await
    }

    /// Snapshot of the current user state.
    pub fn state(&self) -> LoaderState<User> {
        self.inner.state()
    }

    /// Subscription handle for reactive observers.
    pub fn subscribe(&self) -> watch::Receiver<LoaderState<User>> {
        self.inner.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, MockTransport};

    fn spawn_loader(transport: &MockTransport) -> UserLoader {
        let (loader, client) = UserLoader::new("http://localhost:3000", Arc::new(transport.clone()));
        tokio::spawn(loader.run());
        client
    }

    #[tokio::test]
    async fn load_publishes_the_decoded_users() {
        let transport = MockTransport::new();
        transport
            .expect_get("/users")
            .return_json(r#"[{"id":1,"name":"Ann","email":"a@x.com"}]"#);

        let users = spawn_loader(&transport);
        users.load().await.unwrap();

        let state = users.state();
        assert_eq!(*state.items, vec![User::new(1, "Ann", "a@x.com")]);
        assert!(!state.is_loading);
        assert!(state.last_error.is_none());
        transport.verify();
    }

    #[tokio::test]
    async fn record_missing_a_field_is_a_decode_error_and_items_survive() {
        let transport = MockTransport::new();
        transport
            .expect_get("/users")
            .return_json(r#"[{"id":1,"name":"Ann","email":"a@x.com"}]"#);
        transport
            .expect_get("/users")
            .return_json(r#"[{"id":2,"name":"Bea"}]"#);

        let users = spawn_loader(&transport);
        users.load().await.unwrap();
        users.load().await.unwrap();

        let state = users.state();
        assert_eq!(*state.items, vec![User::new(1, "Ann", "a@x.com")]);
        assert!(matches!(state.last_error, Some(FetchError::Decode(_))));
        assert!(!state.is_loading);
        transport.verify();
    }

    #[tokio::test]
    async fn not_found_is_recorded_without_touching_items() {
        let transport = MockTransport::new();
        transport
            .expect_get("/users")
            .return_json(r#"[{"id":1,"name":"Ann","email":"a@x.com"}]"#);
        transport.expect_get("/users").return_status(404, "");

        let users = spawn_loader(&transport);
        users.load().await.unwrap();
        users.load().await.unwrap();

        let state = users.state();
        assert_eq!(*state.items, vec![User::new(1, "Ann", "a@x.com")]);
        assert_eq!(state.last_error, Some(FetchError::HttpStatus(404)));
        assert!(!state.is_loading);
        transport.verify();
    }
}
