//! The fetch function: retrieve a REST collection and decode it.
//!
//! [`RestCollection`] binds together everything the engine treats as opaque:
//! the resource URL, the injected [`Transport`], a bounded timeout, and the
//! JSON decoding of the body into typed records. The engine only sees the
//! [`FetchCollection`] trait.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::fetch::error::FetchError;
use crate::fetch::transport::Transport;

/// Upper bound on a single fetch round-trip.
///
/// The source of truth for "how long is too long" is the transport's own
/// deadline when it has one; this bound catches transports that have none.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The fetch function consumed by the loader engine.
///
/// One call performs one complete retrieval: network round-trip plus decode
/// into an ordered sequence of records. Implementations must not cache;
/// the engine owns the cache.
#[async_trait]
pub trait FetchCollection<T>: Send + Sync + 'static {
    async fn fetch(&self) -> Result<Vec<T>, FetchError>;
}

/// Fetches a collection of `T` from a REST endpoint.
///
/// Performs a GET against `base_url` + `path` through the injected
/// transport, demands a 2xx status, and decodes the body as a JSON array of
/// records. Record order in the result is the server's response order.
pub struct RestCollection<T> {
    url: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RestCollection<T> {
    pub fn new(base_url: &str, path: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            url: format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            timeout: DEFAULT_FETCH_TIMEOUT,
            transport,
            _marker: PhantomData,
        }
    }

    /// Replace the default round-trip bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The full resource URL this collection fetches from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<T> FetchCollection<T> for RestCollection<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn fetch(&self) -> Result<Vec<T>, FetchError> {
        debug!(url = %self.url, "GET");

        let response = tokio::time::timeout(self.timeout, self.transport.get(&self.url))
            .await
            .map_err(|_| {
                FetchError::Network(format!("timed out after {:?}", self.timeout))
            })?
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.is_success() {
            warn!(url = %self.url, status = response.status, "Non-success status");
            return Err(FetchError::HttpStatus(response.status));
        }

        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::mock::MockTransport;
    use crate::model::User;

    fn collection(transport: &MockTransport) -> RestCollection<User> {
        RestCollection::new("http://localhost:3000", "/users", Arc::new(transport.clone()))
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let transport = MockTransport::new();
        let c: RestCollection<User> =
            RestCollection::new("http://localhost:3000/", "users", Arc::new(transport));
        assert_eq!(c.url(), "http://localhost:3000/users");
    }

    #[tokio::test]
    async fn decodes_records_in_server_order() {
        let transport = MockTransport::new();
        transport.expect_get("/users").return_json(
            r#"[
                {"id":2,"name":"Bea","email":"b@x.com"},
                {"id":1,"name":"Ann","email":"a@x.com"}
            ]"#,
        );

        let users = collection(&transport).fetch().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0], User::new(2, "Bea", "b@x.com"));
        assert_eq!(users[1], User::new(1, "Ann", "a@x.com"));
        transport.verify();
    }

    #[tokio::test]
    async fn empty_array_is_a_successful_empty_collection() {
        let transport = MockTransport::new();
        transport.expect_get("/users").return_json("[]");

        let users = collection(&transport).fetch().await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_maps_to_http_status() {
        let transport = MockTransport::new();
        transport.expect_get("/users").return_status(404, "not here");

        let err = collection(&transport).fetch().await.unwrap_err();
        assert_eq!(err, FetchError::HttpStatus(404));
    }

    #[tokio::test]
    async fn transport_failure_maps_to_network() {
        let transport = MockTransport::new();
        transport.expect_get("/users").fail("connection refused");

        let err = collection(&transport).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(ref reason) if reason == "connection refused"));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_decode() {
        let transport = MockTransport::new();
        transport.expect_get("/users").return_json("not json");

        let err = collection(&transport).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn missing_field_maps_to_decode_with_field_detail() {
        let transport = MockTransport::new();
        transport
            .expect_get("/users")
            .return_json(r#"[{"id":1,"name":"Ann"}]"#);

        let err = collection(&transport).fetch().await.unwrap_err();
        match err {
            FetchError::Decode(detail) => assert!(detail.contains("email"), "detail: {detail}"),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn unresponsive_transport_times_out_as_network() {
        let transport = MockTransport::new();
        transport.expect_get("/users").hang();

        let err = collection(&transport)
            .with_timeout(Duration::from_secs(1))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(ref reason) if reason.contains("timed out")));
    }
}
