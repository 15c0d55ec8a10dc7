//! # Mock Transport
//!
//! Utilities for testing the fetch layer in isolation.
//!
//! Use [`MockTransport::new`] to get a transport handle, queue responses
//! with [`expect_get`](MockTransport::expect_get), and finish with
//! [`verify`](MockTransport::verify) to assert every expectation was
//! consumed.

use crate::fetch::transport::{HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// What a queued expectation replies with.
enum Reply {
    Status(u16, String),
    Fail(String),
    /// Never reply. Pairs with a paused-clock test to exercise timeouts.
    Hang,
}

/// A GET the transport expects to receive, matched by path suffix.
struct GetExpectation {
    path: String,
    reply: Reply,
}

/// A scriptable [`Transport`] with expectation tracking for fluent testing.
///
/// Expectations are consumed in FIFO order; an unexpected request, or a
/// request whose URL does not end with the expected path, panics the test.
///
/// # Example
/// ```ignore
/// let transport = MockTransport::new();
/// transport.expect_get("/users").return_status(200, r#"[]"#);
///
/// // hand Arc::new(transport.clone()) to the code under test ...
/// transport.verify(); // Ensures all expectations were met
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<GetExpectation>>>,
}

impl MockTransport {
    /// Creates a new mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a GET for `path` (matched as a suffix of the full URL).
    pub fn expect_get(&self, path: impl Into<String>) -> GetExpectationBuilder {
        GetExpectationBuilder {
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(exp) => {
                assert!(
                    url.ends_with(&exp.path),
                    "unexpected GET {url}, expected path {}",
                    exp.path
                );
                match exp.reply {
                    Reply::Status(status, body) => Ok(HttpResponse { status, body }),
                    Reply::Fail(reason) => Err(TransportError(reason)),
                    Reply::Hang => {
                        std::future::pending::<()>().await;
                        unreachable!()
                    }
                }
            }
            None => panic!("unexpected GET {url}: no expectation queued"),
        }
    }
}

/// Builder for GET expectations.
pub struct GetExpectationBuilder {
    path: String,
    expectations: Arc<Mutex<VecDeque<GetExpectation>>>,
}

impl GetExpectationBuilder {
    fn push(self, reply: Reply) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(GetExpectation { path: self.path, reply });
    }

    /// Reply with `status` and `body`.
    pub fn return_status(self, status: u16, body: impl Into<String>) {
        self.push(Reply::Status(status, body.into()));
    }

    /// Reply with 200 and `body`.
    pub fn return_json(self, body: impl Into<String>) {
        self.push(Reply::Status(200, body.into()));
    }

    /// Fail the round-trip before any response is obtained.
    pub fn fail(self, reason: impl Into<String>) {
        self.push(Reply::Fail(reason.into()));
    }

    /// Never reply. The caller's timeout is expected to fire.
    pub fn hang(self) {
        self.push(Reply::Hang);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_fifo_order() {
        let transport = MockTransport::new();
        transport.expect_get("/users").return_json("[]");
        transport.expect_get("/users").return_status(500, "oops");

        let first = transport.get("http://host/users").await.unwrap();
        assert_eq!(first.status, 200);

        let second = transport.get("http://host/users").await.unwrap();
        assert_eq!(second.status, 500);
        assert_eq!(second.body, "oops");

        transport.verify();
    }

    #[tokio::test]
    async fn reports_transport_failure() {
        let transport = MockTransport::new();
        transport.expect_get("/users").fail("connection refused");

        let err = transport.get("http://host/users").await.unwrap_err();
        assert_eq!(err, TransportError("connection refused".to_string()));
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn verify_panics_on_unmet_expectation() {
        let transport = MockTransport::new();
        transport.expect_get("/users").return_json("[]");
        transport.verify();
    }
}
