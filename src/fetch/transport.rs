//! The seam between the fetch layer and the network.
//!
//! Responses are described as plain data so the rest of the crate stays
//! deterministic and free of I/O dependencies: a [`Transport`] executes the
//! round-trip and hands back an [`HttpResponse`]; everything after that
//! (status checks, decoding) is pure.
//!
//! The crate ships no production transport. The host application implements
//! [`Transport`] over whatever HTTP client it already uses; tests use
//! [`MockTransport`](crate::fetch::MockTransport).

use async_trait::async_trait;
use thiserror::Error;

/// The round-trip itself could not complete (connection refused, DNS, ...).
///
/// A non-success status code is *not* a transport error; it comes back in
/// [`HttpResponse::status`] and is classified by the fetch layer.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// An HTTP response described as plain data.
///
/// All fields are owned so values can cross task boundaries freely.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// True for the 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes HTTP GET round-trips on behalf of the fetch layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET against `url` and return the status and raw body.
    ///
    /// Implementations must return `Ok` for *any* completed round-trip,
    /// whatever the status code; `Err` is reserved for failures where no
    /// response was obtained at all.
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        let ok = HttpResponse { status: 204, body: String::new() };
        assert!(ok.is_success());

        let redirect = HttpResponse { status: 301, body: String::new() };
        assert!(!redirect.is_success());

        let not_found = HttpResponse { status: 404, body: String::new() };
        assert!(!not_found.is_success());
    }
}
