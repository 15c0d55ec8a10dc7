//! # Mock Fetch Function
//!
//! Utilities for testing the loader engine in isolation.
//!
//! [`MockCollection`] stands in for the real fetch function. Queue outcomes
//! with [`expect_fetch`](MockCollection::expect_fetch), optionally gate an
//! outcome to hold a fetch open (for coalescing and loading-flag tests),
//! and finish with [`verify`](MockCollection::verify).

use crate::fetch::{FetchCollection, FetchError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// One scripted fetch outcome.
enum Outcome<T> {
    Ready(Result<Vec<T>, FetchError>),
    /// Resolve only after the returned [`Notify`] handle fires.
    Gated {
        release: Arc<Notify>,
        result: Result<Vec<T>, FetchError>,
    },
    Panic(String),
}

/// A scriptable fetch function with expectation tracking.
///
/// Outcomes are consumed in FIFO order; a fetch with no queued outcome
/// panics the test. The handle is cheap to clone and all clones share the
/// same script and call counter, so a test can keep one clone for
/// assertions while the loader owns another.
///
/// # Example
/// ```ignore
/// let mock = MockCollection::new();
/// mock.expect_fetch().return_items(vec![1, 2, 3]);
/// mock.expect_fetch().return_err(FetchError::HttpStatus(500));
///
/// let (loader, client) = ResourceLoader::new(8, mock.clone());
/// // drive the loader ...
/// mock.verify(); // Ensures all outcomes were consumed
/// ```
pub struct MockCollection<T> {
    outcomes: Arc<Mutex<VecDeque<Outcome<T>>>>,
    calls: Arc<AtomicUsize>,
}

impl<T> Clone for MockCollection<T> {
    fn clone(&self) -> Self {
        Self {
            outcomes: Arc::clone(&self.outcomes),
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T: Send + Sync + 'static> MockCollection<T> {
    /// Creates a new mock with no scripted outcomes.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Expects one fetch call.
    pub fn expect_fetch(&self) -> FetchExpectationBuilder<T> {
        FetchExpectationBuilder {
            outcomes: self.outcomes.clone(),
        }
    }

    /// How many times the loader has called the fetch function.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Verifies that all scripted outcomes were consumed.
    pub fn verify(&self) {
        let outcomes = self.outcomes.lock().unwrap();
        if !outcomes.is_empty() {
            panic!("Not all expectations were met. {} remaining", outcomes.len());
        }
    }
}

/// Builder for fetch expectations.
pub struct FetchExpectationBuilder<T> {
    outcomes: Arc<Mutex<VecDeque<Outcome<T>>>>,
}

impl<T> FetchExpectationBuilder<T> {
    fn push(self, outcome: Outcome<T>) {
        let mut outcomes = self.outcomes.lock().unwrap();
        outcomes.push_back(outcome);
    }

    /// Resolve successfully with `items`.
    pub fn return_items(self, items: Vec<T>) {
        self.push(Outcome::Ready(Ok(items)));
    }

    /// Resolve with `error`.
    pub fn return_err(self, error: FetchError) {
        self.push(Outcome::Ready(Err(error)));
    }

    /// Hold the fetch open until the returned handle is notified, then
    /// resolve successfully with `items`.
    pub fn return_items_gated(self, items: Vec<T>) -> Arc<Notify> {
        let release = Arc::new(Notify::new());
        self.push(Outcome::Gated {
            release: Arc::clone(&release),
            result: Ok(items),
        });
        release
    }

    /// Panic inside the fetch, for exercising the engine's cleanup path.
    pub fn panic_with(self, message: impl Into<String>) {
        self.push(Outcome::Panic(message.into()));
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> FetchCollection<T> for MockCollection<T> {
    async fn fetch(&self) -> Result<Vec<T>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(Outcome::Ready(result)) => result,
            Some(Outcome::Gated { release, result }) => {
                release.notified().await;
                result
            }
            Some(Outcome::Panic(message)) => panic!("{message}"),
            None => panic!("unexpected fetch: no outcome queued"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn outcomes_resolve_in_fifo_order() {
        let mock = MockCollection::new();
        mock.expect_fetch().return_items(vec![1u32]);
        mock.expect_fetch().return_err(FetchError::HttpStatus(500));

        assert_eq!(mock.fetch().await.unwrap(), vec![1]);
        assert_eq!(mock.fetch().await.unwrap_err(), FetchError::HttpStatus(500));
        assert_eq!(mock.calls(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn gated_outcome_waits_for_release() {
        let mock = MockCollection::new();
        let release = mock.expect_fetch().return_items_gated(vec![7u32]);

        // Releasing before the fetch starts must not deadlock: the permit
        // is stored.
        release.notify_one();
        assert_eq!(mock.fetch().await.unwrap(), vec![7]);
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn verify_panics_on_unconsumed_outcome() {
        let mock: MockCollection<u32> = MockCollection::new();
        mock.expect_fetch().return_items(vec![]);
        mock.verify();
    }
}
