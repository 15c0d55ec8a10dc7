//! # Core Loader Engine
//!
//! This module defines the generic building blocks for loading remote
//! collections.
//!
//! ## Key Types
//!
//! - [`ResourceLoader`]: The engine task that owns the state and runs the
//!   load state machine.
//! - [`LoaderClient`]: The handle for requesting loads and observing state.
//! - [`LoaderError`]: Plumbing errors (e.g., LoaderClosed).

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::fetch::FetchCollection;
use crate::loader::state::LoaderState;

// =============================================================================
// 1. THE MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur in the loader plumbing itself.
///
/// # Architecture Note
/// Fetch failures are deliberately *not* part of this type. A failed fetch
/// is a terminal outcome of a load, reported through
/// [`LoaderState::last_error`]; `load()` only returns an error when the
/// loader task itself is gone and no outcome will ever arrive.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum LoaderError {
    #[error("Loader closed")]
    Closed,
    #[error("Loader dropped response channel")]
    Dropped,
}

/// Acknowledgement channel for a load request.
///
/// Carries no payload: completion is the signal, the outcome travels
/// through the published state.
pub type Response = oneshot::Sender<()>;

/// Internal message type sent to the loader to request operations.
///
/// The loader is resource-oriented but read-only: the single lifecycle
/// operation is refreshing the cached collection from the remote source.
#[derive(Debug)]
pub enum LoaderRequest {
    Load { respond_to: Response },
}

// =============================================================================
// 2. THE GENERIC LOADER
// =============================================================================

/// The engine that loads a remote collection into observable state.
///
/// # Architecture Note
/// This struct is the "Server" half of the loader. It owns the state and
/// the receiver end of the request channel.
///
/// **Concurrency Model**:
/// The loader processes its channel in a loop inside its own task, so the
/// state needs no `Mutex` or `RwLock` - exclusive ownership within the task
/// gives us safety. While a fetch is in flight the loop keeps draining the
/// channel, but only to *join* new requests to that fetch: at most one
/// fetch is outstanding at any time, and every joined caller completes with
/// its terminal outcome.
///
/// **State Machine**:
/// `Idle → Loading → {Loaded, Failed} → Idle`. Each transition is one
/// atomic publication on a `watch` channel; observers always see whole
/// snapshots. The loading flag is lowered on *every* exit path - the
/// terminal publications carry it, and a drop guard covers the case where
/// the fetch function panics.
pub struct ResourceLoader<T> {
    receiver: mpsc::Receiver<LoaderRequest>,
    state: watch::Sender<LoaderState<T>>,
    fetcher: Arc<dyn FetchCollection<T>>,
}

impl<T: Send + Sync + 'static> ResourceLoader<T> {
    pub fn new(buffer_size: usize, fetcher: impl FetchCollection<T>) -> (Self, LoaderClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (state_tx, state_rx) = watch::channel(LoaderState::default());
        let loader = Self {
            receiver,
            state: state_tx,
            fetcher: Arc::new(fetcher),
        };
        let client = LoaderClient {
            sender,
            state: state_rx,
        };
        (loader, client)
    }

    /// Runs the loader's event loop, processing requests until the channel
    /// closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "User" instead of "loader_recipe::model::user::User")
        let resource_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(resource_type, "Loader started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LoaderRequest::Load { respond_to } => {
                    self.serve_load(resource_type, respond_to).await;
                }
            }
        }

        info!(resource_type, count = self.state.borrow().items.len(), "Shutdown");
    }

    /// One full load cycle: raise the flag, fetch, publish the terminal
    /// outcome, acknowledge every caller that joined along the way.
    async fn serve_load(&mut self, resource_type: &'static str, respond_to: Response) {
        debug!(resource_type, "Load");
        let mut waiters = vec![respond_to];

        // Entering Loading clears the previous error in the same atomic
        // publication that raises the flag.
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.last_error = None;
        });

        // Covers the panic exit path; the terminal publications below
        // already lower the flag and defuse it.
        let mut guard = ClearLoading::arm(&self.state);

        let fetcher = Arc::clone(&self.fetcher);
        let fetch = async move { fetcher.fetch().await };
        tokio::pin!(fetch);

        let mut draining = true;
        let outcome = loop {
            tokio::select! {
                result = &mut fetch => break result,
                msg = self.receiver.recv(), if draining => match msg {
                    Some(LoaderRequest::Load { respond_to }) => {
                        // A load issued while a fetch is in flight joins it
                        // instead of racing it.
                        debug!(resource_type, waiters = waiters.len() + 1, "Joined in-flight load");
                        waiters.push(respond_to);
                    }
                    None => draining = false,
                },
            }
        };

        match outcome {
            Ok(items) => {
                info!(resource_type, count = items.len(), "Loaded");
                self.state.send_modify(|s| {
                    s.items = Arc::new(items);
                    s.is_loading = false;
                    s.last_error = None;
                });
            }
            Err(e) => {
                warn!(resource_type, error = %e, "Load failed");
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.last_error = Some(e);
                });
            }
        }
        guard.defuse();

        for waiter in waiters {
            let _ = waiter.send(());
        }
    }
}

/// Lowers the loading flag when dropped, unless defused first.
///
/// Armed for the duration of a load cycle so that an unwinding fetch still
/// leaves observers with `is_loading == false`.
struct ClearLoading<'a, T> {
    state: &'a watch::Sender<LoaderState<T>>,
    armed: bool,
}

impl<'a, T> ClearLoading<'a, T> {
    fn arm(state: &'a watch::Sender<LoaderState<T>>) -> Self {
        Self { state, armed: true }
    }

    fn defuse(&mut self) {
        self.armed = false;
    }
}

impl<T> Drop for ClearLoading<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_modify(|s| s.is_loading = false);
        }
    }
}

// =============================================================================
// 3. THE GENERIC CLIENT
// =============================================================================

/// Handle for interacting with a [`ResourceLoader`].
///
/// Cheap to clone; all clones address the same loader.
pub struct LoaderClient<T> {
    sender: mpsc::Sender<LoaderRequest>,
    state: watch::Receiver<LoaderState<T>>,
}

impl<T> Clone for LoaderClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T> LoaderClient<T> {
    /// Ask the loader to refresh its collection and wait for the terminal
    /// outcome.
    ///
    /// The outcome itself - fresh items or a recorded failure - lands in
    /// the observable state; only plumbing failures are returned here.
    pub async fn load(&self) -> Result<(), LoaderError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LoaderRequest::Load { respond_to })
            .await
            .map_err(|_| LoaderError::Closed)?;
        response.await.map_err(|_| LoaderError::Dropped)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LoaderState<T> {
        self.state.borrow().clone()
    }

    /// Subscription handle for reactive observers.
    ///
    /// The receiver yields whole snapshots; a slow observer sees the latest
    /// state, not every intermediate one.
    pub fn subscribe(&self) -> watch::Receiver<LoaderState<T>> {
        self.state.clone()
    }
}

// =============================================================================
// 4. EXAMPLE USAGE (Test)
// =============================================================================
