//! External collaborators of the loader engine.
//!
//! The engine itself knows nothing about HTTP or JSON; this module does.
//!
//! # Main Components
//!
//! - [`Transport`] - The seam to the network: execute a GET, hand back
//!   status and raw body as plain data.
//! - [`RestCollection`] - The fetch function: GET a resource path under a
//!   base URL, demand a success status, decode the body as a JSON array.
//! - [`FetchError`] - The failure taxonomy recorded in the loader's state.
//!
//! # Testing
//!
//! See [`mock`] for a scriptable transport with fluent expectations.

pub mod error;
pub mod mock;
pub mod service;
pub mod transport;

// Re-export the layer's types for convenience
pub use error::FetchError;
pub use mock::MockTransport;
pub use service::{FetchCollection, RestCollection, DEFAULT_FETCH_TIMEOUT};
pub use transport::{HttpResponse, Transport, TransportError};
