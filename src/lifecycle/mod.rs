//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for managing the application's
//! runtime environment, including:
//!
//! - **Loader lifecycle management**: Starting, wiring, and shutting down
//!   loader tasks
//! - **Configuration**: The explicit, constructor-injected settings surface
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`CatalogSystem`] - The orchestrator that owns all loader tasks and
//!   their shared transport wiring
//! - [`CatalogConfig`] - Base URL and fetch timeout
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod system;
pub mod tracing;

pub use self::system::*;
pub use self::tracing::*;
