//! # Observability & Tracing
//!
//! This module provides the tracing infrastructure for the loader system.
//!
//! ## Overview
//!
//! The [`setup_tracing`] function initializes structured logging with the
//! `tracing` crate. Loaders log their lifecycle and every load outcome with
//! structured fields, so the full history of a collection is visible from
//! the log alone.
//!
//! ## What Gets Traced
//!
//! - **Loader Lifecycle**: Startup, shutdown, and final cache size
//! - **Load Outcomes**: `Loaded` with the item count, `Load failed` with the
//!   recorded error
//! - **Coalescing**: Requests joining an in-flight fetch, with the waiter
//!   count
//! - **Fetch Layer**: The GET target at debug level, non-success statuses at
//!   warn
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show fetch targets and joined requests
//! RUST_LOG=debug cargo run
//!
//! # Filter to the engine only
//! RUST_LOG=loader_recipe::loader=debug cargo run
//! ```
//!
//! ## Load Trace Example
//!
//! **With `RUST_LOG=info`** (compact):
//!
//! ```text
//! INFO Loader started resource_type="User"
//! INFO Loaded resource_type="User" count=3
//! WARN Load failed resource_type="Product" error=unexpected HTTP status 404
//! INFO Shutdown resource_type="User" count=3
//! ```
//!
//! **With `RUST_LOG=debug`** (detailed):
//!
//! ```text
//! DEBUG Load resource_type="User"
//! DEBUG GET url=https://api.example.com/users
//! DEBUG Joined in-flight load resource_type="User" waiters=2
//! INFO Loaded resource_type="User" count=3
//! ```
//!
//! The compact format hides the crate/module prefix (`with_target(false)`);
//! the `resource_type` field carries the context instead.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use resource_type instead
        .compact()
        .init();
}
