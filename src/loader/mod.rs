//! Generic engine for loading remote collections into observable state.
//!
//! This module provides the core building block for the crate: a typed
//! loader that owns a cached collection, serves `load()` requests, and
//! publishes every state transition to its observers.
//!
//! # Main Components
//!
//! - [`ResourceLoader`] - The engine task that owns the state and runs the
//!   load state machine.
//! - [`LoaderClient`] - The handle used to request loads and observe state.
//! - [`LoaderState`] - The observable snapshot (items, loading flag, last
//!   error).
//! - [`LoaderError`] - Plumbing errors (the loader task is gone).
//!
//! # Testing
//!
//! See [`mock`] for a scriptable fetch function to test the engine without
//! any transport.

pub mod core;
pub mod mock;
pub mod state;

// Re-export core types for convenience
pub use self::core::*;
pub use self::state::*;
