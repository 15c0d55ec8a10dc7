#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Loader Recipe
//!
//! > **A Recipe for Reactive Remote Resources in Rust.**
//!
//! This crate demonstrates a pattern for loading remote REST collections into
//! observable local state using Tokio. It distills the service / controller
//! split popular in mobile app architectures into a single reusable component:
//! a **typed resource loader** that fetches a collection, tracks a loading
//! flag, and replaces its cache atomically.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why a generic loader?
//!
//! Every screen that talks to a REST API repeats the same dance:
//! - Raise a loading flag.
//! - Fetch and decode a collection.
//! - Swap the cached list on success, record the failure otherwise.
//! - Lower the loading flag, **no matter what happened**.
//!
//! We wrote that dance **once**, as [`ResourceLoader<T>`](loader::ResourceLoader),
//! and it works for Users, Products, and anything else that decodes from a
//! JSON array.
//!
//! ## 🚀 Core Concepts
//!
//! ### Generics: The Power of `T`
//! You'll see `ResourceLoader<T>` everywhere. This means "I can load *any*
//! collection, as long as its records deserialize from JSON."
//! -   **Benefit**: The state machine, the coalescing logic, and the cleanup
//!     guarantee are written once and shared by every resource type.
//! -   **Trade-off**: The engine looks more abstract than a hand-rolled
//!     per-screen controller, but it eliminates an entire class of
//!     copy-paste bugs (most commonly: a forgotten flag reset on the error
//!     path).
//!
//! ### One fetch at a time
//! Calls to `load()` issued while a fetch is already in flight **join** that
//! fetch instead of racing it. One request goes out; every waiting caller
//! observes the same terminal outcome.
//!
//! ### The cleanup guarantee
//! The loading flag is cleared on every exit path: success, empty result,
//! failure, even a panic inside the fetch function. A drop guard enforces
//! this; the happy paths publish terminal states that already carry the
//! lowered flag and defuse the guard.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Fetch failures form a small taxonomy ([`FetchError`](fetch::FetchError)):
//! network, unexpected status, decode. They never escape `load()` as a
//! returned error; they land in the observable state where the UI layer can
//! render them. Plumbing failures (the loader task is gone) are a separate
//! type ([`LoaderError`](loader::LoaderError)) so callers can pattern match
//! on what actually went wrong.
//!
//! ### 2. Explicit Dependency Injection
//! There is no ambient registry. The HTTP transport is a trait object passed
//! down by constructor: [`CatalogSystem`](lifecycle::CatalogSystem) → typed
//! loaders → [`RestCollection`](fetch::RestCollection). Tests inject
//! [`MockTransport`](fetch::MockTransport) the same way production code
//! would inject a real transport.
//!
//! ### 3. Concurrency Model
//! Each `ResourceLoader` runs in its own Tokio task and processes requests
//! from a channel (no locks for its state!). Observers read the state through
//! a `watch` channel, which replaces the whole snapshot atomically - nobody
//! ever sees a half-updated collection.
//!
//! ### 4. Observability
//! We use `tracing` everywhere with structured logging. Loaders log their
//! lifecycle and every load outcome with the resource type and item counts.
//! See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! The codebase is organized into four main layers. Here is your map:
//!
//! ### 1. The Engine ([`loader`])
//! This is the core of the system. It defines the generic `ResourceLoader<T>`
//! that powers everything.
//! - **Role**: Owns the observable state and the load state machine;
//!   separates *what* is fetched (your fetch function) from *how* loading
//!   behaves (flags, coalescing, cleanup).
//! - **Key items**: [`ResourceLoader`](loader::ResourceLoader),
//!   [`LoaderClient`](loader::LoaderClient),
//!   [`LoaderState`](loader::LoaderState).
//!
//! ### 2. The Collaborators ([`fetch`])
//! The loader does not know HTTP or JSON; this layer does.
//! - **Role**: The transport seam, the REST fetch function, and the failure
//!   taxonomy.
//! - **Key items**: [`Transport`](fetch::Transport),
//!   [`RestCollection`](fetch::RestCollection),
//!   [`FetchError`](fetch::FetchError).
//!
//! ### 3. The Interface ([`clients`])
//! We don't expose raw generic plumbing to the rest of the app.
//! - **Role**: Wraps the generic `LoaderClient` in domain-specific loaders
//!   with fixed resource paths.
//! - **Key items**: [`UserLoader`](clients::UserLoader),
//!   [`ProductLoader`](clients::ProductLoader).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! Loaders don't exist in a vacuum. The lifecycle module handles this.
//! - **Role**: Spawns loader tasks, wires the shared transport, and shuts
//!   everything down.
//! - **Key items**: [`CatalogSystem`](lifecycle::CatalogSystem),
//!   [`shutdown`](lifecycle::CatalogSystem::shutdown).
//!
//! The record types themselves live in [`model`].
//!
//! ## 🚀 Quick Start
//!
//! ```ignore
//! let config = CatalogConfig::new("https://api.example.com");
//! let system = CatalogSystem::new(config, transport);
//!
//! system.user_loader.load().await?;
//! for user in system.user_loader.state().items.iter() {
//!     println!("{}", user.name);
//! }
//!
//! system.shutdown().await?;
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod fetch;
pub mod lifecycle;
pub mod loader;
pub mod model;
