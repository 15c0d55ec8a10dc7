//! Failure taxonomy for resource fetches.

use thiserror::Error;

/// Ways a fetch attempt can fail.
///
/// All variants are caught at the `load()` boundary and recorded in
/// [`LoaderState::last_error`](crate::loader::LoaderState); none of them
/// reach the caller of `load()` as a returned error.
///
/// The type is `Clone` because it lives inside the state snapshot that the
/// loader publishes to every observer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// The retrieval could not complete (connectivity, timeout).
    #[error("network failure: {0}")]
    Network(String),

    /// The retrieval completed but returned a non-success status code.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// The body was retrieved but could not be decoded into the expected
    /// shape. Carries the decoder's field/position detail.
    #[error("decode failure: {0}")]
    Decode(String),
}
