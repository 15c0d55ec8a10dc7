//! The observable state of a loader.

use std::sync::Arc;

use crate::fetch::FetchError;

/// Snapshot of a loader's observable state.
///
/// The loader publishes a whole new snapshot on every transition, so an
/// observer always sees a consistent view: `items` never changes within a
/// snapshot that still reads `is_loading == true`, and a failed load leaves
/// the previous `items` in place next to its `last_error`.
///
/// `items` sits behind an `Arc` so snapshots are cheap to clone and the
/// replacement on a successful load is a single pointer swap inside the
/// published value.
#[derive(Debug)]
pub struct LoaderState<T> {
    /// Cached collection, in server response order. Replaced wholesale on
    /// each successful load, never patched incrementally.
    pub items: Arc<Vec<T>>,

    /// True strictly between load initiation and its terminal outcome;
    /// false at all other times, including before the first load and after
    /// any failure.
    pub is_loading: bool,

    /// Failure reason of the most recent attempt; cleared when a new
    /// attempt starts.
    pub last_error: Option<FetchError>,
}

impl<T> Default for LoaderState<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            is_loading: false,
            last_error: None,
        }
    }
}

// Hand-written so snapshots clone without requiring `T: Clone`; the items
// are shared, not copied.
impl<T> Clone for LoaderState<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            is_loading: self.is_loading,
            last_error: self.last_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_empty() {
        let state: LoaderState<u32> = LoaderState::default();
        assert!(state.items.is_empty());
        assert!(!state.is_loading);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn clones_share_the_items() {
        let state = LoaderState {
            items: Arc::new(vec![1, 2, 3]),
            is_loading: false,
            last_error: None,
        };
        let copy = state.clone();
        assert!(Arc::ptr_eq(&state.items, &copy.items));
    }
}
