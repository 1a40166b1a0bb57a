//! Page selection and page order state for one loaded document.
//!
//! Trackers hold no I/O. They are driven through [`Flow`], which adds the
//! submission lifecycle on top.

pub mod flow;
pub mod order;
pub mod selection;

pub use flow::{Event, Flow, Phase};
pub use order::OrderTracker;
pub use selection::SelectionTracker;

use crate::error::Result;

/// A user-driven mutation of tracker state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Check or uncheck a one-based page (extract flow).
    Toggle { page: u32, selected: bool },
    SelectAll,
    DeselectAll,
    /// Move the page at one zero-based position to another (reorder flow).
    Move { from: usize, to: usize },
    Reset,
    Reverse,
}

pub trait Tracker {
    /// Forget any previous document and start over with `total_pages`.
    fn initialize(&mut self, total_pages: u32);

    /// Drop all state, as if no document was ever loaded.
    fn clear(&mut self);

    fn total_pages(&self) -> u32;

    /// Apply an edit. Returns `false` when the edit has no meaning for this
    /// tracker (for example a move on a selection).
    fn apply(&mut self, edit: &Edit) -> bool;

    /// The one-based page list sent to the service.
    fn build_submission(&self) -> Result<Vec<u32>>;

    fn is_submittable(&self) -> bool {
        self.build_submission().is_ok()
    }
}
