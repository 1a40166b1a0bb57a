use std::collections::BTreeSet;

use super::{Edit, Tracker};
use crate::error::{Error, Result};
use crate::page_range::expand_page_ranges;

/// Set of one-based pages picked for extraction.
#[derive(Debug, Default, Clone)]
pub struct SelectionTracker {
    total_pages: u32,
    selected: BTreeSet<u32>,
    loaded: bool,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, page: u32, selected: bool) {
        if !self.loaded || page == 0 || page > self.total_pages {
            return;
        }
        if selected {
            self.selected.insert(page);
        } else {
            self.selected.remove(&page);
        }
    }

    pub fn select_all(&mut self) {
        for page in 1..=self.total_pages {
            self.toggle(page, true);
        }
    }

    pub fn deselect_all(&mut self) {
        let selected: Vec<u32> = self.selected.iter().copied().collect();
        for page in selected {
            self.toggle(page, false);
        }
    }

    /// Select every page named by a range string such as "1-3,7".
    ///
    /// The whole string is validated before anything is selected.
    pub fn select_ranges(&mut self, spec: &str) -> Result<()> {
        if !self.loaded {
            return Err(Error::NoDocument);
        }
        let pages = expand_page_ranges(spec, self.total_pages)?;
        for page in pages {
            self.toggle(page, true);
        }
        Ok(())
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, page: u32) -> bool {
        self.selected.contains(&page)
    }
}

impl Tracker for SelectionTracker {
    fn initialize(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
        self.selected.clear();
        self.loaded = true;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn total_pages(&self) -> u32 {
        self.total_pages
    }

    fn apply(&mut self, edit: &Edit) -> bool {
        match *edit {
            Edit::Toggle { page, selected } => self.toggle(page, selected),
            Edit::SelectAll => self.select_all(),
            Edit::DeselectAll => self.deselect_all(),
            Edit::Move { .. } | Edit::Reset | Edit::Reverse => return false,
        }
        true
    }

    fn build_submission(&self) -> Result<Vec<u32>> {
        if self.selected.is_empty() {
            return Err(Error::EmptySelection);
        }
        Ok(self.selected.iter().copied().collect())
    }
}
