use super::{Edit, Tracker};
use crate::error::{Error, Result};

/// Proposed new page order for one document.
///
/// Both orders hold zero-based original page indices. `current_order` is
/// always a permutation of `original_order`; every mutation goes through
/// [`OrderTracker::move_page`] or rebuilds the vector from the original.
#[derive(Debug, Default, Clone)]
pub struct OrderTracker {
    original_order: Vec<u32>,
    current_order: Vec<u32>,
    is_modified: bool,
}

impl OrderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn original_order(&self) -> &[u32] {
        &self.original_order
    }

    pub fn current_order(&self) -> &[u32] {
        &self.current_order
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Remove the page at position `from` and reinsert it at `to`.
    pub fn move_page(&mut self, from: usize, to: usize) {
        let len = self.current_order.len();
        if from >= len || to >= len {
            return;
        }
        let page = self.current_order.remove(from);
        self.current_order.insert(to, page);
        self.refresh();
    }

    pub fn reset(&mut self) {
        self.current_order = self.original_order.clone();
        self.refresh();
    }

    pub fn reverse(&mut self) {
        self.current_order.reverse();
        self.refresh();
    }

    /// Rearrange into `pages`, a full one-based permutation such as
    /// `[3, 1, 2]`.
    pub fn apply_order(&mut self, pages: &[u32]) -> Result<()> {
        let total = self.current_order.len();
        if pages.len() != total {
            return Err(Error::invalid(format!(
                "Page order must list all {} pages, got {}",
                total,
                pages.len()
            )));
        }
        let mut seen = vec![false; total];
        for &page in pages {
            if page == 0 || page as usize > total {
                return Err(Error::invalid(format!(
                    "Page {} is out of range (1-{})",
                    page, total
                )));
            }
            if std::mem::replace(&mut seen[page as usize - 1], true) {
                return Err(Error::invalid(format!("Page {} listed twice", page)));
            }
        }

        for (target, &page) in pages.iter().enumerate() {
            let index = page - 1;
            if let Some(offset) = self.current_order[target..].iter().position(|&p| p == index) {
                self.move_page(target + offset, target);
            }
        }
        Ok(())
    }

    /// Number of positions holding a page other than their original one.
    pub fn moved_count(&self) -> usize {
        self.current_order
            .iter()
            .enumerate()
            .filter(|&(position, &index)| position as u32 != index)
            .count()
    }

    fn refresh(&mut self) {
        self.is_modified = self.current_order != self.original_order;
    }
}

impl Tracker for OrderTracker {
    fn initialize(&mut self, total_pages: u32) {
        self.original_order = (0..total_pages).collect();
        self.current_order = self.original_order.clone();
        self.is_modified = false;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn total_pages(&self) -> u32 {
        self.original_order.len() as u32
    }

    fn apply(&mut self, edit: &Edit) -> bool {
        match *edit {
            Edit::Move { from, to } => self.move_page(from, to),
            Edit::Reset => self.reset(),
            Edit::Reverse => self.reverse(),
            Edit::Toggle { .. } | Edit::SelectAll | Edit::DeselectAll => return false,
        }
        true
    }

    fn build_submission(&self) -> Result<Vec<u32>> {
        if !self.is_modified {
            return Err(Error::NoModification);
        }
        Ok(self.current_order.iter().map(|index| index + 1).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn loaded(total: u32) -> OrderTracker {
        let mut tracker = OrderTracker::new();
        tracker.initialize(total);
        tracker
    }

    fn is_permutation(order: &[u32], total: u32) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted == (0..total).collect::<Vec<_>>()
    }

    #[test]
    fn test_initialize() {
        let tracker = loaded(4);
        assert_eq!(tracker.current_order(), &[0, 1, 2, 3]);
        assert_eq!(tracker.current_order(), tracker.original_order());
        assert!(!tracker.is_modified());
    }

    #[test]
    fn test_move_first_to_last() {
        let mut tracker = loaded(4);
        tracker.move_page(0, 3);
        assert_eq!(tracker.current_order(), &[1, 2, 3, 0]);
        assert!(tracker.is_modified());
        assert_eq!(tracker.build_submission().unwrap(), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_move_out_of_range_is_ignored() {
        let mut tracker = loaded(3);
        tracker.move_page(0, 3);
        tracker.move_page(5, 0);
        assert_eq!(tracker.current_order(), &[0, 1, 2]);
        assert!(!tracker.is_modified());
    }

    #[test]
    fn test_move_back_clears_modified() {
        let mut tracker = loaded(3);
        tracker.move_page(0, 2);
        tracker.move_page(2, 0);
        assert!(!tracker.is_modified());
        assert!(matches!(
            tracker.build_submission(),
            Err(Error::NoModification)
        ));
    }

    #[test]
    fn test_reverse_single_page_is_unmodified() {
        let mut tracker = loaded(1);
        tracker.reverse();
        assert!(!tracker.is_modified());
    }

    #[test]
    fn test_empty_document() {
        let mut tracker = loaded(0);
        tracker.move_page(0, 0);
        tracker.reverse();
        assert!(tracker.current_order().is_empty());
        assert!(!tracker.is_modified());
    }

    #[test]
    fn test_moved_count() {
        let mut tracker = loaded(5);
        tracker.move_page(0, 1);
        assert_eq!(tracker.moved_count(), 2);
        tracker.reverse();
        // [4,3,2,0,1] keeps nothing in place except index 2
        assert_eq!(tracker.moved_count(), 4);
    }

    #[test]
    fn test_apply_order() {
        let mut tracker = loaded(4);
        tracker.apply_order(&[3, 1, 4, 2]).unwrap();
        assert_eq!(tracker.build_submission().unwrap(), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_apply_order_rejects_non_permutations() {
        let mut tracker = loaded(3);
        assert!(tracker.apply_order(&[1, 2]).is_err());
        assert!(tracker.apply_order(&[1, 1, 2]).is_err());
        assert!(tracker.apply_order(&[1, 2, 4]).is_err());
        assert!(!tracker.is_modified());
    }

    proptest! {
        #[test]
        fn prop_moves_keep_permutation(
            total in 0u32..20,
            moves in prop::collection::vec((0usize..25, 0usize..25), 0..40),
        ) {
            let mut tracker = loaded(total);
            for (from, to) in moves {
                tracker.move_page(from, to);
                prop_assert!(is_permutation(tracker.current_order(), total));
                prop_assert_eq!(
                    tracker.is_modified(),
                    tracker.current_order() != tracker.original_order()
                );
            }
        }

        #[test]
        fn prop_reverse_is_involution(
            total in 0u32..20,
            moves in prop::collection::vec((0usize..20, 0usize..20), 0..10),
        ) {
            let mut tracker = loaded(total);
            for (from, to) in moves {
                tracker.move_page(from, to);
            }
            let before = tracker.current_order().to_vec();
            tracker.reverse();
            tracker.reverse();
            prop_assert_eq!(tracker.current_order(), before.as_slice());
        }

        #[test]
        fn prop_reset_clears_modified(
            total in 0u32..20,
            moves in prop::collection::vec((0usize..20, 0usize..20), 0..10),
            reversed in any::<bool>(),
        ) {
            let mut tracker = loaded(total);
            for (from, to) in moves {
                tracker.move_page(from, to);
            }
            if reversed {
                tracker.reverse();
            }
            tracker.reset();
            prop_assert!(!tracker.is_modified());
            prop_assert_eq!(tracker.current_order(), tracker.original_order());
        }
    }
}
