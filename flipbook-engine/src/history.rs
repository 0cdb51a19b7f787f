//! Bounded linear undo/redo history over document snapshots.
//!
//! Every committed mutation appends a full-document snapshot; the active
//! document is always `history[cursor]`. Committing after an undo discards
//! the redo branch, and the ring evicts its oldest entry past capacity.

use std::collections::VecDeque;

use flipbook_core::Document;

/// Maximum number of retained snapshots.
pub const HISTORY_CAPACITY: usize = 50;

/// Linear snapshot history with a movable cursor.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Document>,
    cursor: usize,
    capacity: usize,
}

impl History {
    /// Create a history seeded with the initial document state.
    #[must_use]
    pub fn new(initial: Document) -> Self {
        Self::with_capacity(initial, HISTORY_CAPACITY)
    }

    /// Create a history with an explicit capacity (at least 1).
    #[must_use]
    pub fn with_capacity(initial: Document, capacity: usize) -> Self {
        let mut snapshots = VecDeque::new();
        snapshots.push_back(initial);
        Self {
            snapshots,
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// The active document snapshot.
    #[must_use]
    pub fn current(&self) -> &Document {
        // cursor is kept in bounds by every mutation.
        &self.snapshots[self.cursor]
    }

    /// Commit a new snapshot: truncate the redo branch, append, and evict
    /// the oldest entry when over capacity.
    pub fn commit(&mut self, document: Document) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(document);
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step the cursor back one snapshot. No-op at the start of history.
    ///
    /// Returns the newly active document, or `None` if nothing changed.
    pub fn undo(&mut self) -> Option<&Document> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step the cursor forward one snapshot. No-op at the end of history.
    ///
    /// Returns the newly active document, or `None` if nothing changed.
    pub fn redo(&mut self) -> Option<&Document> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    /// True if an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// True if a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: history holds at least the initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The configured capacity bound.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbook_core::{Page, PageKind};

    fn doc_with_pages(n: usize) -> Document {
        Document::from_pages((0..n).map(|_| Page::new(PageKind::Standard)).collect())
            .expect("non-empty")
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut history = History::new(doc_with_pages(1));
        assert!(history.undo().is_none());
        assert_eq!(history.current().page_count(), 1);
    }

    #[test]
    fn test_redo_at_end_is_noop() {
        let mut history = History::new(doc_with_pages(1));
        history.commit(doc_with_pages(2));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_undo_then_redo_restores_exact_state() {
        let mut history = History::new(doc_with_pages(1));
        history.commit(doc_with_pages(2));
        history.commit(doc_with_pages(3));
        history.commit(doc_with_pages(4));

        history.undo().expect("undo");
        let after_redo_target = history.current().clone();
        history.undo().expect("undo");
        history.redo().expect("redo");

        // Undo after 3 commits then redo once: exactly commit #2.
        assert_eq!(*history.current(), after_redo_target);
        assert_eq!(history.current().page_count(), 3);
    }

    #[test]
    fn test_commit_discards_redo_branch() {
        let mut history = History::new(doc_with_pages(1));
        history.commit(doc_with_pages(2));
        history.commit(doc_with_pages(3));
        history.undo().expect("undo");

        history.commit(doc_with_pages(5));
        assert!(!history.can_redo());
        assert_eq!(history.current().page_count(), 5);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::with_capacity(doc_with_pages(1), 5);
        for n in 2..=20 {
            history.commit(doc_with_pages(n));
        }
        assert_eq!(history.len(), 5);

        // Walk back as far as possible: capacity - 1 undos reach the oldest
        // retained snapshot (pages = 16), not anything older.
        let mut steps = 0;
        while history.undo().is_some() {
            steps += 1;
        }
        assert_eq!(steps, 4);
        assert_eq!(history.current().page_count(), 16);
    }

    #[test]
    fn test_current_tracks_cursor() {
        let mut history = History::new(doc_with_pages(1));
        history.commit(doc_with_pages(2));
        assert_eq!(history.current().page_count(), 2);
        history.undo().expect("undo");
        assert_eq!(history.current().page_count(), 1);
    }
}
