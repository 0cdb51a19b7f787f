//! The document - the full ordered page list.
//!
//! The document is the unit of undo/redo snapshotting and the input to the
//! structure derivation in `flipbook-engine`.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};
use crate::error::{CoreError, CoreResult};
use crate::page::{Page, PageId, PageKind};

/// Maximum number of table-of-contents entries shown per summary page.
pub const MAX_TOC_ITEMS_PER_PAGE: usize = 22;

/// The full ordered list of pages.
///
/// Invariant: never empty. Cover is first when present, back cover last
/// when present, summary pages are contiguous after the cover/white prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    /// Create a document with a single empty standard page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pages: vec![Page::new(PageKind::Standard)],
        }
    }

    /// Create a document from an existing page list.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyDocument`] if the list is empty.
    pub fn from_pages(pages: Vec<Page>) -> CoreResult<Self> {
        if pages.is_empty() {
            return Err(CoreError::EmptyDocument);
        }
        Ok(Self { pages })
    }

    /// Pages in document order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by ID.
    #[must_use]
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// Get a mutable reference to a page by ID.
    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    /// Index of a page in document order.
    #[must_use]
    pub fn page_index(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    /// Index of the back cover page, if one exists.
    #[must_use]
    pub fn back_cover_index(&self) -> Option<usize> {
        self.pages.iter().position(|p| p.kind == PageKind::BackCover)
    }

    /// Clamp an insertion index so it never lands at or past the back cover.
    #[must_use]
    pub fn clamped_insert_index(&self, index: usize) -> usize {
        let limit = self.back_cover_index().unwrap_or(self.pages.len());
        index.min(limit)
    }

    /// Insert a page at the given index (no back-cover clamping applied).
    ///
    /// # Panics
    ///
    /// Panics if `index > page_count()`.
    pub fn insert_page_at(&mut self, index: usize, page: Page) {
        tracing::debug!(index, page = %page.id, "inserting page");
        self.pages.insert(index, page);
    }

    /// Insert a page immediately after another, clamped so it never lands
    /// after the back cover. Returns the actual insertion index.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PageNotFound`] if `after` is not in the document.
    pub fn insert_page_after(&mut self, after: PageId, page: Page) -> CoreResult<usize> {
        let index = self
            .page_index(after)
            .ok_or_else(|| CoreError::PageNotFound(after.to_string()))?;
        let index = self.clamped_insert_index(index + 1);
        self.insert_page_at(index, page);
        Ok(index)
    }

    /// Remove a page by ID.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LastPage`] if it is the only page, or
    /// [`CoreError::PageNotFound`] if the ID is unknown. State is unchanged
    /// on error.
    pub fn remove_page(&mut self, id: PageId) -> CoreResult<Page> {
        let index = self
            .page_index(id)
            .ok_or_else(|| CoreError::PageNotFound(id.to_string()))?;
        if self.pages.len() == 1 {
            return Err(CoreError::LastPage);
        }
        tracing::debug!(index, page = %id, "removing page");
        Ok(self.pages.remove(index))
    }

    /// Indices of all summary pages, in document order.
    #[must_use]
    pub fn summary_indices(&self) -> Vec<usize> {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind.is_summary())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of summary pages.
    #[must_use]
    pub fn summary_count(&self) -> usize {
        self.pages.iter().filter(|p| p.kind.is_summary()).count()
    }

    /// Index where the first summary page belongs: immediately after the
    /// contiguous cover/white prefix.
    #[must_use]
    pub fn summary_insert_index(&self) -> usize {
        self.pages
            .iter()
            .take_while(|p| matches!(p.kind, PageKind::Cover | PageKind::White))
            .count()
    }

    /// 1-based ordinal of a standard page among standard pages, or `None`
    /// for non-standard pages. Non-standard pages do not consume a number.
    #[must_use]
    pub fn standard_ordinal(&self, id: PageId) -> Option<usize> {
        let mut ordinal = 0;
        for page in &self.pages {
            if page.kind.is_standard() {
                ordinal += 1;
                if page.id == id {
                    return Some(ordinal);
                }
            } else if page.id == id {
                return None;
            }
        }
        None
    }

    /// Find an element anywhere in the document, returning its page and a
    /// reference to it.
    #[must_use]
    pub fn find_element(&self, id: ElementId) -> Option<(&Page, &Element)> {
        self.pages
            .iter()
            .find_map(|p| p.element(id).map(|e| (p, e)))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
