//! Summary page reconciliation.
//!
//! Summary pages are derived-but-committed state: their count follows
//! `ceil(toc_len / MAX_TOC_ITEMS_PER_PAGE)` (floored at one while the
//! feature is on), but they are real pages that export and numbering must
//! see, so changes go through the same commit path as user edits.
//!
//! Reconciliation is an explicit two-step: [`summary_plan`] compares the
//! desired count against the document, [`apply_summary_plan`] performs the
//! splice. Zero existing summary pages means the feature is off and the
//! plan is always [`SummaryPlan::Keep`].

use flipbook_core::{
    Document, Element, ElementKind, Page, PageId, PageKind, Rect, BOTTOM_MARGIN,
    MAX_TOC_ITEMS_PER_PAGE, PAGE_HEIGHT, PAGE_WIDTH, SIDE_MARGIN, TOP_MARGIN,
};

/// The reconciliation decision for the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryPlan {
    /// Counts already match (or the feature is disabled).
    Keep,
    /// Append this many new summary pages at the given index.
    Insert {
        /// Insertion index in the page list (immediately after the last
        /// existing summary page).
        at: usize,
        /// Number of pages to insert.
        count: usize,
    },
    /// Remove these trailing summary pages, keeping the earliest ones.
    RemoveTrailing {
        /// IDs of the pages to remove, in document order.
        page_ids: Vec<PageId>,
    },
}

/// Number of summary pages required for a TOC of the given length.
///
/// Zero when the feature is disabled; otherwise at least one page even for
/// an empty TOC.
#[must_use]
pub fn required_summary_pages(toc_len: usize, feature_enabled: bool) -> usize {
    if !feature_enabled {
        return 0;
    }
    toc_len.div_ceil(MAX_TOC_ITEMS_PER_PAGE).max(1)
}

/// Compare the document's summary pages against the derived TOC length.
#[must_use]
pub fn summary_plan(document: &Document, toc_len: usize) -> SummaryPlan {
    let current = document.summary_indices();
    if current.is_empty() {
        // Feature disabled; nothing to reconcile.
        return SummaryPlan::Keep;
    }

    let required = required_summary_pages(toc_len, true);
    match current.len().cmp(&required) {
        std::cmp::Ordering::Equal => SummaryPlan::Keep,
        std::cmp::Ordering::Less => SummaryPlan::Insert {
            at: current[current.len() - 1] + 1,
            count: required - current.len(),
        },
        std::cmp::Ordering::Greater => {
            let pages = document.pages();
            SummaryPlan::RemoveTrailing {
                page_ids: current[required..].iter().map(|&i| pages[i].id).collect(),
            }
        }
    }
}

/// Apply a reconciliation plan. Returns true if the document changed.
pub fn apply_summary_plan(document: &mut Document, plan: &SummaryPlan) -> bool {
    match plan {
        SummaryPlan::Keep => false,
        SummaryPlan::Insert { at, count } => {
            tracing::info!(count, at, "inserting summary pages");
            for offset in 0..*count {
                document.insert_page_at(at + offset, new_summary_page());
            }
            true
        }
        SummaryPlan::RemoveTrailing { page_ids } => {
            tracing::info!(count = page_ids.len(), "removing trailing summary pages");
            let mut removed = false;
            for &id in page_ids {
                removed |= document.remove_page(id).is_ok();
            }
            removed
        }
    }
}

/// Build a blank summary page holding exactly one table-of-contents
/// element sized to fill the page body.
#[must_use]
pub fn new_summary_page() -> Page {
    let toc = Element::new(ElementKind::TableOfContents, "").with_frame(toc_body_frame());
    Page::with_elements(PageKind::Summary, vec![toc])
}

/// The frame a summary page's TOC element occupies: the full page body
/// inside the margins.
#[must_use]
pub fn toc_body_frame() -> Rect {
    Rect::new(
        SIDE_MARGIN,
        TOP_MARGIN,
        PAGE_WIDTH - 2.0 * SIDE_MARGIN,
        PAGE_HEIGHT - TOP_MARGIN - BOTTOM_MARGIN,
    )
}
