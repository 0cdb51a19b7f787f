//! Derived numbering and table of contents.
//!
//! A pure function of the page list: pages are walked in document order,
//! each standard page's elements in geometric reading order, and running
//! counters produce the hierarchical labels. Nothing here is stored on the
//! document; the editor re-derives after every commit and the export path
//! runs the same function over the same pages, so both always agree.

use std::collections::HashMap;

use serde::Serialize;

use flipbook_core::{Document, ElementId, ElementKind, PageId, MAX_TOC_ITEMS_PER_PAGE};

/// One derived table-of-contents record, pointing at a sequence- or
/// part-level structural element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Formatted numbering label.
    pub label: String,
    /// Title text (the element's content).
    pub title: String,
    /// 1-based ordinal of the owning page among standard pages.
    pub page_ordinal: usize,
    /// Owning page ID.
    pub page_id: PageId,
    /// Structural kind of the source element.
    pub kind: ElementKind,
}

/// The full derived structure: numbering labels plus the flat TOC.
///
/// Serializable so hosts can hand the derived TOC to an export target
/// without re-walking the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentStructure {
    numbering: HashMap<ElementId, String>,
    toc: Vec<TocEntry>,
}

impl DocumentStructure {
    /// Numbering label for a structural element, if it has one.
    #[must_use]
    pub fn label_for(&self, id: ElementId) -> Option<&str> {
        self.numbering.get(&id).map(String::as_str)
    }

    /// All numbering labels by element ID.
    #[must_use]
    pub fn numbering(&self) -> &HashMap<ElementId, String> {
        &self.numbering
    }

    /// Table-of-contents entries in document order.
    #[must_use]
    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    /// True if no structural elements were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbering.is_empty()
    }
}

/// Derive numbering labels and the table of contents from a document.
///
/// Counters: `sequence` resets nothing above it; `part`, `h3` and `h4`
/// reset when their parent level increments. Only standard pages are
/// visited and only standard pages consume a page ordinal. Sub-headings
/// receive labels but no TOC entry.
#[must_use]
pub fn derive_structure(document: &Document) -> DocumentStructure {
    let mut numbering = HashMap::new();
    let mut toc = Vec::new();

    let mut sequence = 0u32;
    let mut part = 0u32;
    let mut h3 = 0u32;
    let mut h4 = 0u32;
    let mut page_ordinal = 0usize;

    for page in document.pages() {
        if !page.kind.is_standard() {
            continue;
        }
        page_ordinal += 1;

        for element in page.elements_by_y() {
            let label = match element.kind {
                ElementKind::SequenceTitle => {
                    sequence += 1;
                    part = 0;
                    h3 = 0;
                    h4 = 0;
                    format!("SÉQUENCE {sequence}")
                }
                ElementKind::PartTitle => {
                    part += 1;
                    h3 = 0;
                    h4 = 0;
                    format!("{part} -")
                }
                ElementKind::SubTitle => {
                    h3 += 1;
                    h4 = 0;
                    format!("{part}.{h3} -")
                }
                ElementKind::SubSubTitle => {
                    h4 += 1;
                    format!("{part}.{h3}.{h4} -")
                }
                _ => continue,
            };

            numbering.insert(element.id, label.clone());
            if element.kind.is_toc_listed() {
                toc.push(TocEntry {
                    label,
                    title: element.content.clone(),
                    page_ordinal,
                    page_id: page.id,
                    kind: element.kind,
                });
            }
        }
    }

    DocumentStructure { numbering, toc }
}

/// The window of TOC entries shown by the summary page at the given index
/// within the summary set (0-based).
#[must_use]
pub fn toc_slice(structure: &DocumentStructure, summary_index: usize) -> &[TocEntry] {
    let start = summary_index.saturating_mul(MAX_TOC_ITEMS_PER_PAGE);
    let toc = structure.toc();
    if start >= toc.len() {
        return &[];
    }
    let end = (start + MAX_TOC_ITEMS_PER_PAGE).min(toc.len());
    &toc[start..end]
}
