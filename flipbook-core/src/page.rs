//! Pages - ordered element containers with a structural role.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{Element, ElementId, ElementKind};
use crate::error::{CoreError, CoreResult};
use crate::geometry::TOP_MARGIN;

/// Unique identifier for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(Uuid);

impl PageId {
    /// Create a new unique page ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural role of a page within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Front cover, always first when present.
    Cover,
    /// Flyleaf following the cover.
    White,
    /// Auto-managed table-of-contents page.
    Summary,
    /// Regular content page, counted in the reader-facing page numbering.
    Standard,
    /// Back cover, always last when present.
    BackCover,
}

impl PageKind {
    /// True if this page holds arbitrary content and consumes a page number.
    #[must_use]
    pub const fn is_standard(self) -> bool {
        matches!(self, Self::Standard)
    }

    /// True if this is an auto-managed summary page.
    #[must_use]
    pub const fn is_summary(self) -> bool {
        matches!(self, Self::Summary)
    }
}

/// An ordered container of elements plus a structural role.
///
/// Elements are kept in insertion order; the geometric reading order is
/// derived on demand with [`Page::elements_by_y`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Unique identifier.
    pub id: PageId,
    /// Structural role.
    pub kind: PageKind,
    elements: Vec<Element>,
}

impl Page {
    /// Create a new empty page of the given kind.
    #[must_use]
    pub fn new(kind: PageKind) -> Self {
        Self {
            id: PageId::new(),
            kind,
            elements: Vec::new(),
        }
    }

    /// Create a page with an initial element list.
    #[must_use]
    pub fn with_elements(kind: PageKind, elements: Vec<Element>) -> Self {
        Self {
            id: PageId::new(),
            kind,
            elements,
        }
    }

    /// Elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Replace the whole element list (used when a layout pass rewrites
    /// positions wholesale).
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Append an element, returning its ID.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Remove an element by ID.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ElementNotFound`] if the element is not on this
    /// page.
    pub fn remove_element(&mut self, id: ElementId) -> CoreResult<Element> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CoreError::ElementNotFound(id.to_string()))?;
        Ok(self.elements.remove(index))
    }

    /// Get an element by ID.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Elements sorted by ascending `y` (geometric reading order).
    ///
    /// The sort is stable, so insertion order breaks ties.
    #[must_use]
    pub fn elements_by_y(&self) -> Vec<&Element> {
        let mut sorted: Vec<&Element> = self.elements.iter().collect();
        sorted.sort_by(|a, b| a.frame.y.total_cmp(&b.frame.y));
        sorted
    }

    /// True if any element of the given kind exists on this page.
    #[must_use]
    pub fn contains_kind(&self, kind: ElementKind) -> bool {
        self.elements.iter().any(|e| e.kind == kind)
    }

    /// Lowest occupied bottom edge, or the top margin if the page is empty.
    #[must_use]
    pub fn lowest_bottom(&self) -> f32 {
        self.elements
            .iter()
            .map(|e| e.frame.bottom())
            .fold(TOP_MARGIN, f32::max)
    }

    /// Number of elements on this page.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// True if the page has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn text_at(y: f32) -> Element {
        Element::new(ElementKind::Text, "t").with_frame(Rect::new(40.0, y, 200.0, 60.0))
    }

    #[test]
    fn test_add_remove_element() {
        let mut page = Page::new(PageKind::Standard);
        let id = page.add_element(text_at(100.0));
        assert_eq!(page.element_count(), 1);
        assert!(page.element(id).is_some());

        page.remove_element(id).expect("should remove");
        assert!(page.is_empty());
    }

    #[test]
    fn test_remove_missing_element_fails() {
        let mut page = Page::new(PageKind::Standard);
        let result = page.remove_element(ElementId::new());
        assert!(matches!(result, Err(CoreError::ElementNotFound(_))));
    }

    #[test]
    fn test_elements_by_y_is_geometric_order() {
        let mut page = Page::new(PageKind::Standard);
        let low = page.add_element(text_at(500.0));
        let high = page.add_element(text_at(40.0));

        let order: Vec<ElementId> = page.elements_by_y().iter().map(|e| e.id).collect();
        assert_eq!(order, vec![high, low]);
        // Insertion order is untouched.
        assert_eq!(page.elements()[0].id, low);
    }

    #[test]
    fn test_lowest_bottom_empty_page() {
        let page = Page::new(PageKind::Standard);
        assert!((page.lowest_bottom() - TOP_MARGIN).abs() < f32::EPSILON);
    }

    #[test]
    fn test_lowest_bottom_tracks_max() {
        let mut page = Page::new(PageKind::Standard);
        page.add_element(text_at(40.0));
        page.add_element(text_at(300.0));
        assert!((page.lowest_bottom() - 360.0).abs() < f32::EPSILON);
    }
}
