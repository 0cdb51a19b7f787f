//! Canonical serialized representation of a document.
//!
//! Persisted documents go through a defensive normalization pass: missing
//! `elements`, `content` or `style` fields default to empty values and a
//! missing page kind defaults to `standard`. Only a document with no page
//! array at all is rejected as a load failure.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::element::{Element, ElementId, Style};
use crate::error::{CoreError, CoreResult};
use crate::geometry::Rect;
use crate::page::{Page, PageId, PageKind};

/// Persisted form of an element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Element identifier (UUID string).
    pub id: String,
    /// Content kind.
    pub kind: crate::element::ElementKind,
    /// Geometry; defaults to a zero-position frame when missing.
    #[serde(default)]
    pub frame: Rect,
    /// Opaque payload; defaults to empty.
    #[serde(default)]
    pub content: String,
    /// Presentation attributes; defaults to an empty bag.
    #[serde(default)]
    pub style: Style,
}

impl From<&Element> for ElementRecord {
    fn from(element: &Element) -> Self {
        Self {
            id: element.id.to_string(),
            kind: element.kind,
            frame: element.frame,
            content: element.content.clone(),
            style: element.style.clone(),
        }
    }
}

impl ElementRecord {
    /// Convert the record to a runtime element, clamping its frame into
    /// page bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDocument`] if the ID is not a valid UUID.
    pub fn into_element(self) -> CoreResult<Element> {
        let id = ElementId::parse(&self.id)
            .map_err(|e| CoreError::InvalidDocument(format!("bad element id: {e}")))?;
        let mut element = Element::new(self.kind, self.content)
            .with_frame(self.frame.clamped_to_page())
            .with_style(self.style);
        element.id = id;
        Ok(element)
    }
}

/// Persisted form of a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page identifier (UUID string).
    pub id: String,
    /// Structural role; defaults to `standard` when missing.
    #[serde(default = "PageRecord::default_kind")]
    pub kind: PageKind,
    /// Elements in insertion order; defaults to empty when missing.
    #[serde(default)]
    pub elements: Vec<ElementRecord>,
}

impl PageRecord {
    const fn default_kind() -> PageKind {
        PageKind::Standard
    }

    /// Convert the record to a runtime page.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDocument`] if any ID is not a valid UUID.
    pub fn into_page(self) -> CoreResult<Page> {
        let id = PageId::parse(&self.id)
            .map_err(|e| CoreError::InvalidDocument(format!("bad page id: {e}")))?;
        let elements = self
            .elements
            .into_iter()
            .map(ElementRecord::into_element)
            .collect::<CoreResult<Vec<_>>>()?;
        let mut page = Page::with_elements(self.kind, elements);
        page.id = id;
        Ok(page)
    }
}

impl From<&Page> for PageRecord {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id.to_string(),
            kind: page.kind,
            elements: page.elements().iter().map(ElementRecord::from).collect(),
        }
    }
}

/// Canonical persisted document: the page list, nothing else.
///
/// `pages` has no default on purpose - input without a page array fails
/// shape validation and is reported as a load error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Pages in document order.
    pub pages: Vec<PageRecord>,
}

impl DocumentFile {
    /// Build the persisted form of a runtime document.
    #[must_use]
    pub fn from_document(document: &Document) -> Self {
        Self {
            pages: document.pages().iter().map(PageRecord::from).collect(),
        }
    }

    /// Convert the persisted form back to a runtime document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyDocument`] for an empty page array or
    /// [`CoreError::InvalidDocument`] for malformed IDs.
    pub fn into_document(self) -> CoreResult<Document> {
        let pages = self
            .pages
            .into_iter()
            .map(PageRecord::into_page)
            .collect::<CoreResult<Vec<_>>>()?;
        Document::from_pages(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_document_round_trip_preserves_ids() {
        let mut doc = Document::new();
        let page_id = doc.pages()[0].id;
        let element_id = doc
            .page_mut(page_id)
            .expect("page")
            .add_element(
                Element::new(ElementKind::Text, "hello")
                    .with_frame(Rect::new(40.0, 40.0, 200.0, 60.0)),
            );

        let file = DocumentFile::from_document(&doc);
        let back = file.into_document().expect("round trip");

        assert_eq!(back.pages()[0].id, page_id);
        let element = back.pages()[0].element(element_id).expect("element");
        assert_eq!(element.content, "hello");
    }

    #[test]
    fn test_missing_elements_and_style_normalized() {
        let json = format!(
            r#"{{"pages": [{{"id": "{}"}}]}}"#,
            PageId::new()
        );
        let file: DocumentFile = serde_json::from_str(&json).expect("parse");
        let doc = file.into_document().expect("normalize");
        assert!(doc.pages()[0].is_empty());
        assert_eq!(doc.pages()[0].kind, PageKind::Standard);
    }

    #[test]
    fn test_missing_page_array_is_a_parse_error() {
        let result: Result<DocumentFile, _> = serde_json::from_str(r#"{"title": "nope"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_page_array_rejected() {
        let file: DocumentFile = serde_json::from_str(r#"{"pages": []}"#).expect("parse");
        assert!(matches!(
            file.into_document(),
            Err(CoreError::EmptyDocument)
        ));
    }

    #[test]
    fn test_bad_id_rejected() {
        let json = r#"{"pages": [{"id": "not-a-uuid"}]}"#;
        let file: DocumentFile = serde_json::from_str(json).expect("parse");
        assert!(matches!(
            file.into_document(),
            Err(CoreError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_frame_clamped_on_load() {
        let json = format!(
            r#"{{"pages": [{{"id": "{}", "elements": [
                {{"id": "{}", "kind": "text", "frame": {{"x": -50.0, "y": 9000.0, "width": 200.0, "height": 100.0}}}}
            ]}}]}}"#,
            PageId::new(),
            ElementId::new()
        );
        let file: DocumentFile = serde_json::from_str(&json).expect("parse");
        let doc = file.into_document().expect("load");
        let element = &doc.pages()[0].elements()[0];
        assert!(element.frame.x >= 0.0);
        assert!(element.frame.bottom() <= crate::geometry::PAGE_HEIGHT);
    }
}
