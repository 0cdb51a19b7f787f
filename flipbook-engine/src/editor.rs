//! The editor - committed mutations over a flipbook document.
//!
//! Every mutation follows one pipeline: layout passes adjust geometry on a
//! cloned document, the snapshot is committed to [`History`], the structure
//! is re-derived, and the summary page count is reconciled (issuing further
//! commits when pages are spliced). Interactive gestures live in a
//! transient [`DragSession`] and commit exactly once on release.

use std::path::Path;

use flipbook_core::{
    Document, DocumentFile, EditorConfig, Element, ElementId, ElementKind, Page, PageId, PageKind,
    Rect, MIN_ELEMENT_SIZE, TOP_MARGIN,
};

use crate::error::{EngineError, EngineResult};
use crate::gravity::{compact, settle};
use crate::history::History;
use crate::placement::find_position;
use crate::session::{DragSession, GestureKind};
use crate::structure::{derive_structure, toc_slice, DocumentStructure, TocEntry};
use crate::summary::{apply_summary_plan, new_summary_page, summary_plan, SummaryPlan};

/// Outcome of an insertion request.
#[derive(Debug)]
pub enum Insertion {
    /// The element was placed and committed.
    Inserted(ElementId),
    /// The insertion needs user confirmation before proceeding (a
    /// single-instance structural kind already exists on the page). Pass
    /// the pending value to [`Editor::confirm_insertion`] to proceed, or
    /// drop it to abort with no state change.
    NeedsConfirmation(PendingInsertion),
}

/// A deferred insertion awaiting user confirmation.
#[derive(Debug, Clone)]
pub struct PendingInsertion {
    page_id: PageId,
    kind: ElementKind,
    content: String,
}

impl PendingInsertion {
    /// The kind awaiting confirmation.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// The page the insertion was requested on.
    #[must_use]
    pub fn page_id(&self) -> PageId {
        self.page_id
    }
}

#[derive(Debug)]
struct DragState {
    session: DragSession,
    preview: Document,
}

/// The document editor: bounded history, derived structure, transient
/// gesture state and the injected configuration.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    history: History,
    structure: DocumentStructure,
    active_page: PageId,
    drag: Option<DragState>,
}

impl Editor {
    /// Create an editor over a fresh single-page document.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self::with_document(config, Document::new())
    }

    /// Create an editor over an existing document.
    ///
    /// The summary page count is reconciled against the derived TOC before
    /// the initial snapshot is taken.
    #[must_use]
    pub fn with_document(config: EditorConfig, mut document: Document) -> Self {
        reconcile_in_place(&mut document);
        let structure = derive_structure(&document);
        let active_page = document.pages()[0].id;
        Self {
            config,
            history: History::new(document),
            structure,
            active_page,
            drag: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The committed document (the active history snapshot).
    #[must_use]
    pub fn document(&self) -> &Document {
        self.history.current()
    }

    /// The document to render: the drag preview while a gesture is live,
    /// the committed document otherwise.
    #[must_use]
    pub fn preview_document(&self) -> &Document {
        self.drag
            .as_ref()
            .map_or_else(|| self.document(), |state| &state.preview)
    }

    /// The derived numbering and table of contents for the committed
    /// document.
    #[must_use]
    pub fn structure(&self) -> &DocumentStructure {
        &self.structure
    }

    /// The TOC window shown by the summary page at the given index within
    /// the summary set.
    #[must_use]
    pub fn toc_slice(&self, summary_index: usize) -> &[TocEntry] {
        toc_slice(&self.structure, summary_index)
    }

    /// The currently active page.
    #[must_use]
    pub fn active_page(&self) -> PageId {
        self.active_page
    }

    /// Switch the active page.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PageNotFound`] if the page does not exist.
    pub fn set_active_page(&mut self, page_id: PageId) -> EngineResult<()> {
        if self.document().page(page_id).is_none() {
            return Err(EngineError::PageNotFound(page_id.to_string()));
        }
        self.active_page = page_id;
        Ok(())
    }

    /// The injected configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Mutable access to the injected configuration.
    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.config
    }

    /// Number of retained history snapshots.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// True if an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// True if a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // -----------------------------------------------------------------------
    // Element operations
    // -----------------------------------------------------------------------

    /// Insert a new element on the active page.
    ///
    /// Size, style and left edge come from the configuration. When the page
    /// has no room the element spills onto a new standard page spliced
    /// after the active one. Inserting a second single-instance structural
    /// kind returns [`Insertion::NeedsConfirmation`] instead of mutating.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PageNotFound`] if the active page vanished
    /// (which only happens through API misuse).
    pub fn insert_element(
        &mut self,
        kind: ElementKind,
        content: impl Into<String>,
    ) -> EngineResult<Insertion> {
        let content = content.into();
        let page = self
            .document()
            .page(self.active_page)
            .ok_or_else(|| EngineError::PageNotFound(self.active_page.to_string()))?;

        if kind.is_single_instance() && page.contains_kind(kind) {
            return Ok(Insertion::NeedsConfirmation(PendingInsertion {
                page_id: page.id,
                kind,
                content,
            }));
        }

        let size = self.config.default_size(kind);
        let x = EditorConfig::default_x(kind);
        if let Some((px, py)) = find_position(page.elements(), size.width, size.height, x) {
            let element = self.build_element(kind, content, px, py);
            let id = element.id;
            let mut doc = self.document().clone();
            doc.page_mut(self.active_page)
                .ok_or_else(|| EngineError::PageNotFound(self.active_page.to_string()))?
                .add_element(element);
            self.commit(doc);
            Ok(Insertion::Inserted(id))
        } else {
            let id = self.spill_to_new_page(self.active_page, kind, content)?;
            Ok(Insertion::Inserted(id))
        }
    }

    /// Execute a previously returned [`PendingInsertion`] on a fresh page.
    ///
    /// Dropping the pending value instead aborts the insertion with no
    /// state change.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PageNotFound`] if the originating page no
    /// longer exists.
    pub fn confirm_insertion(&mut self, pending: PendingInsertion) -> EngineResult<ElementId> {
        self.spill_to_new_page(pending.page_id, pending.kind, pending.content)
    }

    /// Move an element to a new position and settle the page.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PageNotFound`] or
    /// [`EngineError::ElementNotFound`] for unknown IDs.
    pub fn move_element(
        &mut self,
        page_id: PageId,
        element_id: ElementId,
        x: f32,
        y: f32,
    ) -> EngineResult<()> {
        self.mutate_and_settle(page_id, element_id, |frame| {
            Rect::new(x, y, frame.width, frame.height)
        })
    }

    /// Resize an element (minimum 50px per side) and settle the page.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PageNotFound`] or
    /// [`EngineError::ElementNotFound`] for unknown IDs.
    pub fn resize_element(
        &mut self,
        page_id: PageId,
        element_id: ElementId,
        width: f32,
        height: f32,
    ) -> EngineResult<()> {
        self.mutate_and_settle(page_id, element_id, |frame| {
            Rect::new(
                frame.x,
                frame.y,
                width.max(MIN_ELEMENT_SIZE),
                height.max(MIN_ELEMENT_SIZE),
            )
        })
    }

    /// Replace an element's content payload. Geometry is untouched, so no
    /// layout pass runs, but the change is committed (structural titles
    /// feed the TOC).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PageNotFound`] or
    /// [`EngineError::ElementNotFound`] for unknown IDs.
    pub fn set_element_content(
        &mut self,
        page_id: PageId,
        element_id: ElementId,
        content: impl Into<String>,
    ) -> EngineResult<()> {
        let mut doc = self.document().clone();
        let page = doc
            .page_mut(page_id)
            .ok_or_else(|| EngineError::PageNotFound(page_id.to_string()))?;
        let element = page
            .element_mut(element_id)
            .ok_or_else(|| EngineError::ElementNotFound(element_id.to_string()))?;
        element.content = content.into();
        self.commit(doc);
        Ok(())
    }

    /// Delete an element and compact its siblings upward.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PageNotFound`] or
    /// [`EngineError::ElementNotFound`] for unknown IDs.
    pub fn delete_element(&mut self, page_id: PageId, element_id: ElementId) -> EngineResult<()> {
        let mut doc = self.document().clone();
        let page = doc
            .page_mut(page_id)
            .ok_or_else(|| EngineError::PageNotFound(page_id.to_string()))?;
        page.remove_element(element_id)
            .map_err(|_| EngineError::ElementNotFound(element_id.to_string()))?;
        if let Some(compacted) = compact(page.elements()) {
            page.set_elements(compacted);
        }
        self.commit(doc);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Page operations
    // -----------------------------------------------------------------------

    /// Insert a new empty standard page after the given page (never after
    /// the back cover) and make it active.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PageNotFound`] for an unknown page.
    pub fn insert_page_after(&mut self, page_id: PageId) -> EngineResult<PageId> {
        let mut doc = self.document().clone();
        let page = Page::new(PageKind::Standard);
        let new_id = page.id;
        doc.insert_page_after(page_id, page)?;
        self.active_page = new_id;
        self.commit(doc);
        Ok(new_id)
    }

    /// Remove a page. Refused for the last remaining page, leaving state
    /// unchanged. Removing the active page activates its neighbor.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PageNotFound`] for an unknown page or
    /// [`CoreError::LastPage`](flipbook_core::CoreError::LastPage) (wrapped)
    /// for the final page.
    pub fn remove_page(&mut self, page_id: PageId) -> EngineResult<()> {
        let mut doc = self.document().clone();
        let index = doc
            .page_index(page_id)
            .ok_or_else(|| EngineError::PageNotFound(page_id.to_string()))?;
        doc.remove_page(page_id)?;
        if self.active_page == page_id {
            self.active_page = doc.pages()[index.min(doc.page_count() - 1)].id;
        }
        self.commit(doc);
        Ok(())
    }

    /// Toggle the summary feature.
    ///
    /// Enabling inserts the first summary page after the cover/white prefix
    /// (the reconciliation pass then tops the set up to the required
    /// count); disabling removes every summary page.
    pub fn set_summary_enabled(&mut self, enabled: bool) {
        let currently = self.document().summary_count() > 0;
        if enabled == currently {
            return;
        }
        let mut doc = self.document().clone();
        if enabled {
            let index = doc.summary_insert_index();
            doc.insert_page_at(index, new_summary_page());
        } else {
            let ids: Vec<PageId> = doc
                .summary_indices()
                .iter()
                .map(|&i| doc.pages()[i].id)
                .collect();
            // Removing every page would hit the last-page guard and leave a
            // summary survivor; splice a fresh standard page first.
            if ids.len() == doc.page_count() {
                doc.insert_page_at(doc.page_count(), Page::new(PageKind::Standard));
            }
            for id in ids {
                if let Err(e) = doc.remove_page(id) {
                    tracing::warn!("Could not remove summary page {id}: {e}");
                }
            }
        }
        self.commit(doc);
        self.ensure_active_page();
    }

    // -----------------------------------------------------------------------
    // Drag sessions
    // -----------------------------------------------------------------------

    /// Begin a move/resize gesture over an element. Only one session may be
    /// live at a time.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DragInProgress`] if a session is already
    /// live, or a not-found error for unknown IDs.
    pub fn begin_drag(
        &mut self,
        page_id: PageId,
        element_id: ElementId,
        kind: GestureKind,
    ) -> EngineResult<()> {
        if self.drag.is_some() {
            return Err(EngineError::DragInProgress);
        }
        let page = self
            .document()
            .page(page_id)
            .ok_or_else(|| EngineError::PageNotFound(page_id.to_string()))?;
        let element = page
            .element(element_id)
            .ok_or_else(|| EngineError::ElementNotFound(element_id.to_string()))?;
        self.drag = Some(DragState {
            session: DragSession::new(page_id, element_id, element.frame, kind),
            preview: self.document().clone(),
        });
        Ok(())
    }

    /// Update the live gesture with a pointer delta from the gesture start
    /// and return the preview document. Nothing is committed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoActiveDrag`] without a live session.
    pub fn drag_by(&mut self, dx: f32, dy: f32) -> EngineResult<&Document> {
        let state = self.drag.as_mut().ok_or(EngineError::NoActiveDrag)?;
        let frame = state.session.preview_frame(dx, dy);
        let page_id = state.session.page_id();
        let element_id = state.session.element_id();
        let page = state
            .preview
            .page_mut(page_id)
            .ok_or_else(|| EngineError::PageNotFound(page_id.to_string()))?;
        let element = page
            .element_mut(element_id)
            .ok_or_else(|| EngineError::ElementNotFound(element_id.to_string()))?;
        element.frame = frame;
        Ok(&state.preview)
    }

    /// Complete the live gesture: settle the affected page and commit the
    /// result as a single history entry.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoActiveDrag`] without a live session.
    pub fn end_drag(&mut self) -> EngineResult<()> {
        let state = self.drag.take().ok_or(EngineError::NoActiveDrag)?;
        let mut doc = state.preview;
        if let Some(page) = doc.page_mut(state.session.page_id()) {
            if let Some(settled) = settle(page.elements()) {
                page.set_elements(settled);
            }
        }
        self.commit(doc);
        Ok(())
    }

    /// Discard the live gesture without committing. Returns true if a
    /// session was active.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Step back one committed snapshot. Returns false at the start of
    /// history. Any live gesture is discarded.
    pub fn undo(&mut self) -> bool {
        self.drag = None;
        if self.history.undo().is_some() {
            self.rederive_after_cursor_move();
            true
        } else {
            false
        }
    }

    /// Step forward one committed snapshot. Returns false at the end of
    /// history. Any live gesture is discarded.
    pub fn redo(&mut self) -> bool {
        self.drag = None;
        if self.history.redo().is_some() {
            self.rederive_after_cursor_move();
            true
        } else {
            false
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Serialize the committed document to canonical JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(&DocumentFile::from_document(
            self.document(),
        ))?)
    }

    /// Replace the document with one loaded from JSON.
    ///
    /// Missing optional fields are normalized defensively; input that fails
    /// shape validation is rejected and the in-memory document is left
    /// untouched. Loading resets history and discards any live gesture.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialization`] for unparseable input or a
    /// wrapped [`CoreError`](flipbook_core::CoreError) for invalid IDs or
    /// an empty page list.
    pub fn load_json(&mut self, json: &str) -> EngineResult<()> {
        let file: DocumentFile = serde_json::from_str(json)?;
        let mut document = file.into_document()?;
        reconcile_in_place(&mut document);
        self.active_page = document.pages()[0].id;
        self.structure = derive_structure(&document);
        self.history = History::new(document);
        self.drag = None;
        Ok(())
    }

    /// Save the committed document to a file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] or [`EngineError::Serialization`].
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> EngineResult<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a document from a file, with the same guarantees as
    /// [`Editor::load_json`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if the file cannot be read, otherwise
    /// the [`Editor::load_json`] errors.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> EngineResult<()> {
        let json = std::fs::read_to_string(path.as_ref())?;
        self.load_json(&json)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn build_element(&self, kind: ElementKind, content: String, x: f32, y: f32) -> Element {
        let size = self.config.default_size(kind);
        Element::new(kind, content)
            .with_frame(Rect::new(x, y, size.width, size.height).clamped_to_page())
            .with_style(self.config.style_for(kind))
    }

    /// Spill an element onto a fresh standard page spliced after `after`
    /// (clamped before the back cover), switch to it, and commit everything
    /// as one snapshot.
    fn spill_to_new_page(
        &mut self,
        after: PageId,
        kind: ElementKind,
        content: String,
    ) -> EngineResult<ElementId> {
        let mut doc = self.document().clone();
        let page = Page::new(PageKind::Standard);
        let new_page_id = page.id;
        doc.insert_page_after(after, page)?;

        let x = EditorConfig::default_x(kind);
        let element = self.build_element(kind, content, x, TOP_MARGIN);
        let id = element.id;
        doc.page_mut(new_page_id)
            .ok_or_else(|| EngineError::PageNotFound(new_page_id.to_string()))?
            .add_element(element);

        tracing::info!(page = %new_page_id, "created overflow page");
        self.active_page = new_page_id;
        self.commit(doc);
        Ok(id)
    }

    fn mutate_and_settle(
        &mut self,
        page_id: PageId,
        element_id: ElementId,
        update: impl FnOnce(Rect) -> Rect,
    ) -> EngineResult<()> {
        let mut doc = self.document().clone();
        let page = doc
            .page_mut(page_id)
            .ok_or_else(|| EngineError::PageNotFound(page_id.to_string()))?;
        let element = page
            .element_mut(element_id)
            .ok_or_else(|| EngineError::ElementNotFound(element_id.to_string()))?;
        element.frame = update(element.frame).clamped_to_page();
        if let Some(settled) = settle(page.elements()) {
            page.set_elements(settled);
        }
        self.commit(doc);
        Ok(())
    }

    /// Commit a snapshot, then re-derive structure and reconcile the
    /// summary page count; reconciliation mutations commit again through
    /// the same path until the counts converge.
    fn commit(&mut self, document: Document) {
        self.history.commit(document);
        loop {
            self.structure = derive_structure(self.history.current());
            let plan = summary_plan(self.history.current(), self.structure.toc().len());
            if plan == SummaryPlan::Keep {
                break;
            }
            let mut doc = self.history.current().clone();
            if !apply_summary_plan(&mut doc, &plan) {
                break;
            }
            self.history.commit(doc);
        }
    }

    /// Undo/redo restore snapshots verbatim: structure is re-derived but
    /// summary reconciliation does not run (every committed snapshot was
    /// already reconciled).
    fn rederive_after_cursor_move(&mut self) {
        self.structure = derive_structure(self.history.current());
        self.ensure_active_page();
    }

    fn ensure_active_page(&mut self) {
        if self.document().page(self.active_page).is_none() {
            self.active_page = self.document().pages()[0].id;
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::new())
    }
}

/// Reconcile summary pages against the derived TOC without going through
/// history (used while seeding an editor from a loaded document).
fn reconcile_in_place(document: &mut Document) {
    loop {
        let structure = derive_structure(document);
        let plan = summary_plan(document, structure.toc().len());
        if !apply_summary_plan(document, &plan) {
            break;
        }
    }
}
