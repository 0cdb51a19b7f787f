//! Transient drag/resize sessions.
//!
//! Interactive gestures never mutate committed state directly: a session
//! captures the affected element's initial geometry, produces clamped
//! preview frames for every pointer step, and the editor commits exactly
//! once on release. Cancelling (escape key) drops the session with no
//! state change.

use flipbook_core::{ElementId, PageId, Rect, MIN_ELEMENT_SIZE};

/// The kind of gesture a session tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Translate the element.
    Move,
    /// Resize the element from its bottom-right corner.
    Resize,
}

/// A live drag/resize gesture over one element.
#[derive(Debug, Clone)]
pub struct DragSession {
    element_id: ElementId,
    page_id: PageId,
    origin: Rect,
    kind: GestureKind,
}

impl DragSession {
    /// Start a session over an element with the given initial frame.
    #[must_use]
    pub fn new(page_id: PageId, element_id: ElementId, origin: Rect, kind: GestureKind) -> Self {
        Self {
            element_id,
            page_id,
            origin,
            kind,
        }
    }

    /// The element being manipulated.
    #[must_use]
    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    /// The page the element lives on.
    #[must_use]
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// The element's frame when the gesture started.
    #[must_use]
    pub fn origin(&self) -> Rect {
        self.origin
    }

    /// The gesture kind.
    #[must_use]
    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// The clamped preview frame for a pointer delta from the gesture
    /// start. Deltas always apply to the origin frame, so intermediate
    /// previews never accumulate error.
    #[must_use]
    pub fn preview_frame(&self, dx: f32, dy: f32) -> Rect {
        let frame = match self.kind {
            GestureKind::Move => Rect::new(
                self.origin.x + dx,
                self.origin.y + dy,
                self.origin.width,
                self.origin.height,
            ),
            GestureKind::Resize => Rect::new(
                self.origin.x,
                self.origin.y,
                (self.origin.width + dx).max(MIN_ELEMENT_SIZE),
                (self.origin.height + dy).max(MIN_ELEMENT_SIZE),
            ),
        };
        frame.clamped_to_page()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbook_core::{PAGE_HEIGHT, PAGE_WIDTH};

    fn session(kind: GestureKind) -> DragSession {
        DragSession::new(
            PageId::new(),
            ElementId::new(),
            Rect::new(100.0, 100.0, 200.0, 150.0),
            kind,
        )
    }

    #[test]
    fn test_move_preview_applies_delta() {
        let s = session(GestureKind::Move);
        let frame = s.preview_frame(50.0, -20.0);
        assert!((frame.x - 150.0).abs() < f32::EPSILON);
        assert!((frame.y - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_move_preview_clamped_to_page() {
        let s = session(GestureKind::Move);
        let frame = s.preview_frame(-5000.0, 5000.0);
        assert!((frame.x - 0.0).abs() < f32::EPSILON);
        assert!((frame.y - (PAGE_HEIGHT - 150.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_resize_preview_enforces_minimum() {
        let s = session(GestureKind::Resize);
        let frame = s.preview_frame(-500.0, -500.0);
        assert!((frame.width - MIN_ELEMENT_SIZE).abs() < f32::EPSILON);
        assert!((frame.height - MIN_ELEMENT_SIZE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_resize_preview_capped_at_page() {
        let s = session(GestureKind::Resize);
        let frame = s.preview_frame(5000.0, 5000.0);
        assert!(frame.width <= PAGE_WIDTH);
        assert!(frame.height <= PAGE_HEIGHT);
    }

    #[test]
    fn test_deltas_do_not_accumulate() {
        let s = session(GestureKind::Move);
        let _ = s.preview_frame(10.0, 10.0);
        let frame = s.preview_frame(20.0, 20.0);
        // Second preview is origin + 20, not origin + 30.
        assert!((frame.x - 120.0).abs() < f32::EPSILON);
    }
}
