//! Axis-aligned rectangle primitives and page dimension constants.
//!
//! These constants are the single source of truth for page geometry: the
//! layout passes, the bounds clamping and any export target all read the
//! same values.

use serde::{Deserialize, Serialize};

/// Page width in pixels (A4 portrait at 96 dpi).
pub const PAGE_WIDTH: f32 = 794.0;

/// Page height in pixels (A4 portrait at 96 dpi).
pub const PAGE_HEIGHT: f32 = 1123.0;

/// Vertical space reserved at the top of every page.
pub const TOP_MARGIN: f32 = 40.0;

/// Vertical space reserved at the bottom of every page for placement.
pub const BOTTOM_MARGIN: f32 = 40.0;

/// Horizontal margin used as the default left edge for new elements.
pub const SIDE_MARGIN: f32 = 40.0;

/// Minimum vertical gap kept between stacked elements.
pub const ELEMENT_GAP: f32 = 20.0;

/// Minimum element width and height.
pub const MIN_ELEMENT_SIZE: f32 = 50.0;

/// An axis-aligned rectangle in page-local pixel coordinates.
///
/// `x`/`y` is the top-left corner; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for Rect {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        }
    }
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// True if the horizontal spans of the two rectangles intersect.
    #[must_use]
    pub fn overlaps_horizontally(&self, other: &Self) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// True if the vertical spans of the two rectangles intersect.
    #[must_use]
    pub fn overlaps_vertically(&self, other: &Self) -> bool {
        self.y < other.bottom() && self.bottom() > other.y
    }

    /// True if the two rectangles intersect in both axes.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.overlaps_horizontally(other) && self.overlaps_vertically(other)
    }

    /// Check if a point (in page coordinates) is within this rectangle.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Clamp this rectangle into the page bounds.
    ///
    /// The size is capped at the page dimensions first so the position
    /// ranges `[0, PAGE_WIDTH - width]` / `[0, PAGE_HEIGHT - height]` are
    /// never empty. Out-of-range positions are clamped, never rejected.
    #[must_use]
    pub fn clamped_to_page(&self) -> Self {
        let width = self.width.min(PAGE_WIDTH);
        let height = self.height.min(PAGE_HEIGHT);
        Self {
            x: self.x.clamp(0.0, PAGE_WIDTH - width),
            y: self.y.clamp(0.0, PAGE_HEIGHT - height),
            width,
            height,
        }
    }
}
