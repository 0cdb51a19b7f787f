//! Placement finding - first free position for a new element.
//!
//! The page is treated as a single vertical column of occupied bands:
//! horizontal position is ignored when looking for free space, so a gap
//! beside a narrow element does not count. This matches the editor's
//! append-then-scan behavior and keeps placement order-stable.

use flipbook_core::{Element, BOTTOM_MARGIN, ELEMENT_GAP, PAGE_HEIGHT, TOP_MARGIN};

/// Find a position for a new element of the given size on a page.
///
/// Strategy, in order:
/// 1. Append below the lowest occupied bottom edge (plus gap), or at the
///    top margin on an empty page.
/// 2. Scan top-down for the first inter-band gap of at least
///    `height + gap`.
/// 3. Use the space after the last band if it still fits.
///
/// Returns `None` when the element fits nowhere on this page; the caller
/// handles that by spilling onto a new page. The returned position is
/// always within `[TOP_MARGIN, PAGE_HEIGHT - BOTTOM_MARGIN]` vertically.
#[must_use]
pub fn find_position(
    elements: &[Element],
    _width: f32,
    height: f32,
    default_x: f32,
) -> Option<(f32, f32)> {
    let limit = PAGE_HEIGHT - BOTTOM_MARGIN;

    if elements.is_empty() {
        return (TOP_MARGIN + height <= limit).then_some((default_x, TOP_MARGIN));
    }

    // Bottom-append fast path.
    let lowest = elements
        .iter()
        .map(|e| e.frame.bottom())
        .fold(TOP_MARGIN, f32::max);
    let appended = lowest + ELEMENT_GAP;
    if appended + height <= limit {
        return Some((default_x, appended));
    }

    // Top-down gap scan over occupied bands.
    let mut sorted: Vec<&Element> = elements.iter().collect();
    sorted.sort_by(|a, b| a.frame.y.total_cmp(&b.frame.y));

    let mut cursor = TOP_MARGIN;
    for element in sorted {
        if element.frame.y - cursor >= height + ELEMENT_GAP {
            return Some((default_x, cursor));
        }
        cursor = cursor.max(element.frame.bottom() + ELEMENT_GAP);
    }

    // Trailing space after the last band.
    if cursor + height <= limit {
        return Some((default_x, cursor));
    }

    None
}
