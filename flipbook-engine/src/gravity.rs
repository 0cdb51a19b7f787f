//! Gravity compaction - pull elements up to close dead vertical space.
//!
//! Deletions and drags leave holes; this pass pulls each element up to the
//! lowest legal position above it without ever pushing anything down. The
//! combined [`settle`] step (gravity then collision resolution) is what
//! runs when a gesture completes.

use flipbook_core::{Element, Rect, ELEMENT_GAP, TOP_MARGIN};

use crate::collision::resolve_collisions;

/// Pull elements upward to remove unnecessary vertical gaps.
///
/// Elements are visited in ascending `y`. Each one moves up to the maximum
/// of the top margin and `bottom + gap` of every already-placed element it
/// horizontally overlaps - but only if that is strictly above its current
/// position. A full-bleed sequence banner already sitting at the top margin
/// is left untouched.
///
/// Returns `None` when nothing moved. The returned list preserves input
/// order with updated positions.
#[must_use]
pub fn compact(elements: &[Element]) -> Option<Vec<Element>> {
    if elements.is_empty() {
        return None;
    }

    let mut order: Vec<usize> = (0..elements.len()).collect();
    order.sort_by(|&a, &b| elements[a].frame.y.total_cmp(&elements[b].frame.y));

    let mut frames: Vec<Rect> = elements.iter().map(|e| e.frame).collect();
    let mut placed: Vec<usize> = Vec::with_capacity(elements.len());
    let mut moved = 0usize;

    for &index in &order {
        let banner_at_top =
            elements[index].kind.is_full_bleed() && frames[index].y <= TOP_MARGIN;
        if !banner_at_top {
            let mut min_y = TOP_MARGIN;
            for &prior in &placed {
                if frames[index].overlaps_horizontally(&frames[prior]) {
                    min_y = min_y.max(frames[prior].bottom() + ELEMENT_GAP);
                }
            }
            if min_y < frames[index].y {
                frames[index].y = min_y;
                moved += 1;
            }
        }
        placed.push(index);
    }

    if moved == 0 {
        return None;
    }
    tracing::debug!(moved, "gravity pass pulled elements up");
    Some(
        elements
            .iter()
            .zip(frames)
            .map(|(element, frame)| {
                let mut element = element.clone();
                element.frame = frame;
                element
            })
            .collect(),
    )
}

/// The settle step applied when an interactive gesture completes: gravity
/// compaction followed by collision resolution.
///
/// Returns `None` when neither pass changed anything.
#[must_use]
pub fn settle(elements: &[Element]) -> Option<Vec<Element>> {
    match compact(elements) {
        Some(compacted) => {
            let resolved = resolve_collisions(&compacted).unwrap_or(compacted);
            Some(resolved)
        }
        None => resolve_collisions(elements),
    }
}
