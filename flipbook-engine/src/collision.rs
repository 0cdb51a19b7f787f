//! Collision resolution - push overlapping elements down.
//!
//! After an interactive gesture the user may have left two elements
//! overlapping. This pass restores the invariant that no two elements with
//! horizontal overlap also overlap vertically, by pushing lower elements
//! further down. It never moves anything upward; closing gaps is the
//! gravity pass's job.

use flipbook_core::{Element, Rect, ELEMENT_GAP};

/// Resolve overlaps by pushing lower elements down.
///
/// Elements are visited in ascending `y` (stable on ties); each one is
/// pushed below every earlier element it horizontally overlaps, plus the
/// standard gap. Because later elements compare against already-pushed
/// positions, a single forward pass is transitive.
///
/// Returns `None` when nothing moved, so callers can detect a no-op without
/// comparing lists. The returned list preserves the input (insertion)
/// order with updated positions.
#[must_use]
pub fn resolve_collisions(elements: &[Element]) -> Option<Vec<Element>> {
    if elements.len() < 2 {
        return None;
    }

    let mut order: Vec<usize> = (0..elements.len()).collect();
    order.sort_by(|&a, &b| elements[a].frame.y.total_cmp(&elements[b].frame.y));

    let mut frames: Vec<Rect> = elements.iter().map(|e| e.frame).collect();
    let mut moved = 0usize;

    for (rank, &index) in order.iter().enumerate().skip(1) {
        for &earlier in &order[..rank] {
            if !frames[index].overlaps_horizontally(&frames[earlier]) {
                continue;
            }
            let floor = frames[earlier].bottom() + ELEMENT_GAP;
            if frames[index].y < floor {
                frames[index].y = floor;
                moved += 1;
            }
        }
    }

    if moved == 0 {
        return None;
    }
    tracing::debug!(moved, "collision pass pushed elements down");
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
