#![forbid(unsafe_code)]

//! Virtualization window: which indices to materialize for an offset.
//!
//! ```text
//! items_per_view = max(1, ceil(viewport / step))
//! start          = max(0, floor(offset / step) - overscan)
//! end            = min(count, start + items_per_view + 2 * overscan)
//! ```
//!
//! The computation is O(1) and allocation-free so it can run on every
//! animation frame.
//!
//! # Invariants
//!
//! 1. `start <= end <= count`.
//! 2. `end - start <= items_per_view + 2 * overscan`.
//! 3. For `overscan >= 1`, every index whose pixel span intersects
//!    `[offset, offset + viewport)` lies in `start..end`. With no overscan a
//!    fractional offset can leave the trailing partial bar outside.

use std::ops::Range;

/// Half-open index range to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleWindow {
    /// First index to render (inclusive).
    pub start: usize,
    /// One past the last index to render.
    pub end: usize,
}

impl VisibleWindow {
    /// The empty window at index 0.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Compute the window for the given scroll geometry.
    ///
    /// A non-positive or non-finite `step` yields [`Self::EMPTY`].
    #[must_use]
    pub fn compute(
        offset: f64,
        viewport_length: f64,
        step: f64,
        item_count: usize,
        overscan: usize,
    ) -> Self {
        if item_count == 0 || !(step.is_finite() && step > 0.0) {
            return Self::EMPTY;
        }

        let per_view = items_per_view(viewport_length, step);
        let first = if offset.is_finite() && offset > 0.0 {
            to_index(offset / step)
        } else {
            0
        };
        let start = first.saturating_sub(overscan).min(item_count);
        let span = per_view.saturating_add(overscan.saturating_mul(2));
        let end = start.saturating_add(span).min(item_count);
        Self { start, end }
    }

    /// Number of indices in the window.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the window holds no indices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `index` falls inside the window.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// The window as a range, for slicing the dataset.
    #[inline]
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// `ceil(viewport / step)`, at least 1.
#[must_use]
pub fn items_per_view(viewport_length: f64, step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) || !viewport_length.is_finite() {
        return 1;
    }
    to_index((viewport_length / step).ceil()).max(1)
}

fn to_index(value: f64) -> usize {
    if value <= 0.0 {
        0
    } else if value >= usize::MAX as f64 {
        usize::MAX
    } else {
        value.floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_item_scenario() {
        // step 7, viewport 14: two bars per view.
        assert_eq!(items_per_view(14.0, 7.0), 2);
        let w = VisibleWindow::compute(0.0, 14.0, 7.0, 3, 0);
        assert_eq!(w, VisibleWindow { start: 0, end: 2 });
    }

    #[test]
    fn empty_dataset_collapses() {
        let w = VisibleWindow::compute(0.0, 100.0, 7.0, 0, 10);
        assert_eq!(w, VisibleWindow::EMPTY);
        assert!(w.is_empty());
    }

    #[test]
    fn zero_viewport_still_renders_one() {
        assert_eq!(items_per_view(0.0, 7.0), 1);
        let w = VisibleWindow::compute(0.0, 0.0, 7.0, 50, 0);
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn overscan_applied_on_both_sides() {
        // offset 700 → first visible 100; 10 per view; overscan 5.
        let w = VisibleWindow::compute(700.0, 70.0, 7.0, 20_000, 5);
        assert_eq!(w.start, 95);
        assert_eq!(w.end, 95 + 10 + 10);
    }

    #[test]
    fn start_clamped_at_zero() {
        let w = VisibleWindow::compute(14.0, 70.0, 7.0, 1_000, 10);
        assert_eq!(w.start, 0);
        assert_eq!(w.end, 30);
    }

    #[test]
    fn end_clamped_at_count() {
        let w = VisibleWindow::compute(6_930.0, 70.0, 7.0, 1_000, 10);
        assert_eq!(w.end, 1_000);
        assert!(w.start <= w.end);
    }

    #[test]
    fn window_size_bounded_for_huge_dataset() {
        let w = VisibleWindow::compute(350_000.0, 450.0, 7.0, 10_000_000, 10);
        assert!(w.len() <= items_per_view(450.0, 7.0) + 20);
    }

    #[test]
    fn fractional_offset_needs_overscan_for_trailing_bar() {
        // View [10.5, 24.5): bars 1 and 3 are partially visible.
        let bare = VisibleWindow::compute(10.5, 14.0, 7.0, 10, 0);
        assert_eq!(bare, VisibleWindow { start: 1, end: 3 });
        assert!(!bare.contains(3));

        let padded = VisibleWindow::compute(10.5, 14.0, 7.0, 10, 1);
        assert!((1..=3).all(|i| padded.contains(i)));
    }

    #[test]
    fn degenerate_step_is_empty() {
        assert!(VisibleWindow::compute(0.0, 100.0, 0.0, 10, 0).is_empty());
        assert!(VisibleWindow::compute(0.0, 100.0, f64::NAN, 10, 0).is_empty());
    }

    #[test]
    fn range_matches_bounds() {
        let w = VisibleWindow { start: 3, end: 9 };
        assert_eq!(w.range(), 3..9);
        assert_eq!(w.len(), 6);
    }
}
