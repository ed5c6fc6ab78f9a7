// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility culling: which points fall inside a padded window.
//!
//! The reference algorithm is a single linear pass with an inclusive
//! axis-aligned bounding box test ([`contains_inclusive`]). It needs no
//! preprocessing and is adequate for tens of thousands of seats.
//! [`CullBackend`] is the seam for precomputed spatial structures that
//! answer the same question; [`LinearScan`] is the baseline implementation
//! and `GridBuckets` (feature `grid`) buckets positions on a uniform grid.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// Returns `rect` grown by `padding` on every side.
///
/// Negative or non-finite padding is treated as zero.
#[must_use]
pub fn padded(rect: Rect, padding: f64) -> Rect {
    let padding = if padding.is_finite() && padding > 0.0 {
        padding
    } else {
        0.0
    };
    rect.inflate(padding, padding)
}

/// Inclusive containment test: points on any edge count as inside.
///
/// Unlike [`Rect::contains`], the maximum edges are included.
#[inline]
#[must_use]
pub fn contains_inclusive(rect: Rect, pt: Point) -> bool {
    pt.x >= rect.x0 && pt.x <= rect.x1 && pt.y >= rect.y0 && pt.y <= rect.y1
}

/// A precomputed spatial structure over point positions addressed by slot.
///
/// Slots are the indices of the positions passed to [`CullBackend::rebuild`].
pub trait CullBackend {
    /// Replaces the indexed positions.
    fn rebuild(&mut self, positions: &[Point]);

    /// Number of indexed slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visits every slot whose position satisfies [`contains_inclusive`] for `rect`.
    ///
    /// Each matching slot is visited exactly once. Visit order is
    /// backend-specific.
    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, f: F);

    /// Appends matching slots to `out` in ascending slot order.
    fn query_rect(&self, rect: Rect, out: &mut Vec<usize>) {
        let start = out.len();
        self.visit_rect(rect, |slot| out.push(slot));
        out[start..].sort_unstable();
    }
}

/// Baseline backend: a flat copy of the positions scanned linearly.
#[derive(Clone, Debug, Default)]
pub struct LinearScan {
    positions: Vec<Point>,
}

impl LinearScan {
    /// Creates a backend over `positions`.
    #[must_use]
    pub fn new(positions: &[Point]) -> Self {
        Self {
            positions: positions.to_vec(),
        }
    }
}

impl CullBackend for LinearScan {
    fn rebuild(&mut self, positions: &[Point]) {
        self.positions.clear();
        self.positions.extend_from_slice(positions);
    }

    fn len(&self) -> usize {
        self.positions.len()
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        for (slot, pt) in self.positions.iter().enumerate() {
            if contains_inclusive(rect, *pt) {
                f(slot);
            }
        }
    }

    fn query_rect(&self, rect: Rect, out: &mut Vec<usize>) {
        // Already in slot order.
        self.visit_rect(rect, |slot| out.push(slot));
    }
}
