// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid culling backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::cull::{CullBackend, contains_inclusive};

type Cell = (i64, i64);

/// Buckets positions into square cells keyed by coarse coordinate.
///
/// A query visits only the cells overlapping the rectangle and then applies
/// the exact inclusive test, so results match [`crate::LinearScan`].
/// Non-finite positions are never bucketed and therefore never visible.
#[derive(Clone)]
pub struct GridBuckets {
    cell_size: f64,
    len: usize,
    cells: HashMap<Cell, SmallVec<[(usize, Point); 16]>>,
}

impl GridBuckets {
    /// Default cell edge in venue units; roughly a block of 6x5 seats.
    pub const DEFAULT_CELL_SIZE: f64 = 96.0;

    /// Creates an empty grid with the given cell edge.
    ///
    /// Non-positive or non-finite sizes fall back to [`Self::DEFAULT_CELL_SIZE`].
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            Self::DEFAULT_CELL_SIZE
        };
        Self {
            cell_size,
            len: 0,
            cells: HashMap::new(),
        }
    }

    /// Cell edge in venue units.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    fn coord(&self, v: f64) -> i64 {
        let q = v / self.cell_size;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "saturating float-to-int cast; coordinates beyond i64 share a cell"
        )]
        let t = q as i64;
        // Round toward negative infinity without `floor`, which is not in core.
        let truncated = t as f64;
        if truncated > q { t - 1 } else { t }
    }

    fn cell_of(&self, pt: Point) -> Cell {
        (self.coord(pt.x), self.coord(pt.y))
    }
}

impl Default for GridBuckets {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CELL_SIZE)
    }
}

impl Debug for GridBuckets {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridBuckets")
            .field("cell_size", &self.cell_size)
            .field("slots", &self.len)
            .field("occupied_cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl CullBackend for GridBuckets {
    fn rebuild(&mut self, positions: &[Point]) {
        self.cells.clear();
        self.len = positions.len();
        for (slot, pt) in positions.iter().enumerate() {
            if !pt.is_finite() {
                continue;
            }
            let cell = self.cell_of(*pt);
            self.cells.entry(cell).or_default().push((slot, *pt));
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        if !(rect.x0 <= rect.x1 && rect.y0 <= rect.y1) {
            return;
        }
        let (cx0, cy0) = self.cell_of(Point::new(rect.x0, rect.y0));
        let (cx1, cy1) = self.cell_of(Point::new(rect.x1, rect.y1));
        let span_x = cx1.saturating_sub(cx0).saturating_add(1);
        let span_y = cy1.saturating_sub(cy0).saturating_add(1);

        let mut visit_bucket = |bucket: &SmallVec<[(usize, Point); 16]>| {
            for (slot, pt) in bucket {
                if contains_inclusive(rect, *pt) {
                    f(*slot);
                }
            }
        };

        // A very zoomed-out query may cover more cells than are occupied.
        let covered = usize::try_from(span_x.saturating_mul(span_y)).unwrap_or(usize::MAX);
        if covered > self.cells.len() {
            for ((x, y), bucket) in &self.cells {
                if (cx0..=cx1).contains(x) && (cy0..=cy1).contains(y) {
                    visit_bucket(bucket);
                }
            }
        } else {
            for y in cy0..=cy1 {
                for x in cx0..=cx1 {
                    if let Some(bucket) = self.cells.get(&(x, y)) {
                        visit_bucket(bucket);
                    }
                }
            }
        }
    }
}
