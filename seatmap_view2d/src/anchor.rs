// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan anchor: the last pointer position seen during a drag.

use kurbo::{Point, Vec2};

/// Tracks the pointer positions of one pan gesture.
///
/// The anchor is the *last* recorded position, so each update yields the
/// incremental delta since the previous event rather than the total offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanAnchor {
    start: Option<Point>,
    last: Option<Point>,
}

impl PanAnchor {
    /// Starts a gesture at `pos`. Non-finite positions are ignored.
    pub fn begin(&mut self, pos: Point) -> bool {
        if !pos.is_finite() {
            return false;
        }
        self.start = Some(pos);
        self.last = Some(pos);
        true
    }

    /// Moves the anchor to `pos`, returning the delta from the previous position.
    ///
    /// Returns `None` when no gesture is active or `pos` is not finite; in
    /// both cases the anchor is left untouched.
    pub fn advance(&mut self, pos: Point) -> Option<Vec2> {
        if !pos.is_finite() {
            return None;
        }
        let last = self.last?;
        self.last = Some(pos);
        Some(pos - last)
    }

    /// Offset from the gesture's start to `pos`.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.start.map(|start| pos - start)
    }

    /// Last recorded position.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.last
    }

    /// Forgets the gesture.
    pub fn clear(&mut self) {
        self.start = None;
        self.last = None;
    }

    /// Returns `true` while a gesture is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }
}
