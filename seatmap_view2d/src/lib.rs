// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=seatmap_view2d --heading-base-level=0

//! Seatmap View 2D: the viewport engine behind an interactive seat map.
//!
//! This crate provides a small, headless model of a rectangular **window**
//! into venue space, plus the gesture math that moves it. It focuses on:
//! - Window state: a venue-space rectangle that starts at the full map and
//!   keeps the map's aspect ratio.
//! - Zoom about a fixed point, with a reject-not-clamp zoom range.
//! - Drag panning at the right venue/pixel ratio.
//! - Incremental, damped two-finger pinch zoom.
//! - Visibility culling of seat positions against the padded window.
//!
//! It does **not** own any seat data or rendering backend. Callers are
//! expected to:
//! - Translate raw wheel/pointer/touch events into controller calls, in
//!   arrival order.
//! - Cancel gestures when the pointer leaves the surface.
//! - Pass their seat collection to [`ViewportController::visible_seats`]
//!   every time the window changes, and render only what comes back.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use seatmap_view2d::{InputProfile, ViewportController};
//!
//! // A 1400x2600 venue rendered on a 700x1300 pixel surface.
//! let mut view = ViewportController::new(Size::new(1400.0, 2600.0), Size::new(700.0, 1300.0));
//! assert_eq!(view.window(), Rect::new(0.0, 0.0, 1400.0, 2600.0));
//!
//! // Wheel up over the top-left corner: zoom in, keeping that corner fixed.
//! assert!(view.zoom_at_view_point(0.9, Point::new(0.0, 0.0)));
//!
//! // Drag right by 10 pixels: content follows the pointer.
//! view.begin_pan(Point::new(100.0, 100.0));
//! view.continue_pan(Point::new(110.0, 100.0));
//! view.end_pan();
//! assert!(view.window().x0 < 0.0);
//!
//! // Cull seat positions against the padded window.
//! let seats = [Point::new(50.0, 50.0), Point::new(5_000.0, 50.0)];
//! let padding = InputProfile::Pointer.default_padding();
//! let visible = view.visible_seats(seats, padding, |p| *p);
//! assert_eq!(visible, [Point::new(50.0, 50.0)]);
//! ```
//!
//! ## Zoom range
//!
//! Zoom requests are accepted only if the resulting window width lies in
//! [`ZoomLimits`] (by default `[400, 2 * map_width]`). A request outside the
//! range is discarded entirely rather than clamped to the boundary, so the
//! window never drifts off the anchor point on the last step.
//!
//! ## Culling backends
//!
//! [`ViewportController::visible_seats`] is a linear scan, which is plenty
//! for tens of thousands of seats. [`CullBackend`] is the extension point for
//! precomputed structures that answer the same query; [`LinearScan`] is the
//! baseline and `GridBuckets` (feature `grid`, on by default) buckets
//! positions on a uniform grid. Both return exactly the slots that pass the
//! inclusive containment test.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anchor;
mod controller;
mod cull;
#[cfg(feature = "grid")]
mod grid;
mod profile;

pub use anchor::PanAnchor;
pub use controller::{ViewportController, ViewportDebugInfo};
pub use cull::{CullBackend, LinearScan, contains_inclusive, padded};
#[cfg(feature = "grid")]
pub use grid::GridBuckets;
pub use profile::{InputProfile, ZoomLimits};
